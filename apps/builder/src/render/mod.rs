// Preview rendering: pure record → document projection, the HTML views, and
// the deterministic A4 layout pass shared by every rasterizer backend.

pub mod font_metrics;
pub mod html;
pub mod layout;
pub mod preview;
