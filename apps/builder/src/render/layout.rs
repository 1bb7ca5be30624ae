//! Layout pass: flattens a `PreviewDocument` onto an A4 page.
//!
//! Produces a paint plan: absolutely positioned text lines plus the section
//! underline rules, in raster pixels at the configured DPI. The plan is what
//! every rasterizer backend consumes, so layout stays deterministic and
//! testable without producing a single pixel.
//!
//! CPU-bound consumers (the rasterizer backends) must run inside
//! `tokio::task::spawn_blocking`.

use serde::{Deserialize, Serialize};

use crate::render::font_metrics::{preview_face, FontMetrics};
use crate::render::preview::{Block, PreviewDocument};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// A4 portrait, in millimeters. The same page the PDF encoder targets.
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Raster and type parameters for the preview page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Raster density. 150 DPI puts an A4 page at 1240×1754 px.
    pub dpi: f32,
    /// Uniform page margin in millimeters.
    pub margin_mm: f32,
    /// Gap between the narrow and wide columns in millimeters.
    pub column_gap_mm: f32,
    pub name_pt: f32,
    pub section_pt: f32,
    pub body_pt: f32,
}

/// Default page config: A4 at 150 DPI, 12mm margins, 10pt body text.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        dpi: 150.0,
        margin_mm: 12.0,
        column_gap_mm: 8.0,
        name_pt: 22.0,
        section_pt: 13.0,
        body_pt: 10.0,
    }
}

impl PageConfig {
    pub fn mm_to_px(&self, mm: f32) -> f32 {
        mm * self.dpi / 25.4
    }

    pub fn pt_to_px(&self, pt: f32) -> f32 {
        pt * self.dpi / 72.0
    }

    pub fn page_width_px(&self) -> u32 {
        self.mm_to_px(A4_WIDTH_MM).round() as u32
    }

    pub fn page_height_px(&self) -> u32 {
        self.mm_to_px(A4_HEIGHT_MM).round() as u32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paint plan
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    /// The applicant name across the header.
    Name,
    /// Centered header contact/link lines.
    Contact,
    /// Underlined column section heading.
    SectionHeading,
    /// Bold sub-title (college name, project heading, skill heading).
    SubTitle,
    Body,
}

impl LineStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, LineStyle::Name | LineStyle::SectionHeading | LineStyle::SubTitle)
    }
}

/// One positioned line of text. `x`/`top` are raster pixels from the page's
/// top-left corner; the painter derives the baseline from `px_size`.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub top: f32,
    pub px_size: f32,
    pub style: LineStyle,
    /// Draw a bullet marker just left of `x`.
    pub bullet: bool,
}

/// A filled rectangle (section underlines), in raster pixels.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a rasterizer backend needs to paint the page.
#[derive(Debug, Clone, Serialize)]
pub struct PaintPlan {
    pub width_px: u32,
    pub height_px: u32,
    pub lines: Vec<PlacedLine>,
    pub rules: Vec<Rule>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout pass
// ────────────────────────────────────────────────────────────────────────────

const LINE_HEIGHT: f32 = 1.45;
/// Bullet text indent in em units of the body size.
const BULLET_INDENT_EM: f32 = 1.2;

/// Lays the document out on one A4 page.
///
/// Content that runs past the page bottom keeps its positions; the painter
/// clips it, matching the browser preview's fixed 210mm × 297mm sheet.
pub fn lay_out(doc: &PreviewDocument, config: &PageConfig) -> PaintPlan {
    let metrics = preview_face();
    let page_w = config.page_width_px() as f32;
    let margin = config.mm_to_px(config.margin_mm);
    let content_w = page_w - 2.0 * margin;
    let gap = config.mm_to_px(config.column_gap_mm);
    let narrow_w = (content_w - gap) / 3.0;
    let wide_w = content_w - gap - narrow_w;
    let wide_x = margin + narrow_w + gap;

    let mut plan = PaintPlan {
        width_px: config.page_width_px(),
        height_px: config.page_height_px(),
        lines: Vec::new(),
        rules: Vec::new(),
    };

    // Header band: name and the two contact lines, centered on the page.
    let mut y = margin;
    y = place_centered(
        &mut plan,
        metrics,
        config,
        &doc.header.name,
        config.name_pt,
        LineStyle::Name,
        page_w,
        y,
    );
    y = place_centered(
        &mut plan,
        metrics,
        config,
        &doc.header.contact_line,
        config.body_pt,
        LineStyle::Contact,
        page_w,
        y,
    );
    y = place_centered(
        &mut plan,
        metrics,
        config,
        "LinkedIn | GitHub",
        config.body_pt,
        LineStyle::Contact,
        page_w,
        y,
    );
    y += config.pt_to_px(config.body_pt);

    // Columns flow independently below the header.
    let mut column = ColumnCursor {
        plan: &mut plan,
        metrics,
        config,
        x: margin,
        width: narrow_w,
        y,
    };
    for block in &doc.narrow {
        column.place_block(block);
    }

    let mut column = ColumnCursor {
        plan: &mut plan,
        metrics,
        config,
        x: wide_x,
        width: wide_w,
        y,
    };
    for block in &doc.wide {
        column.place_block(block);
    }

    plan
}

fn place_centered(
    plan: &mut PaintPlan,
    metrics: &FontMetrics,
    config: &PageConfig,
    text: &str,
    pt: f32,
    style: LineStyle,
    page_w: f32,
    y: f32,
) -> f32 {
    let px_size = config.pt_to_px(pt);
    let width = metrics.measure_px(text, px_size);
    plan.lines.push(PlacedLine {
        text: text.to_string(),
        x: (page_w - width) / 2.0,
        top: y,
        px_size,
        style,
        bullet: false,
    });
    y + px_size * LINE_HEIGHT
}

struct ColumnCursor<'a> {
    plan: &'a mut PaintPlan,
    metrics: &'a FontMetrics,
    config: &'a PageConfig,
    x: f32,
    width: f32,
    y: f32,
}

impl ColumnCursor<'_> {
    fn place_block(&mut self, block: &Block) {
        match block {
            Block::SectionHeading(text) => {
                self.y += self.body_px() * 0.6; // breathing room above a section
                let px_size = self.config.pt_to_px(self.config.section_pt);
                self.push_line(text, px_size, LineStyle::SectionHeading, 0.0, false);
                // Underline rule across the column, just under the heading.
                self.plan.rules.push(Rule {
                    x: self.x,
                    y: self.y - px_size * 0.25,
                    width: self.width,
                    height: (px_size * 0.08).max(1.0),
                });
                self.y += px_size * 0.35;
            }
            Block::Paragraph(text) => {
                self.place_wrapped(text, LineStyle::Body, 0.0, false);
                self.y += self.body_px() * 0.5;
            }
            Block::TitleLine { title, detail } => {
                self.place_wrapped(title, LineStyle::SubTitle, 0.0, false);
                if !detail.is_empty() {
                    self.place_wrapped(detail, LineStyle::Body, 0.0, false);
                }
                self.y += self.body_px() * 0.3;
            }
            Block::SkillGroup { heading, bullets } => {
                self.place_wrapped(heading, LineStyle::SubTitle, 0.0, false);
                let indent = self.body_px() * BULLET_INDENT_EM;
                for bullet in bullets {
                    self.place_wrapped(bullet, LineStyle::Body, indent, true);
                }
                self.y += self.body_px() * 0.4;
            }
            Block::Bullets(items) => {
                let indent = self.body_px() * BULLET_INDENT_EM;
                for item in items {
                    self.place_wrapped(item, LineStyle::Body, indent, true);
                }
                self.y += self.body_px() * 0.4;
            }
        }
    }

    /// Word-wraps `text` into the column and advances the cursor. The bullet
    /// marker goes on the first wrapped line only.
    fn place_wrapped(&mut self, text: &str, style: LineStyle, indent: f32, bullet: bool) {
        let px_size = if style == LineStyle::Body {
            self.body_px()
        } else {
            self.config.pt_to_px(self.config.body_pt + 1.0)
        };
        let usable_em = (self.width - indent) / px_size;
        for (i, line) in self.metrics.wrap(text, usable_em).into_iter().enumerate() {
            self.push_line(&line, px_size, style, indent, bullet && i == 0);
        }
    }

    fn push_line(&mut self, text: &str, px_size: f32, style: LineStyle, indent: f32, bullet: bool) {
        self.plan.lines.push(PlacedLine {
            text: text.to_string(),
            x: self.x + indent,
            top: self.y,
            px_size,
            style,
            bullet,
        });
        self.y += px_size * LINE_HEIGHT;
    }

    fn body_px(&self) -> f32 {
        self.config.pt_to_px(self.config.body_pt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{make_filled_record, ResumeRecord};
    use crate::render::preview::build_preview;

    fn make_plan(record: &ResumeRecord) -> PaintPlan {
        lay_out(&build_preview(record), &default_page_config())
    }

    #[test]
    fn test_page_dimensions_follow_dpi() {
        let config = default_page_config();
        // 210mm at 150dpi = 1240px, 297mm = 1754px.
        assert_eq!(config.page_width_px(), 1240);
        assert_eq!(config.page_height_px(), 1754);
    }

    #[test]
    fn test_name_is_first_and_centered() {
        let plan = make_plan(&make_filled_record());
        let name = &plan.lines[0];
        assert_eq!(name.text, "Jane Doe");
        assert_eq!(name.style, LineStyle::Name);
        let page_w = plan.width_px as f32;
        let center_offset = name.x - (page_w / 2.0);
        assert!(
            center_offset < 0.0 && name.x > 0.0,
            "name should start left of center, inside the page"
        );
    }

    #[test]
    fn test_every_section_heading_has_a_rule() {
        let plan = make_plan(&make_filled_record());
        let headings = plan
            .lines
            .iter()
            .filter(|l| l.style == LineStyle::SectionHeading)
            .count();
        // 4 narrow + 3 wide sections.
        assert_eq!(headings, 7);
        assert_eq!(plan.rules.len(), 7);
    }

    #[test]
    fn test_columns_do_not_overlap() {
        let config = default_page_config();
        let plan = make_plan(&make_filled_record());
        let margin = config.mm_to_px(config.margin_mm);
        let content_w = plan.width_px as f32 - 2.0 * margin;
        let gap = config.mm_to_px(config.column_gap_mm);
        let narrow_right = margin + (content_w - gap) / 3.0;

        // Wide-column content all starts right of the narrow column.
        let education = plan
            .lines
            .iter()
            .find(|l| l.text == "Education")
            .expect("education heading");
        assert!(education.x > narrow_right);

        // Narrow-column content stays inside its band.
        let objectives = plan
            .lines
            .iter()
            .find(|l| l.text == "Career Objectives")
            .expect("objectives heading");
        assert!(objectives.x + 1.0 >= margin && objectives.x < narrow_right);
    }

    #[test]
    fn test_empty_record_still_places_empty_slots() {
        let plan = make_plan(&ResumeRecord::new());
        // The empty hobby/responsibility/achievement entries place bullet
        // lines with empty text: slots, not omissions.
        let empty_bullets = plan
            .lines
            .iter()
            .filter(|l| l.bullet && l.text.is_empty())
            .count();
        assert!(empty_bullets >= 3, "expected empty bullet slots, got {empty_bullets}");
    }

    #[test]
    fn test_lines_advance_monotonically_within_a_column() {
        let plan = make_plan(&make_filled_record());
        let margin = default_page_config().mm_to_px(default_page_config().margin_mm);
        let mut last_top = f32::MIN;
        for line in plan.lines.iter().filter(|l| (l.x - margin).abs() < 1.0) {
            assert!(line.top > last_top, "column lines must move down the page");
            last_top = line.top;
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let record = make_filled_record();
        let a = make_plan(&record);
        let b = make_plan(&record);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}
