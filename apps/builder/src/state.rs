use std::sync::Arc;

use crate::config::Config;
use crate::export::rasterize::Rasterizer;
use crate::render::layout::PageConfig;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// All live resume-builder sessions. In-memory only; gone on shutdown.
    pub sessions: SessionStore,
    /// Pluggable rasterizer, picked at startup from RASTER_BACKEND/FONT_PATH.
    pub rasterizer: Arc<dyn Rasterizer>,
    /// A4 raster geometry and type sizes for the layout pass.
    pub page_config: PageConfig,
    pub config: Config,
}
