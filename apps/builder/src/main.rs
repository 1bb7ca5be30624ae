mod config;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RasterBackend};
use crate::export::rasterize::{GlyphRasterizer, GreekedRasterizer, Rasterizer};
use crate::render::layout::default_page_config;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    // Pick the rasterizer backend: real glyphs by default (bundled face,
    // or FONT_PATH when set), greeked bars on request.
    let rasterizer: Arc<dyn Rasterizer> = match (config.raster_backend, &config.font_path) {
        (RasterBackend::Greeked, _) => {
            info!("Rasterizer: greeked backend");
            Arc::new(GreekedRasterizer)
        }
        (RasterBackend::Glyph, Some(path)) => {
            info!("Rasterizer: glyph backend ({path})");
            Arc::new(GlyphRasterizer::from_path(Path::new(path))?)
        }
        (RasterBackend::Glyph, None) => {
            info!("Rasterizer: glyph backend (bundled DejaVu Sans)");
            Arc::new(GlyphRasterizer::bundled()?)
        }
    };

    let mut page_config = default_page_config();
    page_config.dpi = config.raster_dpi;
    info!(
        "Layout page config: A4 portrait at {} DPI ({}x{} px)",
        page_config.dpi,
        page_config.page_width_px(),
        page_config.page_height_px()
    );

    let state = AppState {
        sessions: SessionStore::new(),
        rasterizer,
        page_config,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
