// Render/Export adapter: paint plan → bitmap → single-page PDF artifact.
// Rasterization is pluggable behind the Rasterizer trait; encoding is printpdf.

pub mod handlers;
pub mod pdf;
pub mod rasterize;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::pdf::{encode_pdf, PageSpec};
use crate::render::layout::lay_out;
use crate::render::preview::build_preview;
use crate::state::AppState;

/// Runs the full export pipeline for one session and returns the PDF bytes.
///
/// The session's `exporting` flag is held by a guard for the duration and
/// released on drop, so a rasterizer or encoder failure can never leave the
/// download control stuck hidden. Re-entrant exports and exports of an
/// unsubmitted session are refused up front by `begin_export`.
pub async fn export_session(state: &AppState, id: Uuid) -> Result<Vec<u8>, AppError> {
    let _guard = state.sessions.begin_export(id)?;
    let record = state.sessions.get(id)?.record;

    let plan = lay_out(&build_preview(&record), &state.page_config);
    let bitmap = state.rasterizer.rasterize(&plan).await?;

    let spec = PageSpec::default();
    let bytes = tokio::task::spawn_blocking(move || encode_pdf(bitmap, spec))
        .await
        .map_err(|e| AppError::Pdf(format!("encoder task failed: {e}")))??;

    info!(session = %id, bytes = bytes.len(), "exported resume PDF");
    Ok(bytes)
}
