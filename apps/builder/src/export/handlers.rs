use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::pdf::ARTIFACT_FILE_NAME;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/export
///
/// Responds with the PDF artifact as a browser download named `resume.pdf`.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let bytes = crate::export::export_session(&state, id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ARTIFACT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
