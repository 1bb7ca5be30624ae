use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::html::{form_page, preview_page};
use crate::render::preview::build_preview;
use crate::session::ops::{self, FieldPath, Section};
use crate::session::store::Phase;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub phase: Phase,
    pub exporting: bool,
    pub record: ResumeRecord,
}

fn session_response(session: crate::session::store::Session) -> SessionResponse {
    SessionResponse {
        id: session.id,
        phase: session.phase,
        exporting: session.exporting,
        record: session.record,
    }
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.sessions.create();
    tracing::info!(session = %session.id, "session created");
    (StatusCode::CREATED, Json(session_response(session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(session_response(state.sessions.get(id)?)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_dispose_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id)?;
    tracing::info!(session = %id, "session disposed");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UpdateFieldRequest {
    pub path: FieldPath,
    pub value: String,
}

/// PATCH /api/v1/sessions/:id/field
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<StatusCode, AppError> {
    state.sessions.with_session(id, |session| {
        session.ensure_editable()?;
        ops::update_field(&mut session.record, req.path, req.value)
    })?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct AppendEntryRequest {
    pub section: Section,
}

/// POST /api/v1/sessions/:id/entries
pub async fn handle_append_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AppendEntryRequest>,
) -> Result<StatusCode, AppError> {
    state.sessions.with_session(id, |session| {
        session.ensure_editable()?;
        ops::append_entry(&mut session.record, req.section);
        Ok(())
    })?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/skills/:index/subheadings
pub async fn handle_append_sub_heading(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<StatusCode, AppError> {
    state.sessions.with_session(id, |session| {
        session.ensure_editable()?;
        ops::append_sub_heading(&mut session.record, index)
    })?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.with_session(id, |session| {
        session.submit()?;
        Ok(session.clone())
    })?;
    tracing::info!(session = %id, "session submitted, record frozen");
    Ok(Json(session_response(session)))
}

/// GET /api/v1/sessions/:id/page
///
/// The conditional view swap: the edit form while Editing, the read-only
/// preview once Previewing.
pub async fn handle_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.get(id)?;
    let html = match session.phase {
        Phase::Editing => form_page(session.id, &session.record),
        Phase::Previewing => preview_page(
            session.id,
            &build_preview(&session.record),
            session.exporting,
        ),
    };
    Ok(Html(html))
}
