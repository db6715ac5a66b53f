//! Axum route handlers for the Presentation API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::presentation::{PresentationRow, PresentationStatus};
use crate::presentations::generator::{generate_presentation, GeneratePresentationRequest};
use crate::presentations::send::send_presentation;
use crate::presentations::store;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub client_email: String,
}

/// POST /api/v1/presentations/generate
///
/// Full generation pipeline: candidate load → prompt → narrative generation →
/// normalize → persist as draft. Always yields complete content — a malformed
/// generator response degrades field-by-field, never fails the request.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GeneratePresentationRequest>,
) -> Result<Json<PresentationRow>, AppError> {
    let presentation = generate_presentation(&state.db, &state.llm, request).await?;
    Ok(Json(presentation))
}

/// GET /api/v1/presentations
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PresentationRow>>, AppError> {
    let presentations = store::list_presentations(&state.db, params.user_id).await?;
    Ok(Json(presentations))
}

/// GET /api/v1/presentations/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PresentationRow>, AppError> {
    let presentation = store::get_presentation(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Presentation {id} not found")))?;
    Ok(Json(presentation))
}

/// GET /api/v1/candidates/:id/presentations
pub async fn handle_list_by_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Vec<PresentationRow>>, AppError> {
    let presentations = store::list_by_candidate(&state.db, candidate_id).await?;
    Ok(Json(presentations))
}

/// POST /api/v1/presentations/:id/send
///
/// Single delivery attempt. On dispatch failure the presentation keeps its
/// prior status and the cause is returned; re-sending an already-sent
/// presentation succeeds and re-stamps sent_at.
pub async fn handle_send(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendRequest>,
) -> Result<Json<PresentationRow>, AppError> {
    let client_email = request.client_email.trim();
    if client_email.is_empty() || !client_email.contains('@') {
        return Err(AppError::Validation(
            "client_email must be a valid email address".to_string(),
        ));
    }

    let presentation = send_presentation(
        &state.db,
        &state.s3,
        &state.config,
        state.mailer.as_ref(),
        id,
        client_email,
    )
    .await?;
    Ok(Json(presentation))
}

/// POST /api/v1/presentations/:id/viewed
///
/// Read-receipt signal from the delivery channel: marks a sent presentation
/// viewed. Repeated signals are idempotent.
pub async fn handle_mark_viewed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PresentationRow>, AppError> {
    let presentation = store::update_status(
        &state.db,
        id,
        PresentationStatus::Viewed,
        Default::default(),
    )
    .await?;
    Ok(Json(presentation))
}
