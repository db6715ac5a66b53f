//! Axum route handlers for the Candidate API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::candidates::store::{self, CandidateUpdate, NewCandidate};
use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, CandidateStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub salary_expectation: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCandidateRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub salary_expectation: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
}

fn validate_status(status: &str) -> Result<(), AppError> {
    CandidateStatus::parse(status)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Unknown candidate status '{status}'")))
}

/// POST /api/v1/candidates
pub async fn handle_create(
    State(state): State<AppState>,
    Json(request): Json<CreateCandidateRequest>,
) -> Result<Json<CandidateRow>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let status = request
        .status
        .unwrap_or_else(|| CandidateStatus::Sourced.as_str().to_string());
    validate_status(&status)?;

    let candidate = store::insert_candidate(
        &state.db,
        NewCandidate {
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            linkedin_url: request.linkedin_url,
            current_position: request.current_position,
            current_company: request.current_company,
            location: request.location,
            skills: request.skills,
            experience_years: request.experience_years,
            salary_expectation: request.salary_expectation,
            status,
            notes: request.notes,
            resume_url: request.resume_url,
        },
    )
    .await?;
    Ok(Json(candidate))
}

/// GET /api/v1/candidates
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let candidates = store::list_candidates(&state.db, params.user_id).await?;
    Ok(Json(candidates))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = store::get_candidate(&state.db, params.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

/// PATCH /api/v1/candidates/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCandidateRequest>,
) -> Result<Json<CandidateRow>, AppError> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
    }
    if let Some(status) = &request.status {
        validate_status(status)?;
    }

    let candidate = store::update_candidate(
        &state.db,
        request.user_id,
        id,
        CandidateUpdate {
            name: request.name,
            email: request.email,
            phone: request.phone,
            linkedin_url: request.linkedin_url,
            current_position: request.current_position,
            current_company: request.current_company,
            location: request.location,
            skills: request.skills,
            experience_years: request.experience_years,
            salary_expectation: request.salary_expectation,
            status: request.status,
            notes: request.notes,
            resume_url: request.resume_url,
        },
    )
    .await?;
    Ok(Json(candidate))
}
