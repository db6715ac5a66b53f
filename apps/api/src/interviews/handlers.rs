//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interviews::store::{self, InterviewUpdate, NewInterview};
use crate::interviews::summary::{generate_interview_questions, generate_interview_summary};
use crate::models::interview::{InterviewRow, InterviewStatus, InterviewType};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub user_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub interviewer_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub interview_type: String,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub recording_url: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInterviewRequest {
    pub interviewer_name: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub interview_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub recording_url: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub job_title: String,
    pub candidate_background: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

fn validate_interview_type(t: &str) -> Result<(), AppError> {
    InterviewType::parse(t)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Unknown interview type '{t}'")))
}

fn validate_interview_status(s: &str) -> Result<(), AppError> {
    InterviewStatus::parse(s)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Unknown interview status '{s}'")))
}

fn validate_score(score: Option<i32>) -> Result<(), AppError> {
    match score {
        Some(s) if !(1..=10).contains(&s) => Err(AppError::Validation(
            "score must be between 1 and 10".to_string(),
        )),
        _ => Ok(()),
    }
}

/// POST /api/v1/interviews
pub async fn handle_create(
    State(state): State<AppState>,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<Json<InterviewRow>, AppError> {
    if request.interviewer_name.trim().is_empty() {
        return Err(AppError::Validation(
            "interviewer_name cannot be empty".to_string(),
        ));
    }
    validate_interview_type(&request.interview_type)?;
    validate_score(request.score)?;
    let status = request
        .status
        .unwrap_or_else(|| InterviewStatus::Scheduled.as_str().to_string());
    validate_interview_status(&status)?;

    let interview = store::insert_interview(
        &state.db,
        NewInterview {
            user_id: request.user_id,
            candidate_id: request.candidate_id,
            job_id: request.job_id,
            interviewer_name: request.interviewer_name,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            interview_type: request.interview_type,
            status,
            notes: request.notes,
            recording_url: request.recording_url,
            score: request.score,
        },
    )
    .await?;
    Ok(Json(interview))
}

/// GET /api/v1/interviews
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let interviews = store::list_interviews(&state.db, params.user_id).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    let interview = store::get_interview(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    Ok(Json(interview))
}

/// GET /api/v1/candidates/:id/interviews
pub async fn handle_list_by_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let interviews = store::list_by_candidate(&state.db, candidate_id).await?;
    Ok(Json(interviews))
}

/// PATCH /api/v1/interviews/:id
///
/// When fresh notes arrive, an AI summary is generated alongside the update.
/// Summarization is best-effort: a generator failure logs a warning and the
/// notes are stored without a summary.
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInterviewRequest>,
) -> Result<Json<InterviewRow>, AppError> {
    if let Some(t) = &request.interview_type {
        validate_interview_type(t)?;
    }
    if let Some(s) = &request.status {
        validate_interview_status(s)?;
    }
    validate_score(request.score)?;

    let ai_summary = match request.notes.as_deref() {
        Some(notes) if !notes.trim().is_empty() => {
            match generate_interview_summary(&state.llm, notes).await {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!("Interview summary generation failed for {id}: {e}");
                    None
                }
            }
        }
        _ => None,
    };

    let interview = store::update_interview(
        &state.db,
        id,
        InterviewUpdate {
            interviewer_name: request.interviewer_name,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            interview_type: request.interview_type,
            status: request.status,
            notes: request.notes,
            ai_summary,
            recording_url: request.recording_url,
            score: request.score,
        },
    )
    .await?;
    Ok(Json(interview))
}

/// POST /api/v1/interviews/questions
///
/// Returns tailored interview questions; degrades to the generic question set
/// when the generator is unavailable.
pub async fn handle_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "job_title cannot be empty".to_string(),
        ));
    }

    let questions = generate_interview_questions(
        &state.llm,
        &request.job_title,
        &request.candidate_background,
    )
    .await;
    Ok(Json(QuestionsResponse { questions }))
}
