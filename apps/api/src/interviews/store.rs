//! Interview store — per-record CRUD over interview records.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::InterviewRow;

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub user_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub interviewer_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub interview_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub recording_url: Option<String>,
    pub score: Option<i32>,
}

/// Partial update. Absent fields keep their stored values. `ai_summary` is set
/// by the caller when fresh notes were summarized.
#[derive(Debug, Clone, Default)]
pub struct InterviewUpdate {
    pub interviewer_name: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub interview_type: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub ai_summary: Option<String>,
    pub recording_url: Option<String>,
    pub score: Option<i32>,
}

pub async fn insert_interview(
    pool: &PgPool,
    new: NewInterview,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews
            (id, user_id, candidate_id, job_id, interviewer_name, scheduled_at,
             duration_minutes, interview_type, status, notes, recording_url, score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.candidate_id)
    .bind(new.job_id)
    .bind(&new.interviewer_name)
    .bind(new.scheduled_at)
    .bind(new.duration_minutes)
    .bind(&new.interview_type)
    .bind(&new.status)
    .bind(&new.notes)
    .bind(&new.recording_url)
    .bind(new.score)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_interview(pool: &PgPool, id: Uuid) -> Result<Option<InterviewRow>, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_interviews(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<InterviewRow>, AppError> {
    let rows = sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 ORDER BY scheduled_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_by_candidate(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<InterviewRow>, AppError> {
    let rows = sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE candidate_id = $1 ORDER BY scheduled_at, id",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update_interview(
    pool: &PgPool,
    id: Uuid,
    update: InterviewUpdate,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        UPDATE interviews
        SET interviewer_name = COALESCE($2, interviewer_name),
            scheduled_at = COALESCE($3, scheduled_at),
            duration_minutes = COALESCE($4, duration_minutes),
            interview_type = COALESCE($5, interview_type),
            status = COALESCE($6, status),
            notes = COALESCE($7, notes),
            ai_summary = COALESCE($8, ai_summary),
            recording_url = COALESCE($9, recording_url),
            score = COALESCE($10, score),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.interviewer_name)
    .bind(update.scheduled_at)
    .bind(update.duration_minutes)
    .bind(&update.interview_type)
    .bind(&update.status)
    .bind(&update.notes)
    .bind(&update.ai_summary)
    .bind(&update.recording_url)
    .bind(update.score)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    Ok(row)
}
