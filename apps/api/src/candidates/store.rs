//! Candidate store — per-record CRUD over sourced candidate profiles.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub current_position: Option<String>,
    pub current_company: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub salary_expectation: Option<i64>,
    pub status: String,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
}

/// Partial update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct CandidateUpdate {
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

pub async fn insert_candidate(
    pool: &PgPool,
    new: NewCandidate,
) -> Result<CandidateRow, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (id, user_id, name, email, phone, linkedin_url, current_position,
             current_company, location, skills, experience_years,
             salary_expectation, status, notes, resume_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.linkedin_url)
    .bind(&new.current_position)
    .bind(&new.current_company)
    .bind(&new.location)
    .bind(&new.skills)
    .bind(new.experience_years)
    .bind(new.salary_expectation)
    .bind(&new.status)
    .bind(&new.notes)
    .bind(&new.resume_url)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_candidate(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<CandidateRow>, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_candidates(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CandidateRow>, AppError> {
    let rows = sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update_candidate(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    update: CandidateUpdate,
) -> Result<CandidateRow, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates
        SET name = COALESCE($3, name),
            email = COALESCE($4, email),
            phone = COALESCE($5, phone),
            linkedin_url = COALESCE($6, linkedin_url),
            current_position = COALESCE($7, current_position),
            current_company = COALESCE($8, current_company),
            location = COALESCE($9, location),
            skills = COALESCE($10, skills),
            experience_years = COALESCE($11, experience_years),
            salary_expectation = COALESCE($12, salary_expectation),
            status = COALESCE($13, status),
            notes = COALESCE($14, notes),
            resume_url = COALESCE($15, resume_url),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.phone)
    .bind(&update.linkedin_url)
    .bind(&update.current_position)
    .bind(&update.current_company)
    .bind(&update.location)
    .bind(&update.skills)
    .bind(update.experience_years)
    .bind(update.salary_expectation)
    .bind(&update.status)
    .bind(&update.notes)
    .bind(&update.resume_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    Ok(row)
}
