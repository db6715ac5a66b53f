//! Presentation Store — per-record CRUD plus the draft → sent → viewed
//! lifecycle.
//!
//! Every mutation compare-and-swaps on the row's `version`; a lost race is a
//! conflict, never a silent last-write-wins. Reads surface database failures
//! as errors — an unreadable store is never treated as an empty collection.

use anyhow::anyhow;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::presentation::{PresentationContent, PresentationRow, PresentationStatus};

/// Fields of a freshly generated presentation. Status always starts at draft.
#[derive(Debug, Clone)]
pub struct NewPresentation {
    pub user_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub title: String,
    pub content: PresentationContent,
}

/// Extra fields recorded alongside a status change.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    pub client_email: Option<String>,
    pub document_url: Option<String>,
}

/// The lifecycle law: forward one step at a time, plus self-transitions for
/// idempotent re-application. Nothing ever moves backward.
pub fn transition_allowed(from: PresentationStatus, to: PresentationStatus) -> bool {
    use PresentationStatus::{Draft, Sent, Viewed};
    from == to || matches!((from, to), (Draft, Sent) | (Sent, Viewed))
}

pub async fn insert_presentation(
    pool: &PgPool,
    new: NewPresentation,
) -> Result<PresentationRow, AppError> {
    let row = sqlx::query_as::<_, PresentationRow>(
        r#"
        INSERT INTO presentations (id, user_id, candidate_id, job_id, title, content, status, version)
        VALUES ($1, $2, $3, $4, $5, $6, 'draft', 1)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.candidate_id)
    .bind(new.job_id)
    .bind(&new.title)
    .bind(Json(&new.content))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_presentation(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PresentationRow>, AppError> {
    let row = sqlx::query_as::<_, PresentationRow>("SELECT * FROM presentations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insertion-ordered listing for one user.
pub async fn list_presentations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PresentationRow>, AppError> {
    let rows = sqlx::query_as::<_, PresentationRow>(
        "SELECT * FROM presentations WHERE user_id = $1 ORDER BY created_at, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_by_candidate(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<PresentationRow>, AppError> {
    let rows = sqlx::query_as::<_, PresentationRow>(
        "SELECT * FROM presentations WHERE candidate_id = $1 ORDER BY created_at, id",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Applies a lifecycle transition.
///
/// Marking `sent` requires a client email (from the update or already on the
/// row) and stamps `sent_at`; marking `viewed` stamps `viewed_at` once.
/// Self-transitions to `sent` re-stamp `sent_at` (a re-send is a real event);
/// other self-transitions are no-ops.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    new_status: PresentationStatus,
    update: StatusUpdate,
) -> Result<PresentationRow, AppError> {
    let current = get_presentation(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Presentation {id} not found")))?;

    let from = PresentationStatus::parse(&current.status).ok_or_else(|| {
        AppError::Internal(anyhow!(
            "presentation {id} has invalid stored status '{}'",
            current.status
        ))
    })?;

    if !transition_allowed(from, new_status) {
        return Err(AppError::Conflict(format!(
            "Cannot transition presentation from '{}' to '{}'",
            from.as_str(),
            new_status.as_str()
        )));
    }

    match new_status {
        PresentationStatus::Draft => Ok(current),
        PresentationStatus::Sent => {
            let client_email = update
                .client_email
                .or_else(|| current.client_email.clone())
                .ok_or_else(|| {
                    AppError::Validation(
                        "client_email is required to mark a presentation sent".to_string(),
                    )
                })?;

            sqlx::query_as::<_, PresentationRow>(
                r#"
                UPDATE presentations
                SET status = 'sent',
                    client_email = $3,
                    document_url = COALESCE($4, document_url),
                    sent_at = now(),
                    updated_at = now(),
                    version = version + 1
                WHERE id = $1 AND version = $2
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(current.version)
            .bind(client_email)
            .bind(update.document_url)
            .fetch_optional(pool)
            .await?
            .ok_or_else(concurrent_update)
        }
        PresentationStatus::Viewed => {
            if from == PresentationStatus::Viewed {
                return Ok(current);
            }
            sqlx::query_as::<_, PresentationRow>(
                r#"
                UPDATE presentations
                SET status = 'viewed',
                    viewed_at = now(),
                    updated_at = now(),
                    version = version + 1
                WHERE id = $1 AND version = $2
                RETURNING *
                "#,
            )
            .bind(id)
            .bind(current.version)
            .fetch_optional(pool)
            .await?
            .ok_or_else(concurrent_update)
        }
    }
}

fn concurrent_update() -> AppError {
    AppError::Conflict("Presentation was modified concurrently; retry the operation".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use PresentationStatus::{Draft, Sent, Viewed};

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(transition_allowed(Draft, Sent));
        assert!(transition_allowed(Sent, Viewed));
    }

    #[test]
    fn test_self_transitions_allowed() {
        assert!(transition_allowed(Draft, Draft));
        assert!(transition_allowed(Sent, Sent));
        assert!(transition_allowed(Viewed, Viewed));
    }

    #[test]
    fn test_skipping_a_stage_rejected() {
        assert!(!transition_allowed(Draft, Viewed));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!transition_allowed(Sent, Draft));
        assert!(!transition_allowed(Viewed, Sent));
        assert!(!transition_allowed(Viewed, Draft));
    }
}
