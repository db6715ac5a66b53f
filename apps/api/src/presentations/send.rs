//! Send pipeline — single-attempt delivery of a rendered presentation.
//!
//! Flow: load → render → archive → dispatch → mark sent.
//!
//! Dispatch failure leaves the presentation in its prior status and surfaces
//! the cause; there is no retry at this layer. Archiving the rendered document
//! is best-effort — a failed upload is logged and the send continues without
//! a document URL.

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::mailer::{Mailer, OutboundEmail};
use crate::models::presentation::{PresentationRow, PresentationStatus};
use crate::presentations::render::render_presentation;
use crate::presentations::store::{self, StatusUpdate};
use crate::storage;

pub async fn send_presentation(
    pool: &PgPool,
    s3: &S3Client,
    config: &Config,
    mailer: &dyn Mailer,
    presentation_id: Uuid,
    client_email: &str,
) -> Result<PresentationRow, AppError> {
    let presentation = store::get_presentation(pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Presentation {presentation_id} not found")))?;

    // Reject before rendering or dispatching anything the lifecycle forbids.
    let from = PresentationStatus::parse(&presentation.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "presentation {presentation_id} has invalid stored status '{}'",
            presentation.status
        ))
    })?;
    if !store::transition_allowed(from, PresentationStatus::Sent) {
        return Err(AppError::Conflict(format!(
            "Cannot send a presentation in status '{}'",
            from.as_str()
        )));
    }

    let html = render_presentation(&presentation.title, &presentation.content.0);

    let document_url = match storage::archive_document(s3, config, presentation.id, &html).await {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Archiving rendered document for {presentation_id} failed: {e}");
            None
        }
    };

    let email = OutboundEmail {
        to: client_email.to_string(),
        subject: email_subject(&presentation.content.0.candidate_name),
        html_body: html,
        text_body: email_text_body(&presentation.content.0.candidate_name),
    };

    mailer
        .send(&email)
        .await
        .map_err(|e| AppError::Mail(format!("Presentation dispatch failed: {e}")))?;

    let updated = store::update_status(
        pool,
        presentation_id,
        PresentationStatus::Sent,
        StatusUpdate {
            client_email: Some(client_email.to_string()),
            document_url,
        },
    )
    .await?;

    info!("Presentation {presentation_id} sent to {client_email}");
    Ok(updated)
}

fn email_subject(candidate_name: &str) -> String {
    format!("Candidate Presentation: {candidate_name}")
}

fn email_text_body(candidate_name: &str) -> String {
    format!("Please find the candidate presentation for {candidate_name} attached.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_subject_names_the_candidate() {
        assert_eq!(
            email_subject("Ana Lee"),
            "Candidate Presentation: Ana Lee"
        );
    }

    #[test]
    fn test_email_text_body_names_the_candidate() {
        assert_eq!(
            email_text_body("Ana Lee"),
            "Please find the candidate presentation for Ana Lee attached."
        );
    }
}
