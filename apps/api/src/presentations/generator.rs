//! Presentation generation — orchestrates the pipeline.
//!
//! Flow: load candidate → prompt assembly → narrative generation →
//!       normalize → persist as draft.
//!
//! Malformed generator output never fails the operation (the normalizer fills
//! every gap); only a transport-level generator failure surfaces as an error.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::candidate::CandidateRow;
use crate::models::presentation::PresentationRow;
use crate::presentations::normalize::{self, format_currency};
use crate::presentations::prompts::{PRESENTATION_PROMPT_TEMPLATE, PRESENTATION_SYSTEM};
use crate::presentations::store::{self, NewPresentation};

/// Request body for presentation generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePresentationRequest {
    pub user_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
}

/// Runs the generation pipeline and persists the result as a draft.
pub async fn generate_presentation(
    pool: &PgPool,
    llm: &LlmClient,
    request: GeneratePresentationRequest,
) -> Result<PresentationRow, AppError> {
    let candidate = candidates::store::get_candidate(pool, request.user_id, request.candidate_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", request.candidate_id))
        })?;

    let prompt = build_generation_prompt(
        &candidate,
        request.job_title.as_deref(),
        request.job_description.as_deref(),
    );
    let system = format!("{PRESENTATION_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    let raw_text = llm
        .generate_text(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Presentation generation failed: {e}")))?;

    let raw = normalize::parse_raw_content(&raw_text);
    if raw.is_empty() {
        warn!(
            "Generator output unusable for candidate {}; falling back to profile-derived content",
            candidate.id
        );
    }
    let content = normalize::normalize(&candidate, &raw);
    let title = normalize::presentation_title(&candidate.name, request.job_title.as_deref());

    let presentation = store::insert_presentation(
        pool,
        NewPresentation {
            user_id: request.user_id,
            candidate_id: candidate.id,
            job_id: request.job_id,
            title,
            content,
        },
    )
    .await?;

    info!(
        "Generated presentation {} for candidate {} (user {})",
        presentation.id, candidate.id, request.user_id
    );

    Ok(presentation)
}

/// Fills the generation prompt template with the candidate profile.
/// Optional profile fields render as the literal placeholders the template
/// promises the model.
fn build_generation_prompt(
    candidate: &CandidateRow,
    job_title: Option<&str>,
    job_description: Option<&str>,
) -> String {
    let mut role_block = String::new();
    if let Some(title) = job_title {
        role_block.push_str(&format!("Target Role: {title}\n"));
    }
    if let Some(description) = job_description {
        role_block.push_str(&format!("Job Description: {description}\n"));
    }
    if !role_block.is_empty() {
        role_block.push('\n');
    }

    PRESENTATION_PROMPT_TEMPLATE
        .replace("{name}", &candidate.name)
        .replace(
            "{current_position}",
            candidate.current_position.as_deref().unwrap_or("Not specified"),
        )
        .replace(
            "{current_company}",
            candidate.current_company.as_deref().unwrap_or("Not specified"),
        )
        .replace(
            "{location}",
            candidate.location.as_deref().unwrap_or("Not specified"),
        )
        .replace("{skills}", &candidate.skills.join(", "))
        .replace(
            "{experience_years}",
            &candidate
                .experience_years
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Not specified".to_string()),
        )
        .replace(
            "{email}",
            candidate.email.as_deref().unwrap_or("Not provided"),
        )
        .replace(
            "{phone}",
            candidate.phone.as_deref().unwrap_or("Not provided"),
        )
        .replace(
            "{linkedin}",
            candidate.linkedin_url.as_deref().unwrap_or("Not provided"),
        )
        .replace(
            "{salary_expectation}",
            &candidate
                .salary_expectation
                .map(format_currency)
                .unwrap_or_else(|| "Not specified".to_string()),
        )
        .replace("{role_block}", &role_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate() -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ana Lee".to_string(),
            email: Some("ana@example.com".to_string()),
            phone: None,
            linkedin_url: None,
            current_position: Some("Backend Engineer".to_string()),
            current_company: Some("Acme".to_string()),
            location: None,
            skills: vec!["Go".to_string(), "SQL".to_string()],
            experience_years: Some(4),
            salary_expectation: Some(150_000),
            status: "sourced".to_string(),
            notes: None,
            resume_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_carries_profile_fields() {
        let prompt = build_generation_prompt(&candidate(), None, None);
        assert!(prompt.contains("- Name: Ana Lee"));
        assert!(prompt.contains("- Current Position: Backend Engineer"));
        assert!(prompt.contains("- Skills: Go, SQL"));
        assert!(prompt.contains("- Experience: 4 years"));
        assert!(prompt.contains("- Salary Expectation: $150,000"));
    }

    #[test]
    fn test_prompt_uses_placeholders_for_missing_fields() {
        let mut c = candidate();
        c.phone = None;
        c.location = None;
        c.salary_expectation = None;
        let prompt = build_generation_prompt(&c, None, None);
        assert!(prompt.contains("- Phone: Not provided"));
        assert!(prompt.contains("- Location: Not specified"));
        assert!(prompt.contains("- Salary Expectation: Not specified"));
    }

    #[test]
    fn test_prompt_role_block_only_when_given() {
        let prompt = build_generation_prompt(&candidate(), None, None);
        assert!(!prompt.contains("Target Role:"));
        assert!(!prompt.contains("Job Description:"));

        let prompt = build_generation_prompt(
            &candidate(),
            Some("Staff Engineer"),
            Some("Own the platform."),
        );
        assert!(prompt.contains("Target Role: Staff Engineer"));
        assert!(prompt.contains("Job Description: Own the platform."));
    }

    #[test]
    fn test_prompt_has_no_unfilled_placeholders() {
        let prompt = build_generation_prompt(&candidate(), Some("Staff Engineer"), None);
        for placeholder in [
            "{name}",
            "{current_position}",
            "{current_company}",
            "{location}",
            "{skills}",
            "{experience_years}",
            "{email}",
            "{phone}",
            "{linkedin}",
            "{salary_expectation}",
            "{role_block}",
        ] {
            assert!(
                !prompt.contains(placeholder),
                "placeholder {placeholder} left unfilled"
            );
        }
        // the JSON schema example's braces must survive the replacements
        assert!(prompt.contains("\"summary\""));
    }
}
