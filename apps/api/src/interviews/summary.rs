//! AI assistance for interviews: note summarization and question generation.
//!
//! Question generation degrades to a fixed question set when the generator is
//! unavailable or returns nothing usable — preparing an interview should never
//! be blocked by a model outage.

use tracing::warn;

use crate::interviews::prompts::{
    QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM, SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM,
};
use crate::llm_client::{LlmClient, LlmError};

/// Shown to recruiters when question generation fails.
const FALLBACK_QUESTIONS: [&str; 5] = [
    "Tell me about your background and experience.",
    "What interests you about this role?",
    "Describe a challenging project you worked on.",
    "How do you handle working under pressure?",
    "What are your career goals?",
];

/// Summarizes free-form interview notes into a scannable digest.
pub async fn generate_interview_summary(
    llm: &LlmClient,
    notes: &str,
) -> Result<String, LlmError> {
    let prompt = SUMMARY_PROMPT_TEMPLATE.replace("{notes}", notes);
    llm.generate_text(&prompt, SUMMARY_SYSTEM).await
}

/// Generates tailored interview questions, falling back to the generic set
/// when the generator fails or its output has no parsable questions.
pub async fn generate_interview_questions(
    llm: &LlmClient,
    job_title: &str,
    candidate_background: &str,
) -> Vec<String> {
    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{job_title}", job_title)
        .replace("{candidate_background}", candidate_background);

    match llm.generate_text(&prompt, QUESTIONS_SYSTEM).await {
        Ok(text) => {
            let questions = parse_numbered_list(&text);
            if questions.is_empty() {
                warn!("Question generation returned no numbered lines; using fallback set");
                fallback_questions()
            } else {
                questions
            }
        }
        Err(e) => {
            warn!("Question generation failed: {e}; using fallback set");
            fallback_questions()
        }
    }
}

fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Extracts `N. text` entries from a numbered list, dropping everything else.
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| strip_number_prefix(line.trim()))
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_number_prefix(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None; // no leading digits
    }
    rest.strip_prefix('.').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_list_extracts_questions() {
        let text = "Here are your questions:\n\
                    1. Tell me about Go.\n\
                    2. How do you test services?\n\
                    \n\
                    10. Where do you see yourself in five years?";
        let questions = parse_numbered_list(text);
        assert_eq!(
            questions,
            vec![
                "Tell me about Go.",
                "How do you test services?",
                "Where do you see yourself in five years?"
            ]
        );
    }

    #[test]
    fn test_parse_numbered_list_ignores_unnumbered_lines() {
        let text = "Intro line\n- bullet\nQuestion without number?";
        assert!(parse_numbered_list(text).is_empty());
    }

    #[test]
    fn test_parse_numbered_list_requires_dot_after_number() {
        let text = "1) Paren style\n2. Dot style";
        assert_eq!(parse_numbered_list(text), vec!["Dot style"]);
    }

    #[test]
    fn test_parse_numbered_list_drops_empty_entries() {
        let text = "1.\n2. Real question";
        assert_eq!(parse_numbered_list(text), vec!["Real question"]);
    }

    #[test]
    fn test_fallback_questions_are_nonempty() {
        let questions = fallback_questions();
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| !q.is_empty()));
    }
}
