//! Content Normalizer — guarantees a complete, schema-valid presentation
//! document regardless of generator output quality.
//!
//! The generator's response is untrusted: it may be non-JSON, the wrong shape,
//! or missing fields. Every top-level field is recovered independently with a
//! deterministic fallback; a malformed response degrades field-by-field and
//! never fails the whole operation. `candidate_name` and `contact_info` are
//! always derived from the candidate record, never from the model.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::candidate::CandidateRow;
use crate::models::presentation::{
    ContactInfo, EducationItem, ExperienceItem, PresentationContent, SkillCategory, SkillLevel,
};

pub const EMAIL_PLACEHOLDER: &str = "Email not provided";
pub const LOCATION_PLACEHOLDER: &str = "Location not specified";
const DEFAULT_TITLE_SUFFIX: &str = "Candidate Presentation";

const FALLBACK_EXPERIENCE_ACHIEVEMENTS: [&str; 2] = [
    "Delivered high-quality results",
    "Collaborated effectively with teams",
];
const FALLBACK_ACHIEVEMENTS: [&str; 2] = [
    "Proven track record of success",
    "Strong problem-solving abilities",
];
const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Strong technical skills",
    "Excellent communication",
    "Team player",
];
const FALLBACK_AVAILABILITY: &str = "Available for immediate start";

/// Parses raw generator output into a JSON object, tolerating markdown code
/// fences around the payload. Anything that is not a JSON object degrades to
/// an empty map — normalization then falls back on every field.
pub fn parse_raw_content(text: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!("Generator returned JSON {} instead of an object", kind(&other));
            Map::new()
        }
        Err(e) => {
            warn!("Generator returned unparsable content: {e}");
            Map::new()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Builds the presentation title: `"{name} - {job title}"`, with a generic
/// suffix when no target role was given.
pub fn presentation_title(candidate_name: &str, job_title: Option<&str>) -> String {
    format!(
        "{} - {}",
        candidate_name,
        job_title.unwrap_or(DEFAULT_TITLE_SUFFIX)
    )
}

/// Normalizes raw generator output into a complete `PresentationContent`.
///
/// Postcondition: every list-valued field (nested ones included) has at least
/// one entry, and contact email/location are never absent.
pub fn normalize(candidate: &CandidateRow, raw: &Map<String, Value>) -> PresentationContent {
    PresentationContent {
        candidate_name: candidate.name.clone(),
        summary: non_empty_string(raw, "summary").unwrap_or_else(|| fallback_summary(candidate)),
        experience: non_empty_list::<ExperienceItem>(raw, "experience")
            .map(repair_experience)
            .unwrap_or_else(|| fallback_experience(candidate)),
        skills: non_empty_list::<SkillCategory>(raw, "skills")
            .and_then(keep_populated_categories)
            .unwrap_or_else(|| fallback_skills(candidate)),
        achievements: non_empty_list::<String>(raw, "achievements")
            .unwrap_or_else(|| to_strings(&FALLBACK_ACHIEVEMENTS)),
        education: non_empty_list::<EducationItem>(raw, "education")
            .unwrap_or_else(fallback_education),
        recommendations: non_empty_list::<String>(raw, "recommendations")
            .unwrap_or_else(|| to_strings(&FALLBACK_RECOMMENDATIONS)),
        salary_expectation: candidate.salary_expectation.map(format_currency),
        availability: non_empty_string(raw, "availability")
            .unwrap_or_else(|| FALLBACK_AVAILABILITY.to_string()),
        contact_info: contact_info(candidate),
    }
}

/// Typed per-field extraction: absent, null, or wrong-shape values all read as
/// `None` so each field can fall back alone.
fn field<T: DeserializeOwned>(raw: &Map<String, Value>, key: &str) -> Option<T> {
    raw.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn non_empty_string(raw: &Map<String, Value>, key: &str) -> Option<String> {
    field::<String>(raw, key).filter(|s| !s.trim().is_empty())
}

fn non_empty_list<T: DeserializeOwned>(raw: &Map<String, Value>, key: &str) -> Option<Vec<T>> {
    field::<Vec<T>>(raw, key).filter(|list| !list.is_empty())
}

/// Generator experience entries may arrive with empty achievement lists;
/// repair those in place so the non-empty invariant holds at every level.
fn repair_experience(mut experience: Vec<ExperienceItem>) -> Vec<ExperienceItem> {
    for item in &mut experience {
        if item.achievements.is_empty() {
            item.achievements = to_strings(&FALLBACK_EXPERIENCE_ACHIEVEMENTS);
        }
    }
    experience
}

/// Drops skill categories with no skills. Returns None when nothing survives,
/// which triggers the full-field fallback.
fn keep_populated_categories(mut skills: Vec<SkillCategory>) -> Option<Vec<SkillCategory>> {
    skills.retain(|category| !category.skills.is_empty());
    if skills.is_empty() {
        None
    } else {
        Some(skills)
    }
}

fn fallback_summary(candidate: &CandidateRow) -> String {
    let position = candidate
        .current_position
        .as_deref()
        .unwrap_or("professional");
    let years = candidate
        .experience_years
        .map(|y| y.to_string())
        .unwrap_or_else(|| "several".to_string());
    let skills = candidate
        .skills
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Experienced {position} with {years} years of experience in {skills}.")
}

fn fallback_experience(candidate: &CandidateRow) -> Vec<ExperienceItem> {
    vec![ExperienceItem {
        title: candidate
            .current_position
            .clone()
            .unwrap_or_else(|| "Current Role".to_string()),
        company: candidate
            .current_company
            .clone()
            .unwrap_or_else(|| "Current Company".to_string()),
        duration: "Present".to_string(),
        description: "Professional experience in the field".to_string(),
        achievements: to_strings(&FALLBACK_EXPERIENCE_ACHIEVEMENTS),
    }]
}

fn fallback_skills(candidate: &CandidateRow) -> Vec<SkillCategory> {
    let skills = if candidate.skills.is_empty() {
        vec!["General professional skills".to_string()]
    } else {
        candidate.skills.clone()
    };
    vec![SkillCategory {
        category: "Core Skills".to_string(),
        skills,
        level: SkillLevel::Advanced,
    }]
}

fn fallback_education() -> Vec<EducationItem> {
    vec![EducationItem {
        degree: "Bachelor's Degree".to_string(),
        institution: "University".to_string(),
        year: "2020".to_string(),
        gpa: None,
    }]
}

fn contact_info(candidate: &CandidateRow) -> ContactInfo {
    ContactInfo {
        email: candidate
            .email
            .clone()
            .unwrap_or_else(|| EMAIL_PLACEHOLDER.to_string()),
        phone: candidate.phone.clone(),
        linkedin: candidate.linkedin_url.clone(),
        location: candidate
            .location
            .clone()
            .unwrap_or_else(|| LOCATION_PLACEHOLDER.to_string()),
    }
}

/// Formats a whole-dollar amount with thousands separators: 150000 → "$150,000".
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn candidate() -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ana Lee".to_string(),
            email: None,
            phone: None,
            linkedin_url: None,
            current_position: Some("Backend Engineer".to_string()),
            current_company: None,
            location: None,
            skills: vec!["Go".to_string(), "SQL".to_string()],
            experience_years: Some(4),
            salary_expectation: None,
            status: "sourced".to_string(),
            notes: None,
            resume_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_invariants(content: &PresentationContent) {
        assert!(!content.summary.is_empty());
        assert!(!content.experience.is_empty());
        assert!(!content.skills.is_empty());
        assert!(!content.achievements.is_empty());
        assert!(!content.education.is_empty());
        assert!(!content.recommendations.is_empty());
        assert!(!content.availability.is_empty());
        assert!(!content.contact_info.email.is_empty());
        assert!(!content.contact_info.location.is_empty());
        for item in &content.experience {
            assert!(!item.achievements.is_empty());
        }
        for category in &content.skills {
            assert!(!category.skills.is_empty());
        }
    }

    #[test]
    fn test_invalid_text_produces_full_fallback_content() {
        let raw = parse_raw_content("Sorry, I can't produce JSON today.");
        let content = normalize(&candidate(), &raw);

        assert_invariants(&content);
        assert_eq!(content.candidate_name, "Ana Lee");
        assert_eq!(
            content.summary,
            "Experienced Backend Engineer with 4 years of experience in Go, SQL."
        );
        assert_eq!(content.skills.len(), 1);
        assert_eq!(content.skills[0].category, "Core Skills");
        assert_eq!(content.skills[0].skills, vec!["Go", "SQL"]);
        assert_eq!(content.skills[0].level, SkillLevel::Advanced);
        assert_eq!(content.availability, FALLBACK_AVAILABILITY);
        assert_eq!(content.contact_info.email, EMAIL_PLACEHOLDER);
        assert_eq!(content.contact_info.location, LOCATION_PLACEHOLDER);
    }

    #[test]
    fn test_summary_fallback_uses_first_three_skills_only() {
        let mut c = candidate();
        c.skills = vec![
            "Go".to_string(),
            "SQL".to_string(),
            "Kubernetes".to_string(),
            "Terraform".to_string(),
        ];
        let content = normalize(&c, &Map::new());
        assert_eq!(
            content.summary,
            "Experienced Backend Engineer with 4 years of experience in Go, SQL, Kubernetes."
        );
    }

    #[test]
    fn test_summary_fallback_generic_position_and_years() {
        let mut c = candidate();
        c.current_position = None;
        c.experience_years = None;
        let content = normalize(&c, &Map::new());
        assert_eq!(
            content.summary,
            "Experienced professional with several years of experience in Go, SQL."
        );
    }

    #[test]
    fn test_each_field_falls_back_independently() {
        // summary parses; everything else is missing or malformed
        let raw = parse_raw_content(
            r#"{"summary": "A hand-written summary.", "experience": "not a list", "education": []}"#,
        );
        let content = normalize(&candidate(), &raw);

        assert_invariants(&content);
        assert_eq!(content.summary, "A hand-written summary.");
        assert_eq!(content.experience[0].duration, "Present");
        assert_eq!(content.education[0].degree, "Bachelor's Degree");
        assert_eq!(content.education[0].institution, "University");
        assert_eq!(content.education[0].year, "2020");
        assert_eq!(
            content.achievements,
            vec![
                "Proven track record of success",
                "Strong problem-solving abilities"
            ]
        );
        assert_eq!(
            content.recommendations,
            vec!["Strong technical skills", "Excellent communication", "Team player"]
        );
    }

    #[test]
    fn test_well_formed_generator_output_is_kept() {
        let raw = parse_raw_content(
            &json!({
                "summary": "Seasoned backend engineer.",
                "experience": [{
                    "title": "Staff Engineer",
                    "company": "Acme",
                    "duration": "2019 - Present",
                    "description": "Leads the platform team",
                    "achievements": ["Cut latency 40%"]
                }],
                "skills": [{"category": "Languages", "skills": ["Go"], "level": "Expert"}],
                "achievements": ["Promoted twice"],
                "education": [{"degree": "MSc", "institution": "TU Berlin", "year": "2015", "gpa": "3.9"}],
                "recommendations": ["Hire fast"],
                "availability": "2 weeks notice"
            })
            .to_string(),
        );
        let content = normalize(&candidate(), &raw);

        assert_invariants(&content);
        assert_eq!(content.summary, "Seasoned backend engineer.");
        assert_eq!(content.experience[0].title, "Staff Engineer");
        assert_eq!(content.skills[0].level, SkillLevel::Expert);
        assert_eq!(content.education[0].gpa.as_deref(), Some("3.9"));
        assert_eq!(content.availability, "2 weeks notice");
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let raw = parse_raw_content("```json\n{\"summary\": \"Fenced.\"}\n```");
        assert_eq!(raw.get("summary").and_then(Value::as_str), Some("Fenced."));
    }

    #[test]
    fn test_json_array_response_is_rejected_wholesale() {
        let raw = parse_raw_content(r#"[{"summary": "wrong shape"}]"#);
        assert!(raw.is_empty());
    }

    #[test]
    fn test_candidate_fields_always_win_over_model_output() {
        // A hostile/confused model response tries to override derived fields.
        let raw = parse_raw_content(
            r#"{"candidateName": "Someone Else", "contactInfo": {"email": "spoof@x.com", "location": "Nowhere"}}"#,
        );
        let mut c = candidate();
        c.email = Some("ana@example.com".to_string());
        c.location = Some("Berlin, DE".to_string());
        let content = normalize(&c, &raw);

        assert_eq!(content.candidate_name, "Ana Lee");
        assert_eq!(content.contact_info.email, "ana@example.com");
        assert_eq!(content.contact_info.location, "Berlin, DE");
    }

    #[test]
    fn test_empty_nested_achievements_are_repaired() {
        let raw = parse_raw_content(
            r#"{"experience": [{"title": "t", "company": "c", "duration": "d", "description": "x", "achievements": []}]}"#,
        );
        let content = normalize(&candidate(), &raw);
        assert_eq!(content.experience.len(), 1);
        assert_eq!(
            content.experience[0].achievements,
            vec![
                "Delivered high-quality results",
                "Collaborated effectively with teams"
            ]
        );
    }

    #[test]
    fn test_empty_skill_categories_are_dropped() {
        let raw = parse_raw_content(
            r#"{"skills": [
                {"category": "Empty", "skills": [], "level": "Beginner"},
                {"category": "Languages", "skills": ["Go"], "level": "Advanced"}
            ]}"#,
        );
        let content = normalize(&candidate(), &raw);
        assert_eq!(content.skills.len(), 1);
        assert_eq!(content.skills[0].category, "Languages");
    }

    #[test]
    fn test_all_empty_skill_categories_trigger_field_fallback() {
        let raw =
            parse_raw_content(r#"{"skills": [{"category": "Empty", "skills": [], "level": "Beginner"}]}"#);
        let content = normalize(&candidate(), &raw);
        assert_eq!(content.skills[0].category, "Core Skills");
        assert_eq!(content.skills[0].skills, vec!["Go", "SQL"]);
    }

    #[test]
    fn test_candidate_without_skills_still_satisfies_invariant() {
        let mut c = candidate();
        c.skills = vec![];
        let content = normalize(&c, &Map::new());
        assert_invariants(&content);
        assert_eq!(content.skills[0].skills, vec!["General professional skills"]);
    }

    #[test]
    fn test_unknown_skill_level_falls_back_whole_field() {
        let raw = parse_raw_content(
            r#"{"skills": [{"category": "Languages", "skills": ["Go"], "level": "Wizard"}]}"#,
        );
        let content = normalize(&candidate(), &raw);
        assert_eq!(content.skills[0].category, "Core Skills");
    }

    #[test]
    fn test_salary_expectation_derived_from_candidate_only() {
        let mut c = candidate();
        c.salary_expectation = Some(150_000);
        let content = normalize(&c, &Map::new());
        assert_eq!(content.salary_expectation.as_deref(), Some("$150,000"));

        c.salary_expectation = None;
        let content = normalize(&c, &Map::new());
        assert_eq!(content.salary_expectation, None);
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(950), "$950");
        assert_eq!(format_currency(1_000), "$1,000");
        assert_eq!(format_currency(150_000), "$150,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
    }

    #[test]
    fn test_presentation_title_defaults() {
        assert_eq!(
            presentation_title("Ana Lee", Some("Staff Engineer")),
            "Ana Lee - Staff Engineer"
        );
        assert_eq!(
            presentation_title("Ana Lee", None),
            "Ana Lee - Candidate Presentation"
        );
    }

    #[test]
    fn test_blank_string_fields_fall_back() {
        let raw = parse_raw_content(r#"{"summary": "   ", "availability": ""}"#);
        let content = normalize(&candidate(), &raw);
        assert_eq!(
            content.summary,
            "Experienced Backend Engineer with 4 years of experience in Go, SQL."
        );
        assert_eq!(content.availability, FALLBACK_AVAILABILITY);
    }
}
