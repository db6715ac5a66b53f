use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted candidate presentation with its draft/sent/viewed lifecycle.
///
/// `version` is the optimistic-concurrency counter: every mutation
/// compare-and-swaps on it, so a lost race surfaces as a conflict instead of
/// silently overwriting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PresentationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub title: String,
    pub content: Json<PresentationContent>,
    pub document_url: Option<String>,
    pub status: String,
    pub client_email: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub viewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

/// Lifecycle state of a presentation. Transitions are monotonic:
/// draft → sent → viewed, plus self-transitions for idempotent re-application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStatus {
    Draft,
    Sent,
    Viewed,
}

impl PresentationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationStatus::Draft => "draft",
            PresentationStatus::Sent => "sent",
            PresentationStatus::Viewed => "viewed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PresentationStatus::Draft),
            "sent" => Some(PresentationStatus::Sent),
            "viewed" => Some(PresentationStatus::Viewed),
            _ => None,
        }
    }
}

/// The complete, schema-valid presentation document.
///
/// Invariant: after normalization every list-valued field (including the
/// nested ones) is non-empty, and `contact_info.email` / `contact_info.location`
/// always carry at least a placeholder. Serialized camelCase — this is the
/// owned persisted format and the shape clients consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationContent {
    pub candidate_name: String,
    pub summary: String,
    pub experience: Vec<ExperienceItem>,
    pub skills: Vec<SkillCategory>,
    pub achievements: Vec<String>,
    pub education: Vec<EducationItem>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_expectation: Option<String>,
    pub availability: String,
    pub contact_info: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub location: String,
}
