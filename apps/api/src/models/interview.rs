use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled or completed interview for a candidate.
/// `ai_summary` is filled when notes are recorded, best-effort.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub interviewer_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub interview_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub ai_summary: Option<String>,
    pub recording_url: Option<String>,
    /// 1-10 rating.
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    Video,
    InPerson,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Phone => "phone",
            InterviewType::Video => "video",
            InterviewType::InPerson => "in_person",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "phone" => Some(InterviewType::Phone),
            "video" => Some(InterviewType::Video),
            "in_person" => Some(InterviewType::InPerson),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::NoShow => "no_show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(InterviewStatus::Scheduled),
            "completed" => Some(InterviewStatus::Completed),
            "cancelled" => Some(InterviewStatus::Cancelled),
            "no_show" => Some(InterviewStatus::NoShow),
            _ => None,
        }
    }
}
