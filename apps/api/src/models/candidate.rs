use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A sourced candidate profile. Input to the presentation pipeline —
/// the pipeline reads it, never writes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
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
    /// Whole currency units (USD).
    pub salary_expectation: Option<i64>,
    pub status: String,
    pub notes: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline stage of a candidate in the recruiting funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Sourced,
    Contacted,
    Interviewed,
    Presented,
    Placed,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Sourced => "sourced",
            CandidateStatus::Contacted => "contacted",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Presented => "presented",
            CandidateStatus::Placed => "placed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sourced" => Some(CandidateStatus::Sourced),
            "contacted" => Some(CandidateStatus::Contacted),
            "interviewed" => Some(CandidateStatus::Interviewed),
            "presented" => Some(CandidateStatus::Presented),
            "placed" => Some(CandidateStatus::Placed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_status_round_trips_through_str() {
        for status in [
            CandidateStatus::Sourced,
            CandidateStatus::Contacted,
            CandidateStatus::Interviewed,
            CandidateStatus::Presented,
            CandidateStatus::Placed,
        ] {
            assert_eq!(CandidateStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_candidate_status_rejects_unknown() {
        assert_eq!(CandidateStatus::parse("hired"), None);
        assert_eq!(CandidateStatus::parse(""), None);
    }
}
