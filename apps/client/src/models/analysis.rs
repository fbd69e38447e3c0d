use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    Pending,
    Completed,
    Failed,
}

impl AnalysisStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "Pending",
            AnalysisStatus::Completed => "Completed",
            AnalysisStatus::Failed => "Failed",
        }
    }
}

/// A recruiter-initiated candidate search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: String,
    pub user_id: String,
    pub status: AnalysisStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub query: String,
}

/// One scored candidate within an analysis. Bounds are enforced server-side:
/// technical <= 40, business <= 20, behavioral <= 10, aggregate <= 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCandidate {
    #[serde(rename = "analysisId")]
    pub analysis_id: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub analysis_summary: String,
    pub score: f64,
    pub technical_match_score: f64,
    pub business_fit_score: f64,
    pub behavioral_match_score: f64,
    pub candidate: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRef {
    pub id: String,
}

/// Response of `POST /candidates-search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisRef,
    #[serde(default)]
    pub users: Vec<AnalysisCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAnalysisResponse {
    pub data: Vec<Analysis>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
}

impl ListAnalysisResponse {
    pub fn total_pages(&self) -> u32 {
        crate::browse::pager::total_pages(self.total, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAnalysisByIdResponse {
    pub analysis: Analysis,
    #[serde(default)]
    pub users: Vec<AnalysisCandidate>,
}
