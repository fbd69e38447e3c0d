//! Score display. Turns raw candidate sub-scores into percentages.
//!
//! The API bounds each sub-score (technical <= 40, business <= 20,
//! behavioral <= 10, aggregate <= 100). The client only normalises and
//! displays; out-of-range input is clamped rather than rejected.

use serde::Serialize;

use crate::models::analysis::AnalysisCandidate;

pub const TECHNICAL_MAX: f64 = 40.0;
pub const BUSINESS_MAX: f64 = 20.0;
pub const BEHAVIORAL_MAX: f64 = 10.0;
pub const AGGREGATE_MAX: f64 = 100.0;

/// Classification of the aggregate percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitBand {
    /// >= 80
    Strong,
    /// 40 - 79
    Partial,
    /// < 40
    Weak,
}

impl FitBand {
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 80 {
            FitBand::Strong
        } else if percent >= 40 {
            FitBand::Partial
        } else {
            FitBand::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::Strong => "strong match",
            FitBand::Partial => "partial match",
            FitBand::Weak => "weak match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub aggregate: u8,
    pub technical: u8,
    pub business: u8,
    pub behavioral: u8,
    pub band: FitBand,
}

impl ScoreBreakdown {
    pub fn from_scores(score: f64, technical: f64, business: f64, behavioral: f64) -> Self {
        let aggregate = to_percent(score, AGGREGATE_MAX);
        Self {
            aggregate,
            technical: to_percent(technical, TECHNICAL_MAX),
            business: to_percent(business, BUSINESS_MAX),
            behavioral: to_percent(behavioral, BEHAVIORAL_MAX),
            band: FitBand::from_percent(aggregate),
        }
    }

    pub fn from_candidate(candidate: &AnalysisCandidate) -> Self {
        Self::from_scores(
            candidate.score,
            candidate.technical_match_score,
            candidate.business_fit_score,
            candidate.behavioral_match_score,
        )
    }
}

/// `value / max` as a whole percentage, clamped to 0..=100. NaN reads as 0.
pub fn to_percent(value: f64, max: f64) -> u8 {
    if max <= 0.0 || value.is_nan() {
        return 0;
    }
    ((value / max) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Highest aggregate first; ties keep their original order.
pub fn rank_candidates(candidates: &mut [AnalysisCandidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}
