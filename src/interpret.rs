//! Qualitative bands for normalized scores.
//!
//! Normalized scores land on a 0 to 100 scale; the bands below give them a
//! reportable label. Band edges are inclusive at the lower bound.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ScoreBand {
    High,
    AboveAverage,
    Average,
    BelowAverage,
    Low,
}

impl ScoreBand {
    /// Band for a normalized score.
    pub fn of(normalized_score: f64) -> Self {
        if normalized_score >= 80.0 {
            ScoreBand::High
        } else if normalized_score >= 60.0 {
            ScoreBand::AboveAverage
        } else if normalized_score >= 40.0 {
            ScoreBand::Average
        } else if normalized_score >= 20.0 {
            ScoreBand::BelowAverage
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::High => "High",
            ScoreBand::AboveAverage => "Above Average",
            ScoreBand::Average => "Average",
            ScoreBand::BelowAverage => "Below Average",
            ScoreBand::Low => "Low",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::High => "Significantly above average",
            ScoreBand::AboveAverage => "Moderately above average",
            ScoreBand::Average => "Within normal range",
            ScoreBand::BelowAverage => "Moderately below average",
            ScoreBand::Low => "Significantly below average",
        }
    }
}
