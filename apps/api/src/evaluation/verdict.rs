use std::fmt;

use serde::{Deserialize, Serialize};

pub const HIGH_THRESHOLD: f64 = 75.0;
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Coarse suitability label derived from the 0–100 relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    /// ≥75 High, ≥50 Medium, anything else Low.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Verdict::High
        } else if score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Suitability", self.as_str())
    }
}
