//! Grade bands for compliance scores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Banded classification of a 0-100 score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    Safe,
    Caution,
    Warning,
    Danger,
}

impl Grade {
    /// Classify a score: 90+ safe, 70+ caution, 50+ warning, else danger.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::Safe,
            70..=89 => Grade::Caution,
            50..=69 => Grade::Warning,
            _ => Grade::Danger,
        }
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Grade::Safe => "안전",
            Grade::Caution => "주의",
            Grade::Warning => "경고",
            Grade::Danger => "위험",
        }
    }

    /// Remediation message shown with the total score.
    pub fn message(self) -> &'static str {
        match self {
            Grade::Safe => "근로감독 대비 양호합니다",
            Grade::Caution => "일부 개선이 필요합니다",
            Grade::Warning => "근로감독 시 지적 가능성이 높습니다",
            Grade::Danger => "즉시 개선이 필요합니다",
        }
    }

    /// Display colour for gauges and bars.
    pub fn color(self) -> &'static str {
        match self {
            Grade::Safe => "#22C55E",
            Grade::Caution => "#EAB308",
            Grade::Warning => "#F97316",
            Grade::Danger => "#EF4444",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Safe => write!(f, "SAFE"),
            Grade::Caution => write!(f, "CAUTION"),
            Grade::Warning => write!(f, "WARNING"),
            Grade::Danger => write!(f, "DANGER"),
        }
    }
}
