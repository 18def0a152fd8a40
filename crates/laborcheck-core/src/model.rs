//! Core data model types for laborcheck.
//!
//! These are the fundamental types the rest of the system uses to describe
//! a diagnosis: categories, questions, and the closed set of answer values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single answer a user can give to a compliance question.
///
/// The serialized form is the Korean wire code used by the persisted answer
/// record. English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerValue {
    #[serde(rename = "예", alias = "YES")]
    Yes,
    #[serde(rename = "아니오", alias = "NO")]
    No,
    #[serde(rename = "일부", alias = "PARTIAL")]
    Partial,
    #[serde(rename = "모름", alias = "UNKNOWN")]
    Unknown,
    #[serde(rename = "확인필요", alias = "NEEDS_VERIFICATION")]
    NeedsVerification,
    #[serde(rename = "해당없음", alias = "NOT_APPLICABLE")]
    NotApplicable,
}

impl AnswerValue {
    /// Every answer value, in display order.
    pub const ALL: [AnswerValue; 6] = [
        AnswerValue::Yes,
        AnswerValue::No,
        AnswerValue::Partial,
        AnswerValue::Unknown,
        AnswerValue::NeedsVerification,
        AnswerValue::NotApplicable,
    ];

    /// The persisted wire code.
    pub fn code(self) -> &'static str {
        match self {
            AnswerValue::Yes => "예",
            AnswerValue::No => "아니오",
            AnswerValue::Partial => "일부",
            AnswerValue::Unknown => "모름",
            AnswerValue::NeedsVerification => "확인필요",
            AnswerValue::NotApplicable => "해당없음",
        }
    }

    /// The enumeration name, e.g. `NEEDS_VERIFICATION`.
    pub fn name(self) -> &'static str {
        match self {
            AnswerValue::Yes => "YES",
            AnswerValue::No => "NO",
            AnswerValue::Partial => "PARTIAL",
            AnswerValue::Unknown => "UNKNOWN",
            AnswerValue::NeedsVerification => "NEEDS_VERIFICATION",
            AnswerValue::NotApplicable => "NOT_APPLICABLE",
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AnswerValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(value) = AnswerValue::ALL.iter().find(|v| v.code() == trimmed) {
            return Ok(*value);
        }
        match trimmed.to_lowercase().replace('-', "_").as_str() {
            "yes" | "y" => Ok(AnswerValue::Yes),
            "no" | "n" => Ok(AnswerValue::No),
            "partial" => Ok(AnswerValue::Partial),
            "unknown" => Ok(AnswerValue::Unknown),
            "needs_verification" | "verify" => Ok(AnswerValue::NeedsVerification),
            "not_applicable" | "n/a" | "na" => Ok(AnswerValue::NotApplicable),
            other => Err(format!("unknown answer value: {other}")),
        }
    }
}

/// A weighted group of related questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Dense 0-based id; also the category's position.
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Relative weight in the total score. Not used for category scores.
    pub weight: f64,
}

/// A single compliance question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Position in the global question sequence.
    pub index: usize,
    /// The category this question belongs to.
    pub category_id: usize,
    /// Question text shown to the user.
    pub text: String,
    /// Answer values the user may pick, in display order.
    pub options: Vec<AnswerValue>,
}

impl Question {
    /// Whether `value` is one of this question's options.
    pub fn allows(&self, value: AnswerValue) -> bool {
        self.options.contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_value_display_and_parse() {
        assert_eq!(AnswerValue::Yes.to_string(), "예");
        assert_eq!(AnswerValue::NeedsVerification.to_string(), "확인필요");
        assert_eq!("예".parse::<AnswerValue>().unwrap(), AnswerValue::Yes);
        assert_eq!(" 해당없음 ".parse::<AnswerValue>().unwrap(), AnswerValue::NotApplicable);
        assert_eq!("YES".parse::<AnswerValue>().unwrap(), AnswerValue::Yes);
        assert_eq!(
            "needs-verification".parse::<AnswerValue>().unwrap(),
            AnswerValue::NeedsVerification
        );
        assert_eq!("n/a".parse::<AnswerValue>().unwrap(), AnswerValue::NotApplicable);
        assert!("maybe".parse::<AnswerValue>().is_err());
    }

    #[test]
    fn wire_codes_match_serde() {
        for value in AnswerValue::ALL {
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(json, format!("\"{}\"", value.code()));
        }
        let parsed: AnswerValue = serde_json::from_str("\"NOT_APPLICABLE\"").unwrap();
        assert_eq!(parsed, AnswerValue::NotApplicable);
        assert!(serde_json::from_str::<AnswerValue>("\"글쎄\"").is_err());
    }

    #[test]
    fn question_allows_only_its_options() {
        let q = Question {
            index: 0,
            category_id: 0,
            text: "서면 근로계약서를 교부하고 있습니까?".into(),
            options: vec![AnswerValue::Yes, AnswerValue::No],
        };
        assert!(q.allows(AnswerValue::No));
        assert!(!q.allows(AnswerValue::NotApplicable));
    }
}
