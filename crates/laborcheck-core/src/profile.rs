//! Business profile metadata.
//!
//! The profile is shown alongside results but never feeds into scoring.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::{RecordKey, Storage};

/// Industry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "제조업")]
    Manufacturing,
    #[serde(rename = "서비스업")]
    Services,
    #[serde(rename = "건설업")]
    Construction,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "기타")]
    Other,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Manufacturing,
        Industry::Services,
        Industry::Construction,
        Industry::It,
        Industry::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Manufacturing => "제조업",
            Industry::Services => "서비스업",
            Industry::Construction => "건설업",
            Industry::It => "IT",
            Industry::Other => "기타",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(industry) = Industry::ALL.iter().find(|i| i.label().eq_ignore_ascii_case(s)) {
            return Ok(*industry);
        }
        match s.to_lowercase().as_str() {
            "manufacturing" => Ok(Industry::Manufacturing),
            "services" | "service" => Ok(Industry::Services),
            "construction" => Ok(Industry::Construction),
            "other" => Ok(Industry::Other),
            other => Err(format!("unknown industry: {other}")),
        }
    }
}

/// Employment arrangement present at the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "정규직")]
    Permanent,
    #[serde(rename = "계약직")]
    FixedTerm,
    #[serde(rename = "파견직")]
    Dispatched,
    #[serde(rename = "일용직")]
    Daily,
    #[serde(rename = "아르바이트")]
    PartTime,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::Permanent,
        EmploymentType::FixedTerm,
        EmploymentType::Dispatched,
        EmploymentType::Daily,
        EmploymentType::PartTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmploymentType::Permanent => "정규직",
            EmploymentType::FixedTerm => "계약직",
            EmploymentType::Dispatched => "파견직",
            EmploymentType::Daily => "일용직",
            EmploymentType::PartTime => "아르바이트",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(kind) = EmploymentType::ALL.iter().find(|k| k.label() == s) {
            return Ok(*kind);
        }
        match s.to_lowercase().replace('-', "_").as_str() {
            "permanent" => Ok(EmploymentType::Permanent),
            "fixed_term" | "contract" => Ok(EmploymentType::FixedTerm),
            "dispatched" => Ok(EmploymentType::Dispatched),
            "daily" => Ok(EmploymentType::Daily),
            "part_time" => Ok(EmploymentType::PartTime),
            other => Err(format!("unknown employment type: {other}")),
        }
    }
}

/// Business metadata collected before the diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub name: String,
    pub industry: Option<Industry>,
    /// Regular headcount. Required, but kept optional so an unset form field
    /// can be told apart from zero.
    #[serde(default)]
    pub employee_count: Option<u32>,
    #[serde(default)]
    pub established_date: Option<NaiveDate>,
    #[serde(default)]
    pub employment_types: Vec<EmploymentType>,
    /// Contact address for the report.
    #[serde(default)]
    pub email: Option<String>,
}

/// A problem with one profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIssue {
    pub field: &'static str,
    pub message: String,
}

impl BusinessProfile {
    /// Check the required fields. An empty result means the profile is valid.
    pub fn validate(&self) -> Vec<ProfileIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ProfileIssue {
                field: "name",
                message: "사업장명을 입력하세요.".into(),
            });
        }
        if self.industry.is_none() {
            issues.push(ProfileIssue {
                field: "industry",
                message: "업종을 선택하세요.".into(),
            });
        }
        if self.employee_count.is_none() {
            issues.push(ProfileIssue {
                field: "employeeCount",
                message: "상시근로자 수를 입력하세요.".into(),
            });
        }
        if self.employment_types.is_empty() {
            issues.push(ProfileIssue {
                field: "employmentTypes",
                message: "주요 고용형태를 1개 이상 선택하세요.".into(),
            });
        }
        if let Some(email) = &self.email {
            let valid = email
                .split_once('@')
                .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
            if !valid {
                issues.push(ProfileIssue {
                    field: "email",
                    message: format!("올바른 이메일 주소가 아닙니다: {email}"),
                });
            }
        }

        issues
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BusinessRecord {
    business: BusinessProfile,
}

/// Persist the profile record.
pub fn save_profile<S: Storage>(storage: &S, profile: &BusinessProfile) -> Result<()> {
    let record = serde_json::to_string_pretty(&BusinessRecord {
        business: profile.clone(),
    })
    .context("failed to serialize business profile")?;
    storage.write(RecordKey::Business, &record)
}

/// Load the saved profile, if there is a readable one.
pub fn load_profile<S: Storage>(storage: &S) -> Option<BusinessProfile> {
    let record = match storage.read(RecordKey::Business) {
        Ok(record) => record?,
        Err(e) => {
            tracing::warn!("could not read business profile: {e:#}");
            return None;
        }
    };
    match serde_json::from_str::<BusinessRecord>(&record) {
        Ok(r) => Some(r.business),
        Err(e) => {
            tracing::warn!("discarding malformed business profile: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            name: "한빛정밀".into(),
            industry: Some(Industry::Manufacturing),
            employee_count: Some(23),
            established_date: NaiveDate::from_ymd_opt(2015, 3, 2),
            employment_types: vec![EmploymentType::Permanent, EmploymentType::PartTime],
            email: Some("hr@hanbit.example".into()),
        }
    }

    #[test]
    fn valid_profile_has_no_issues() {
        assert!(profile().validate().is_empty());
    }

    #[test]
    fn reports_each_missing_field() {
        let p = BusinessProfile {
            name: "  ".into(),
            industry: None,
            employee_count: None,
            established_date: None,
            employment_types: vec![],
            email: Some("nobody".into()),
        };
        let fields: Vec<&str> = p.validate().iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec!["name", "industry", "employeeCount", "employmentTypes", "email"]
        );
    }

    #[test]
    fn headcount_is_required_but_zero_is_allowed() {
        let mut p = profile();
        p.employee_count = None;
        let issues = p.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "employeeCount");
        assert_eq!(issues[0].message, "상시근로자 수를 입력하세요.");

        p.employee_count = Some(0);
        assert!(p.validate().is_empty());
    }

    #[test]
    fn parse_labels_and_english_names() {
        assert_eq!("건설업".parse::<Industry>().unwrap(), Industry::Construction);
        assert_eq!("it".parse::<Industry>().unwrap(), Industry::It);
        assert_eq!("services".parse::<Industry>().unwrap(), Industry::Services);
        assert!("farming".parse::<Industry>().is_err());

        assert_eq!("일용직".parse::<EmploymentType>().unwrap(), EmploymentType::Daily);
        assert_eq!(
            "part-time".parse::<EmploymentType>().unwrap(),
            EmploymentType::PartTime
        );
    }

    #[test]
    fn record_roundtrip_and_layout() {
        let storage = MemoryStorage::new();
        save_profile(&storage, &profile()).unwrap();

        let raw = storage.get(RecordKey::Business).unwrap();
        assert!(raw.contains("\"business\""));
        assert!(raw.contains("\"employeeCount\": 23"));
        assert!(raw.contains("\"제조업\""));

        assert_eq!(load_profile(&storage), Some(profile()));
    }

    #[test]
    fn missing_or_malformed_profile_loads_as_none() {
        assert_eq!(load_profile(&MemoryStorage::new()), None);
        let storage = MemoryStorage::new().with_record(RecordKey::Business, "{\"business\":1}");
        assert_eq!(load_profile(&storage), None);
        assert_eq!(load_profile(&MemoryStorage::failing_reads()), None);
    }
}
