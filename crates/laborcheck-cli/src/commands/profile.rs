//! The `laborcheck profile` command.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use laborcheck_core::profile::{load_profile, save_profile, BusinessProfile, EmploymentType, Industry};

use super::Session;

pub struct ProfileArgs {
    pub name: Option<String>,
    pub industry: Option<Industry>,
    pub employees: Option<u32>,
    pub established: Option<NaiveDate>,
    pub employment_types: Vec<EmploymentType>,
    pub email: Option<String>,
}

impl ProfileArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.industry.is_none()
            && self.employees.is_none()
            && self.established.is_none()
            && self.employment_types.is_empty()
            && self.email.is_none()
    }

    /// Overlay the given flags on a saved profile, or on a blank one.
    fn apply(self, saved: Option<BusinessProfile>) -> BusinessProfile {
        let mut profile = saved.unwrap_or_else(|| BusinessProfile {
            name: String::new(),
            industry: None,
            employee_count: None,
            established_date: None,
            employment_types: Vec::new(),
            email: None,
        });
        if let Some(name) = self.name {
            profile.name = name;
        }
        if self.industry.is_some() {
            profile.industry = self.industry;
        }
        if self.employees.is_some() {
            profile.employee_count = self.employees;
        }
        if self.established.is_some() {
            profile.established_date = self.established;
        }
        if !self.employment_types.is_empty() {
            profile.employment_types.clear();
            for kind in self.employment_types {
                if !profile.employment_types.contains(&kind) {
                    profile.employment_types.push(kind);
                }
            }
        }
        if let Some(email) = self.email {
            profile.email = (!email.trim().is_empty()).then_some(email);
        }
        profile
    }
}

pub fn execute(session: &Session, args: ProfileArgs) -> Result<()> {
    let saved = load_profile(&session.storage);

    if args.is_empty() {
        match saved {
            Some(profile) => print_profile(&profile),
            None => println!("No business profile saved. Set one with `laborcheck profile --name ...`."),
        }
        return Ok(());
    }

    let profile = args.apply(saved);
    let issues = profile.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  [{}] {}", issue.field, issue.message);
        }
        anyhow::bail!("business profile has {} problem(s), not saved", issues.len());
    }

    save_profile(&session.storage, &profile).with_context(|| {
        format!(
            "failed to save business profile in {}",
            session.storage.dir().display()
        )
    })?;
    println!("Saved business profile.");
    print_profile(&profile);
    Ok(())
}

fn print_profile(profile: &BusinessProfile) {
    println!("사업장명: {}", profile.name);
    if let Some(industry) = profile.industry {
        println!("업종: {industry}");
    }
    if let Some(n) = profile.employee_count {
        println!("상시근로자 수: {n}");
    }
    if let Some(date) = profile.established_date {
        println!("설립일: {date}");
    }
    let kinds: Vec<&str> = profile.employment_types.iter().map(|k| k.label()).collect();
    println!("고용형태: {}", kinds.join(", "));
    if let Some(email) = &profile.email {
        println!("이메일: {email}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProfileArgs {
        ProfileArgs {
            name: None,
            industry: None,
            employees: None,
            established: None,
            employment_types: vec![],
            email: None,
        }
    }

    #[test]
    fn flags_overlay_saved_profile() {
        let saved = BusinessProfile {
            name: "한빛정밀".into(),
            industry: Some(Industry::Manufacturing),
            employee_count: Some(10),
            established_date: None,
            employment_types: vec![EmploymentType::Permanent],
            email: Some("hr@hanbit.example".into()),
        };
        let updated = ProfileArgs {
            employees: Some(14),
            email: Some(String::new()),
            ..args()
        }
        .apply(Some(saved));

        assert_eq!(updated.name, "한빛정밀");
        assert_eq!(updated.employee_count, Some(14));
        assert_eq!(updated.email, None);
        assert_eq!(updated.employment_types, vec![EmploymentType::Permanent]);
    }

    #[test]
    fn no_flags_is_empty() {
        assert!(args().is_empty());
        assert!(!ProfileArgs {
            employment_types: vec![EmploymentType::Daily],
            ..args()
        }
        .is_empty());
    }
}
