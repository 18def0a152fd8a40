//! The `laborcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("laborcheck.toml").exists() {
        println!("laborcheck.toml already exists, skipping.");
    } else {
        std::fs::write("laborcheck.toml", SAMPLE_CONFIG)?;
        println!("Created laborcheck.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: laborcheck profile --name <사업장명> --industry <업종> --employees <N> --employment-type <고용형태>");
    println!("  2. Run: laborcheck start");
    println!("  3. Answer each question with: laborcheck answer <예|아니오|일부|모름|확인필요|해당없음>");
    println!("  4. Run: laborcheck result --format html --output report.html");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# laborcheck configuration

# Where session records (answers, profile, position) are kept.
# LABORCHECK_STATE_DIR overrides this.
state_dir = "./.laborcheck"

# Score for a category whose questions were all answered 해당없음:
# "compliant" (100) or "non_compliant" (0).
empty_category_policy = "compliant"

# Action plan items listed before "외 N개 항목".
action_plan_limit = 15

# Directory for reports written with a bare file name.
output_dir = "./laborcheck-results"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use laborcheck_core::config::LaborcheckConfig;

    #[test]
    fn sample_config_parses() {
        let config: LaborcheckConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, LaborcheckConfig::default());
    }
}
