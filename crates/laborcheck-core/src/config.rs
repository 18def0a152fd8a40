//! laborcheck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::EmptyCategoryPolicy;

/// Top-level laborcheck configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborcheckConfig {
    /// Directory holding the persisted session records.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Score for categories with no scorable answers.
    #[serde(default)]
    pub empty_category_policy: EmptyCategoryPolicy,
    /// How many non-compliant items the action plan lists before summarizing.
    #[serde(default = "default_action_plan_limit")]
    pub action_plan_limit: usize,
    /// Where `result --output` writes reports when given a bare file name.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./.laborcheck")
}
fn default_action_plan_limit() -> usize {
    15
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./laborcheck-results")
}

impl Default for LaborcheckConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            empty_category_policy: EmptyCategoryPolicy::default(),
            action_plan_limit: default_action_plan_limit(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    // Substituted values are not rescanned.
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
            cursor = start + value.len();
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `laborcheck.toml` in the current directory
/// 2. `~/.config/laborcheck/config.toml`
///
/// Environment variable override: `LABORCHECK_STATE_DIR`.
pub fn load_config() -> Result<LaborcheckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LaborcheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("laborcheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            toml::from_str::<LaborcheckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LaborcheckConfig::default(),
    };

    if let Ok(dir) = std::env::var("LABORCHECK_STATE_DIR") {
        if !dir.trim().is_empty() {
            config.state_dir = PathBuf::from(dir);
        }
    }

    config.state_dir = resolve_path(&config.state_dir);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("laborcheck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_LABORCHECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_LABORCHECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_LABORCHECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_LABORCHECK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_LABORCHECK_SELF_VAR", "${_LABORCHECK_SELF_VAR}");
        std::env::set_var("_LABORCHECK_INNER_VAR", "inner");
        std::env::set_var("_LABORCHECK_OUTER_VAR", "${_LABORCHECK_INNER_VAR}");
        assert_eq!(
            resolve_env_vars("${_LABORCHECK_SELF_VAR}/state"),
            "${_LABORCHECK_SELF_VAR}/state"
        );
        assert_eq!(
            resolve_env_vars("${_LABORCHECK_OUTER_VAR}-${_LABORCHECK_INNER_VAR}"),
            "${_LABORCHECK_INNER_VAR}-inner"
        );
        std::env::remove_var("_LABORCHECK_SELF_VAR");
        std::env::remove_var("_LABORCHECK_INNER_VAR");
        std::env::remove_var("_LABORCHECK_OUTER_VAR");
    }

    #[test]
    fn default_config() {
        let config = LaborcheckConfig::default();
        assert_eq!(config.action_plan_limit, 15);
        assert_eq!(config.empty_category_policy, EmptyCategoryPolicy::Compliant);
        assert_eq!(config.state_dir, PathBuf::from("./.laborcheck"));
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
state_dir = "/tmp/diagnosis"
empty_category_policy = "non_compliant"
action_plan_limit = 5
"#;
        let config: LaborcheckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.state_dir, PathBuf::from("/tmp/diagnosis"));
        assert_eq!(config.empty_category_policy, EmptyCategoryPolicy::NonCompliant);
        assert_eq!(config.action_plan_limit, 5);
        assert_eq!(config.output_dir, PathBuf::from("./laborcheck-results"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/no/such/laborcheck.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("laborcheck.toml");
        std::fs::write(&path, "action_plan_limit = 3\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.action_plan_limit, 3);
    }
}
