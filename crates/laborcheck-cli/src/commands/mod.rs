pub mod init;
pub mod navigate;
pub mod profile;
pub mod questions;
pub mod result;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};
use laborcheck_core::config::{load_config_from, LaborcheckConfig};
use laborcheck_core::model::Question;
use laborcheck_core::navigation::Navigator;
use laborcheck_core::schema::Schema;
use laborcheck_core::storage::FileStorage;

/// Everything a session command needs: the schema, the resolved config and
/// the state directory adapter.
pub struct Session {
    pub schema: Schema,
    pub config: LaborcheckConfig,
    pub storage: FileStorage,
}

impl Session {
    pub fn load(config_path: Option<&Path>, state_dir: Option<&Path>) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(dir) = state_dir {
            config.state_dir = dir.to_path_buf();
        }
        let schema = Schema::builtin().context("built-in question catalog is invalid")?;
        tracing::debug!("using state directory {}", config.state_dir.display());
        let storage = FileStorage::new(config.state_dir.clone());
        Ok(Self {
            schema,
            config,
            storage,
        })
    }

    pub fn navigator(&self) -> Navigator<'_, &FileStorage> {
        Navigator::open(&self.schema, &self.storage).with_policy(self.config.empty_category_policy)
    }
}

/// One-line rendering of a question: index, answer mark and text.
pub fn question_line(question: &Question, answer: Option<&str>) -> String {
    format!(
        "#{:<3} [{}] {}",
        question.index,
        answer.unwrap_or(" "),
        question.text
    )
}
