//! Review configuration.

use crate::error::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the original resource is preserved before it may be overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupMode {
    /// Rename the original into the backup directory.
    Move,
    /// Leave the original in place and copy it.
    Copy,
}

impl Default for BackupMode {
    fn default() -> Self {
        Self::Move
    }
}

/// Naming convention, schema and paths shared by every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub input_dir: PathBuf,
    pub file_prefix: String,
    pub file_suffix: String,
    /// Every resource must contain these. The trailing two are the mistake
    /// counter and importance marker; the rest are shown during review.
    pub required_columns: Vec<String>,
    pub counter_column: String,
    pub enable_backup: bool,
    pub backup_mode: BackupMode,
    pub backup_dir: PathBuf,
    pub output_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_output: Option<PathBuf>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            file_prefix: "words_day".to_string(),
            file_suffix: ".xlsx".to_string(),
            required_columns: ["words", "remember", "definition", "complement", "times", "importance"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            counter_column: "times".to_string(),
            enable_backup: true,
            backup_mode: BackupMode::default(),
            backup_dir: PathBuf::from("backup"),
            output_dir: PathBuf::from("."),
            combined_output: None,
        }
    }
}

impl ReviewConfig {
    /// Parse a JSON config. Missing keys take their default value.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| VocabError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.required_columns.len() < 2 {
            return Err(VocabError::InvalidConfig(
                "required_columns needs at least the counter and importance columns".to_string(),
            ));
        }
        if !self.required_columns.contains(&self.counter_column) {
            return Err(VocabError::InvalidConfig(format!(
                "counter column {} is not a required column",
                self.counter_column
            )));
        }
        Ok(())
    }

    /// `<prefix><number><suffix>`
    pub fn file_name(&self, number: i64) -> String {
        format!("{}{}{}", self.file_prefix, number, self.file_suffix)
    }

    pub fn input_path(&self, file_name: &str) -> PathBuf {
        self.input_dir.join(file_name)
    }

    pub fn backup_path(&self, file_name: &str) -> PathBuf {
        self.backup_dir.join(format!("backup_{}", file_name))
    }

    /// Columns revealed one at a time during review.
    pub fn display_columns(&self) -> &[String] {
        let end = self.required_columns.len().saturating_sub(2);
        &self.required_columns[..end]
    }
}
