//! Loads numbered vocabulary resources into source tables.
//!
//! Each resource is validated against the required columns and backed up
//! before it is kept. A failing resource is skipped; the others still load.

use crate::config::{BackupMode, ReviewConfig};
use crate::error::{Result, VocabError};
use crate::sheet::{FileStore, Sheet, SheetStore};
use crate::types::{Cell, Row, SourceTable};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A resource that could not be loaded.
#[derive(Debug)]
pub struct Skipped {
    pub name: String,
    pub error: VocabError,
}

/// Outcome of loading a batch of resources.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub skipped: Vec<Skipped>,
}

/// Check that every required column is present.
///
/// On failure the error names exactly the missing columns, sorted.
pub fn validate_columns(resource: &str, columns: &[String], required: &[String]) -> Result<()> {
    let present: BTreeSet<&str> = columns.iter().map(String::as_str).collect();
    let missing: BTreeSet<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|c| !present.contains(c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(VocabError::MissingColumns {
            resource: resource.to_string(),
            columns: missing.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Move or copy `path` into the backup directory.
///
/// Returns the backup location, or `None` when backups are disabled.
pub fn create_backup(config: &ReviewConfig, path: &Path, name: &str) -> Result<Option<PathBuf>> {
    if !config.enable_backup {
        return Ok(None);
    }

    fs::create_dir_all(&config.backup_dir)?;
    let backup_path = config.backup_path(name);

    match config.backup_mode {
        BackupMode::Move => {
            if fs::rename(path, &backup_path).is_err() {
                // rename cannot cross filesystems
                fs::copy(path, &backup_path)?;
                fs::remove_file(path)?;
            }
        }
        BackupMode::Copy => {
            fs::copy(path, &backup_path)?;
        }
    }

    tracing::info!("Backed up {} to {}", path.display(), backup_path.display());
    Ok(Some(backup_path))
}

/// Loads resources and keeps them in load order, keyed by file name.
pub struct TableLoader<S = FileStore> {
    config: ReviewConfig,
    store: S,
    tables: Vec<SourceTable>,
}

impl TableLoader<FileStore> {
    pub fn new(config: ReviewConfig) -> Self {
        Self::with_store(config, FileStore)
    }
}

impl<S: SheetStore> TableLoader<S> {
    pub fn with_store(config: ReviewConfig, store: S) -> Self {
        Self {
            config,
            store,
            tables: Vec::new(),
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loaded tables in load order.
    pub fn tables(&self) -> &[SourceTable] {
        &self.tables
    }

    pub fn get(&self, name: &str) -> Option<&SourceTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Load every numbered resource. Failures are recorded, not returned.
    pub fn load_all(&mut self, numbers: &[i64]) -> LoadReport {
        let mut report = LoadReport::default();

        for &number in numbers {
            let name = self.config.file_name(number);
            match self.load(number) {
                Ok(()) => {
                    tracing::info!("Loaded {}", name);
                    report.loaded.push(name);
                }
                Err(error) => {
                    tracing::warn!("Failed to load {}: {}", name, error);
                    report.skipped.push(Skipped { name, error });
                }
            }
        }

        report
    }

    /// Load a single numbered resource.
    pub fn load(&mut self, number: i64) -> Result<()> {
        let name = self.config.file_name(number);
        let path = self.config.input_path(&name);

        if !path.exists() {
            return Err(VocabError::NotFound(path));
        }

        let sheet = self.store.read(&path)?;
        validate_columns(&name, &sheet.columns, &self.config.required_columns)?;
        let rows = self.build_rows(&name, &sheet)?;

        let backup_path = create_backup(&self.config, &path, &name)?;

        let table = SourceTable {
            name: name.clone(),
            path,
            backup_path,
            columns: sheet.columns,
            rows,
        };

        match self.tables.iter_mut().find(|t| t.name == name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
        Ok(())
    }

    /// Tag rows with their origin and default empty counters to zero.
    fn build_rows(&self, name: &str, sheet: &Sheet) -> Result<Vec<Row>> {
        let counter = self.config.counter_column.as_str();

        sheet
            .rows
            .iter()
            .enumerate()
            .map(|(row_idx, cells)| {
                let mut row = Row::new(name);
                for (col_idx, column) in sheet.columns.iter().enumerate() {
                    let value = cells.get(col_idx).cloned().unwrap_or_default();
                    let value = if column == counter {
                        match value {
                            Cell::Empty => Cell::Number(0.0),
                            Cell::Number(n) => Cell::Number(n),
                            Cell::Text(text) => {
                                return Err(VocabError::InvalidCounter {
                                    resource: name.to_string(),
                                    column: column.clone(),
                                    row: row_idx + 1,
                                    value: text,
                                })
                            }
                        }
                    } else {
                        value
                    };
                    row.set(column.clone(), value);
                }
                Ok(row)
            })
            .collect()
    }
}
