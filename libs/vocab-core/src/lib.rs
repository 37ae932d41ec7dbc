//! Core library for the vocabulary review tool.
//!
//! Provides:
//! - Loading numbered word-list spreadsheets with schema checks and backups
//! - Merging them into one combined table tagged by origin
//! - An interactive review session that tracks mistake counters
//! - Writing the updated tables back, one file per origin

pub mod config;
pub mod error;
pub mod loader;
pub mod merger;
pub mod order;
pub mod prompt;
pub mod session;
pub mod sheet;
pub mod types;
pub mod writer;

pub use config::{BackupMode, ReviewConfig};
pub use error::{Result, VocabError};
pub use loader::{create_backup, validate_columns, LoadReport, Skipped, TableLoader};
pub use merger::combine;
pub use order::OrderMode;
pub use prompt::{ask_flag, ask_integer, AdvanceGate, Prompter, Signal};
pub use session::{Phase, ReviewSession, SessionSummary};
pub use sheet::{FileStore, Sheet, SheetFormat, SheetStore};
pub use types::{Cell, CombinedTable, Row, SourceTable, ORIGIN_COLUMN};
pub use writer::write_back;
