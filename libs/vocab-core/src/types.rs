//! Core types for vocabulary tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Column name used for the origin tag when a combined table is persisted.
pub const ORIGIN_COLUMN: &str = "origin";

static EMPTY: Cell = Cell::Empty;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Interpret untyped cell text, as found in csv files. Blank and `NaN`
    /// become `Empty`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_nan() => Self::Empty,
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One vocabulary entry, tagged with the resource it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    origin: String,
    values: HashMap<String, Cell>,
}

impl Row {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            values: HashMap::new(),
        }
    }

    /// Builder-style setter, mostly handy in tests.
    pub fn with(mut self, column: impl Into<String>, value: Cell) -> Self {
        self.set(column, value);
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Value of a column. Columns the row never had read as `Empty`.
    pub fn get(&self, column: &str) -> &Cell {
        self.values.get(column).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, column: impl Into<String>, value: Cell) {
        self.values.insert(column.into(), value);
    }

    /// Mistake counter stored in `column`. Non-numeric values count as zero.
    pub fn counter(&self, column: &str) -> f64 {
        self.get(column).as_number().unwrap_or(0.0)
    }

    /// Add one mistake to the counter in `column`.
    pub fn record_mistake(&mut self, column: &str) {
        let next = self.counter(column) + 1.0;
        self.set(column, Cell::Number(next));
    }
}

/// Rows loaded from one resource.
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Resource file name, also used as the origin tag of its rows.
    pub name: String,
    pub path: PathBuf,
    pub backup_path: Option<PathBuf>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// All loaded rows in load order.
#[derive(Debug, Clone, Default)]
pub struct CombinedTable {
    columns: Vec<String>,
    sources: Vec<String>,
    rows: Vec<Row>,
}

impl CombinedTable {
    pub fn new(columns: Vec<String>, sources: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            sources,
            rows,
        }
    }

    /// Concatenate source tables. Columns are the ordered union of the
    /// source columns, first appearance wins.
    pub fn concat<'a>(tables: impl IntoIterator<Item = &'a SourceTable>) -> Self {
        let mut combined = Self::default();
        for table in tables {
            for column in &table.columns {
                if !combined.columns.contains(column) {
                    combined.columns.push(column.clone());
                }
            }
            combined.sources.push(table.name.clone());
            combined.rows.extend(table.rows.iter().cloned());
        }
        combined
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Names of the resources the rows were loaded from.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable sort by descending counter value.
    pub fn sort_by_counter_desc(&mut self, column: &str) {
        self.rows
            .sort_by(|a, b| b.counter(column).total_cmp(&a.counter(column)));
    }
}
