//! Writes the combined table back out, one file per origin.

use crate::error::{Result, VocabError};
use crate::sheet::{Sheet, SheetStore};
use crate::types::{Cell, CombinedTable, Row, ORIGIN_COLUMN};
use std::fs;
use std::path::{Path, PathBuf};

/// Lay rows out in `columns` order, optionally with a trailing origin column.
pub(crate) fn rows_to_sheet<'a>(
    columns: &[String],
    rows: impl Iterator<Item = &'a Row>,
    with_origin: bool,
) -> Sheet {
    let mut header: Vec<String> = columns
        .iter()
        .filter(|c| c.as_str() != ORIGIN_COLUMN)
        .cloned()
        .collect();

    let rows = rows
        .map(|row| {
            let mut cells: Vec<Cell> = header.iter().map(|c| row.get(c).clone()).collect();
            if with_origin {
                cells.push(Cell::Text(row.origin().to_string()));
            }
            cells
        })
        .collect();

    if with_origin {
        header.push(ORIGIN_COLUMN.to_string());
    }

    Sheet {
        columns: header,
        rows,
    }
}

/// Every row must name one of the loaded sources.
fn check_origins(table: &CombinedTable) -> Result<()> {
    for (idx, row) in table.rows().iter().enumerate() {
        if row.origin().is_empty() {
            return Err(VocabError::DataIntegrity(format!("row {} has no origin", idx)));
        }
        if !table.sources().iter().any(|s| s == row.origin()) {
            return Err(VocabError::DataIntegrity(format!(
                "row {} has unknown origin {}",
                idx,
                row.origin()
            )));
        }
    }
    Ok(())
}

/// Partition `table` by origin and write each group to `dest/<origin>`.
///
/// Groups are written in the order their origin first appears. Returns the
/// written paths.
pub fn write_back<S: SheetStore>(store: &S, table: &CombinedTable, dest: &Path) -> Result<Vec<PathBuf>> {
    check_origins(table)?;
    fs::create_dir_all(dest)?;

    let mut origins: Vec<&str> = Vec::new();
    for row in table.rows() {
        if !origins.contains(&row.origin()) {
            origins.push(row.origin());
        }
    }

    let mut written = Vec::with_capacity(origins.len());
    for origin in origins {
        let group = table.rows().iter().filter(|r| r.origin() == origin);
        let sheet = rows_to_sheet(table.columns(), group, false);
        let path = dest.join(origin);
        store.write(&path, &sheet)?;
        tracing::info!("Saved {} rows to {}", sheet.rows.len(), path.display());
        written.push(path);
    }

    Ok(written)
}
