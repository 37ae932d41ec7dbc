//! Concatenates loaded source tables into one combined table.

use crate::error::Result;
use crate::loader::TableLoader;
use crate::sheet::SheetStore;
use crate::types::CombinedTable;
use crate::writer::rows_to_sheet;

/// Combine every loaded table in load order.
///
/// Returns `None` when nothing was loaded. When `combined_output` is
/// configured the merged table, origin column included, is saved there.
pub fn combine<S: SheetStore>(loader: &TableLoader<S>) -> Result<Option<CombinedTable>> {
    if loader.tables().is_empty() {
        tracing::warn!("No tables loaded, nothing to combine");
        return Ok(None);
    }

    let combined = CombinedTable::concat(loader.tables());
    tracing::info!(
        "Combined {} rows from {} files",
        combined.len(),
        combined.sources().len()
    );

    if let Some(path) = &loader.config().combined_output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let sheet = rows_to_sheet(combined.columns(), combined.rows().iter(), true);
        loader.store().write(path, &sheet)?;
        tracing::info!("Saved combined table to {}", path.display());
    }

    Ok(Some(combined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReviewConfig;
    use crate::sheet::FileStore;
    use crate::types::{Cell, ORIGIN_COLUMN};
    use pretty_assertions::assert_eq;
    use std::fs;

    const HEADER: &str = "words,remember,definition,complement,times,importance";

    fn config(dir: &std::path::Path) -> ReviewConfig {
        let config = ReviewConfig {
            input_dir: dir.join("in"),
            file_suffix: ".csv".to_string(),
            enable_backup: false,
            ..ReviewConfig::default()
        };
        fs::create_dir_all(&config.input_dir).unwrap();
        config
    }

    #[test]
    fn nothing_loaded_gives_none() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TableLoader::new(config(dir.path()));
        assert!(combine(&loader).unwrap().is_none());
    }

    #[test]
    fn combine_keeps_load_order_and_origins() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fs::write(
            config.input_path("words_day1.csv"),
            format!("{HEADER}\na,,,,0,\nb,,,,1,\nc,,,,,\n"),
        )
        .unwrap();
        fs::write(
            config.input_path("words_day2.csv"),
            format!("{HEADER}\nd,,,,2,\ne,,,,0,\n"),
        )
        .unwrap();

        let mut loader = TableLoader::new(config);
        loader.load_all(&[2, 1]);
        let combined = combine(&loader).unwrap().unwrap();

        assert_eq!(combined.len(), 5);
        let words: Vec<String> = combined.rows().iter().map(|r| r.get("words").to_string()).collect();
        assert_eq!(words, vec!["d", "e", "a", "b", "c"]);
        assert!(combined.rows().iter().all(|r| !r.get("times").is_empty()));
        assert!(combined
            .rows()
            .iter()
            .all(|r| combined.sources().iter().any(|s| s == r.origin())));
    }

    #[test]
    fn combined_output_includes_origin_column() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.combined_output = Some(dir.path().join("merged").join("all.csv"));
        fs::write(config.input_path("words_day1.csv"), format!("{HEADER}\na,,,,0,\n")).unwrap();

        let mut loader = TableLoader::new(config.clone());
        loader.load_all(&[1]);
        combine(&loader).unwrap();

        let sheet = FileStore.read(config.combined_output.as_ref().unwrap()).unwrap();
        assert_eq!(sheet.columns.last().map(String::as_str), Some(ORIGIN_COLUMN));
        assert_eq!(
            sheet.rows[0].last(),
            Some(&Cell::Text("words_day1.csv".to_string()))
        );
    }
}
