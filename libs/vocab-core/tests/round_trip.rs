//! Load, merge, review and write back against real files.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use vocab_core::session::testing::{ScriptedGate, ScriptedPrompter};
use vocab_core::{
    combine, write_back, BackupMode, Cell, FileStore, ReviewConfig, ReviewSession, Row, Sheet,
    SheetStore, TableLoader,
};

const COLUMNS: [&str; 6] = ["words", "remember", "definition", "complement", "times", "importance"];

fn config(root: &Path, suffix: &str) -> ReviewConfig {
    let config = ReviewConfig {
        input_dir: root.join("words"),
        file_suffix: suffix.to_string(),
        enable_backup: true,
        backup_mode: BackupMode::Move,
        backup_dir: root.join("backup"),
        output_dir: root.join("words"),
        ..ReviewConfig::default()
    };
    fs::create_dir_all(&config.input_dir).unwrap();
    config
}

fn word_sheet(words: &[(&str, Option<f64>)]) -> Sheet {
    Sheet {
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: words
            .iter()
            .map(|(word, times)| {
                vec![
                    Cell::Text(word.to_string()),
                    Cell::Text(format!("{word} mnemonic")),
                    Cell::Text(format!("{word} meaning")),
                    Cell::Empty,
                    times.map(Cell::Number).unwrap_or(Cell::Empty),
                    Cell::Number(1.0),
                ]
            })
            .collect(),
    }
}

fn seed(config: &ReviewConfig) {
    FileStore
        .write(
            &config.input_path(&config.file_name(1)),
            &word_sheet(&[("abate", Some(0.0)), ("laconic", Some(1.0)), ("zeal", None)]),
        )
        .unwrap();
    FileStore
        .write(
            &config.input_path(&config.file_name(2)),
            &word_sheet(&[("venal", Some(2.0)), ("quell", Some(0.0))]),
        )
        .unwrap();
}

fn times_by_word(rows: &[Row]) -> Vec<(String, f64)> {
    rows.iter()
        .map(|r| (r.get("words").to_string(), r.counter("times")))
        .collect()
}

fn review_first_row_wrong(suffix: &str) {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), suffix);
    seed(&config);

    let mut loader = TableLoader::new(config.clone());
    let report = loader.load_all(&[1, 2, 9]);
    assert_eq!(report.loaded.len(), 2);
    assert_eq!(report.skipped.len(), 1);

    let mut combined = combine(&loader).unwrap().unwrap();
    assert_eq!(combined.len(), 5);
    assert!(combined.rows().iter().all(|r| !r.get("times").is_empty()));
    assert!(config.backup_path(&config.file_name(1)).exists());
    assert!(!config.input_path(&config.file_name(1)).exists());

    // no sort, sequential, first wrong, the rest right
    let mut prompter = ScriptedPrompter::new(["0", "1", "0", "1", "1", "1", "1"]);
    let summary = ReviewSession::new(
        &config,
        &mut prompter,
        ScriptedGate::advancing(),
        StdRng::seed_from_u64(1),
    )
    .run(&mut combined)
    .unwrap();
    assert_eq!(summary.reviewed, 5);
    assert_eq!(summary.mistakes, 1);

    let written = write_back(&FileStore, &combined, &config.output_dir).unwrap();
    assert_eq!(written.len(), 2);

    let reload_config = ReviewConfig {
        enable_backup: false,
        ..config.clone()
    };
    let mut reloaded = TableLoader::new(reload_config);
    reloaded.load_all(&[1, 2]);

    let day1 = reloaded.get(&config.file_name(1)).unwrap();
    assert_eq!(
        times_by_word(&day1.rows),
        vec![
            ("abate".to_string(), 1.0),
            ("laconic".to_string(), 1.0),
            ("zeal".to_string(), 0.0),
        ]
    );
    assert!(day1.columns.iter().all(|c| c != "origin"));

    let day2 = reloaded.get(&config.file_name(2)).unwrap();
    assert_eq!(
        times_by_word(&day2.rows),
        vec![("venal".to_string(), 2.0), ("quell".to_string(), 0.0)]
    );
    assert_eq!(day2.rows[0].get("definition"), &Cell::Text("venal meaning".to_string()));
}

#[test]
fn csv_round_trip_records_one_mistake() {
    review_first_row_wrong(".csv");
}

#[test]
fn xlsx_round_trip_records_one_mistake() {
    review_first_row_wrong(".xlsx");
}

#[test]
fn aborted_session_still_writes_unchanged_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), ".csv");
    seed(&config);

    let mut loader = TableLoader::new(config.clone());
    loader.load_all(&[1, 2]);
    let mut combined = combine(&loader).unwrap().unwrap();

    let mut prompter = ScriptedPrompter::new(["1", "7"]);
    let summary = ReviewSession::new(
        &config,
        &mut prompter,
        ScriptedGate::advancing(),
        StdRng::seed_from_u64(1),
    )
    .run(&mut combined)
    .unwrap();
    assert!(summary.aborted);

    write_back(&FileStore, &combined, &config.output_dir).unwrap();
    let day2 = FileStore
        .read(&config.output_dir.join(config.file_name(2)))
        .unwrap();
    assert_eq!(day2.rows.len(), 2);
}
