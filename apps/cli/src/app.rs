//! One review run: ask for files, load, merge, review, write back.

use anyhow::{Context, Result};
use rand::Rng;
use vocab_core::{
    ask_integer, combine, write_back, AdvanceGate, Prompter, ReviewConfig, ReviewSession,
    TableLoader,
};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file count was not a positive integer.
    InvalidInput,
    /// No file could be loaded; nothing was reviewed or written.
    NothingLoaded,
    Completed,
}

/// Ask how many files to load and their numbers.
///
/// Returns `None` when the count is not a positive integer. Bad numbers
/// are asked again.
pub fn ask_file_numbers<P: Prompter>(prompter: &mut P) -> Result<Option<Vec<i64>>> {
    let answer = prompter.ask("How many files to load (m)? ")?;
    let count = match answer.trim().parse::<i64>() {
        Ok(m) if m > 0 => m as usize,
        Ok(_) => {
            prompter.say("Input error: m must be a positive integer")?;
            return Ok(None);
        }
        Err(e) => {
            prompter.say(&format!("Input error: {}", e))?;
            return Ok(None);
        }
    };

    let mut numbers = Vec::new();
    for i in 0..count {
        let number = ask_integer(
            prompter,
            &format!("Enter number {}/{}: ", i + 1, count),
            "Please enter a valid integer",
            |_| true,
        )?;
        numbers.push(number);
    }
    Ok(Some(numbers))
}

pub fn run<P, G, R>(config: &ReviewConfig, prompter: &mut P, gate: G, rng: R) -> Result<Outcome>
where
    P: Prompter,
    G: AdvanceGate,
    R: Rng,
{
    let Some(numbers) = ask_file_numbers(prompter)? else {
        return Ok(Outcome::InvalidInput);
    };

    let mut loader = TableLoader::new(config.clone());
    let report = loader.load_all(&numbers);
    for name in &report.loaded {
        prompter.say(&format!("Loaded: {}", name))?;
    }
    for skipped in &report.skipped {
        prompter.say(&format!("Failed to load {}: {}", skipped.name, skipped.error))?;
    }

    let Some(mut combined) = combine(&loader).context("Failed to combine tables")? else {
        prompter.say("No data to combine")?;
        return Ok(Outcome::NothingLoaded);
    };
    if let Some(path) = &config.combined_output {
        prompter.say(&format!("Combined data saved to: {}", path.display()))?;
    }

    // Written back even when the order choice was invalid.
    ReviewSession::new(config, &mut *prompter, gate, rng).run(&mut combined)?;

    let written = write_back(loader.store(), &combined, &config.output_dir)
        .context("Failed to write results")?;
    for path in written {
        prompter.say(&format!("Saved: {}", path.display()))?;
    }

    Ok(Outcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use vocab_core::session::testing::{ScriptedGate, ScriptedPrompter};
    use vocab_core::{BackupMode, FileStore, SheetStore};

    const HEADER: &str = "words,remember,definition,complement,times,importance";

    fn config(root: &std::path::Path) -> ReviewConfig {
        let config = ReviewConfig {
            input_dir: root.join("in"),
            file_suffix: ".csv".to_string(),
            backup_mode: BackupMode::Copy,
            backup_dir: root.join("backup"),
            output_dir: root.join("out"),
            ..ReviewConfig::default()
        };
        fs::create_dir_all(&config.input_dir).unwrap();
        config
    }

    fn run_with(config: &ReviewConfig, answers: &[&str]) -> (Outcome, ScriptedPrompter) {
        let mut prompter = ScriptedPrompter::new(answers.iter().copied());
        let code = run(
            config,
            &mut prompter,
            ScriptedGate::advancing(),
            StdRng::seed_from_u64(9),
        )
        .unwrap();
        (code, prompter)
    }

    #[test]
    fn non_positive_count_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (code, prompter) = run_with(&config(dir.path()), &["0"]);
        assert_eq!(code, Outcome::InvalidInput);
        assert_eq!(prompter.said, vec!["Input error: m must be a positive integer"]);
    }

    #[test]
    fn non_numeric_count_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (code, prompter) = run_with(&config(dir.path()), &["two"]);
        assert_eq!(code, Outcome::InvalidInput);
        assert!(prompter.said[0].starts_with("Input error:"));
    }

    #[test]
    fn bad_file_number_is_asked_again() {
        let mut prompter = ScriptedPrompter::new(["2", "x", "1", "3"]);
        let numbers = ask_file_numbers(&mut prompter).unwrap();
        assert_eq!(numbers, Some(vec![1, 3]));
        assert_eq!(prompter.said, vec!["Please enter a valid integer"]);
    }

    #[test]
    fn huge_count_asks_without_preallocating() {
        let mut prompter = ScriptedPrompter::new(["9223372036854775807", "1"]);
        let result = ask_file_numbers(&mut prompter);

        assert!(result.is_err());
        assert_eq!(prompter.asked.len(), 3);
        assert_eq!(prompter.asked[2], "Enter number 2/9223372036854775807: ");
    }

    #[test]
    fn nothing_loaded_skips_review() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let (code, prompter) = run_with(&config, &["1", "5"]);

        assert_eq!(code, Outcome::NothingLoaded);
        assert!(prompter.said[0].starts_with("Failed to load words_day5.csv"));
        assert_eq!(prompter.said.last().map(String::as_str), Some("No data to combine"));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn full_run_writes_updated_counters() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        fs::write(
            config.input_path("words_day1.csv"),
            format!("{HEADER}\nabate,a,lessen,,0,1\nzeal,z,passion,,,0\n"),
        )
        .unwrap();

        let (code, prompter) = run_with(&config, &["1", "1", "0", "1", "0", "1"]);
        assert_eq!(code, Outcome::Completed);
        assert!(prompter.said.contains(&"Loaded: words_day1.csv".to_string()));

        let sheet = FileStore.read(&config.output_dir.join("words_day1.csv")).unwrap();
        let times: Vec<String> = sheet.rows.iter().map(|r| r[4].to_string()).collect();
        assert_eq!(times, vec!["1", "0"]);
        assert!(config.backup_path("words_day1.csv").exists());
    }
}
