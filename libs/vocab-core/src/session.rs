//! Interactive review session.
//!
//! ```text
//! SelectOrder -> Presenting(row, field) -> Judging(row) -> Presenting(next) ... -> Done
//! ```
//!
//! Rows are revealed one display field at a time, each gated on the
//! advance key. After the last field the user judges the row; a wrong
//! answer adds one to the row's mistake counter.

use crate::config::ReviewConfig;
use crate::error::{Result, VocabError};
use crate::order::OrderMode;
use crate::prompt::{ask_flag, ask_integer, AdvanceGate, Prompter, Signal};
use crate::types::CombinedTable;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

const SORT_PROMPT: &str = "Review by mistake count? (1 = yes, 0 = no) ";
const ORDER_PROMPT: &str = "Review order? (1 = in order, 2 = shuffled) ";
const ALL_PROMPT: &str = "Shuffle all words? (1 = all, 0 = part) ";
const COUNT_PROMPT: &str = "How many words? ";
const JUDGE_PROMPT: &str = "Did you get it right? (1 = correct, 0 = wrong) ";
const WELCOME: &str =
    "Let's start! Press space to reveal the next field, or a to stop and see your results.";

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectOrder,
    Presenting { position: usize, field: usize },
    Judging { position: usize },
    Done,
}

/// Progress of the current run.
#[derive(Debug, Clone)]
struct SessionState {
    phase: Phase,
    mode: Option<OrderMode>,
    reviewed: usize,
    mistakes: usize,
    stopped_early: bool,
    aborted: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::SelectOrder,
            mode: None,
            reviewed: 0,
            mistakes: 0,
            stopped_early: false,
            aborted: false,
        }
    }
}

/// Reported when a session ends.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<OrderMode>,
    pub reviewed: usize,
    pub mistakes: usize,
    pub stopped_early: bool,
    pub aborted: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn message(&self) -> String {
        format!(
            "You reviewed {} words today and missed {}. Keep it up!",
            self.reviewed, self.mistakes
        )
    }
}

/// Drives one review run over a combined table.
pub struct ReviewSession<'a, P, G, R> {
    config: &'a ReviewConfig,
    prompter: P,
    gate: G,
    rng: R,
    state: SessionState,
    queue: Vec<usize>,
}

impl<'a, P, G, R> ReviewSession<'a, P, G, R>
where
    P: Prompter,
    G: AdvanceGate,
    R: Rng,
{
    pub fn new(config: &'a ReviewConfig, prompter: P, gate: G, rng: R) -> Self {
        Self {
            config,
            prompter,
            gate,
            rng,
            state: SessionState::default(),
            queue: Vec::new(),
        }
    }

    /// Run to completion, mutating counters in `table`.
    ///
    /// An invalid order choice ends the run without reviewing anything;
    /// the summary is still returned so the caller can write back.
    pub fn run(&mut self, table: &mut CombinedTable) -> Result<SessionSummary> {
        let started_at = Utc::now();

        while self.state.phase != Phase::Done {
            let next = self.step(table)?;
            tracing::debug!(?next, "session transition");
            self.state.phase = next;
        }

        let summary = SessionSummary {
            mode: self.state.mode,
            reviewed: self.state.reviewed,
            mistakes: self.state.mistakes,
            stopped_early: self.state.stopped_early,
            aborted: self.state.aborted,
            started_at,
            finished_at: Utc::now(),
        };
        self.prompter.say(&summary.message())?;
        tracing::info!(
            mode = summary.mode.map_or("none", |m| m.as_str()),
            reviewed = summary.reviewed,
            mistakes = summary.mistakes,
            "Review finished"
        );
        Ok(summary)
    }

    fn step(&mut self, table: &mut CombinedTable) -> Result<Phase> {
        match self.state.phase {
            Phase::SelectOrder => self.select_order(table),
            Phase::Presenting { position, field } => self.present(table, position, field),
            Phase::Judging { position } => self.judge(table, position),
            Phase::Done => Ok(Phase::Done),
        }
    }

    fn select_order(&mut self, table: &mut CombinedTable) -> Result<Phase> {
        if ask_flag(&mut self.prompter, SORT_PROMPT)? {
            table.sort_by_counter_desc(&self.config.counter_column);
        }

        let choice = self.prompter.ask(ORDER_PROMPT)?;
        self.prompter.say(WELCOME)?;
        let mode = match choice.trim() {
            "1" => OrderMode::Sequential,
            "2" => {
                if ask_flag(&mut self.prompter, ALL_PROMPT)? {
                    OrderMode::RandomFull
                } else {
                    let count = ask_integer(
                        &mut self.prompter,
                        COUNT_PROMPT,
                        "Please enter a positive whole number",
                        |v| v > 0,
                    )?;
                    OrderMode::RandomPartial(count as usize)
                }
            }
            _ => {
                self.prompter.say("Invalid input")?;
                self.state.aborted = true;
                return Ok(Phase::Done);
            }
        };

        self.state.mode = Some(mode);
        self.queue = mode.visit_order(table.len(), &mut self.rng);
        Ok(self.enter(0))
    }

    /// First phase for the row at `position` in the queue.
    fn enter(&self, position: usize) -> Phase {
        if position >= self.queue.len() {
            Phase::Done
        } else if self.config.display_columns().is_empty() {
            Phase::Judging { position }
        } else {
            Phase::Presenting { position, field: 0 }
        }
    }

    fn row_index(&self, position: usize) -> Result<usize> {
        self.queue
            .get(position)
            .copied()
            .ok_or_else(|| VocabError::DataIntegrity(format!("no row queued at {}", position)))
    }

    fn present(&mut self, table: &CombinedTable, position: usize, field: usize) -> Result<Phase> {
        let index = self.row_index(position)?;
        let row = table
            .row(index)
            .ok_or_else(|| VocabError::DataIntegrity(format!("row {} out of range", index)))?;

        let config = self.config;
        let columns = config.display_columns();
        self.prompter.say(&row.get(&columns[field]).to_string())?;

        match self.gate.wait()? {
            Signal::Stop => {
                self.prompter.say("Stopping review")?;
                self.state.stopped_early = true;
                Ok(Phase::Done)
            }
            Signal::Advance if field + 1 < columns.len() => Ok(Phase::Presenting {
                position,
                field: field + 1,
            }),
            Signal::Advance => Ok(Phase::Judging { position }),
        }
    }

    fn judge(&mut self, table: &mut CombinedTable, position: usize) -> Result<Phase> {
        let index = self.row_index(position)?;
        let correct = ask_flag(&mut self.prompter, JUDGE_PROMPT)?;

        if !correct {
            let row = table
                .row_mut(index)
                .ok_or_else(|| VocabError::DataIntegrity(format!("row {} out of range", index)))?;
            row.record_mistake(&self.config.counter_column);
            self.state.mistakes += 1;
        }
        self.state.reviewed += 1;

        Ok(self.enter(position + 1))
    }
}
