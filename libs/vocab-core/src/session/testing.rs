//! Scripted prompt and key-press doubles for driving a review without a
//! terminal.

use crate::error::{Result, VocabError};
use crate::prompt::{AdvanceGate, Prompter, Signal};
use std::collections::VecDeque;

/// Replays canned answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
    pub said: Vec<String>,
    /// Questions and messages in the order they happened.
    pub transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            said: Vec::new(),
            transcript: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, message: &str) -> Result<()> {
        self.said.push(message.to_string());
        self.transcript.push(message.to_string());
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.asked.push(question.to_string());
        self.transcript.push(question.to_string());
        self.answers.pop_front().ok_or(VocabError::InputClosed)
    }
}

/// Replays key presses, then keeps advancing once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedGate {
    signals: VecDeque<Signal>,
    pub waits: usize,
}

impl ScriptedGate {
    pub fn new(signals: impl IntoIterator<Item = Signal>) -> Self {
        Self {
            signals: signals.into_iter().collect(),
            waits: 0,
        }
    }

    /// A gate that always advances.
    pub fn advancing() -> Self {
        Self::default()
    }
}

impl AdvanceGate for ScriptedGate {
    fn wait(&mut self) -> Result<Signal> {
        self.waits += 1;
        Ok(self.signals.pop_front().unwrap_or(Signal::Advance))
    }
}
