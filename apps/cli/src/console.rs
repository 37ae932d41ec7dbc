//! Terminal implementations of the prompt and advance-key capabilities.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use vocab_core::{AdvanceGate, Prompter, Result, Signal, VocabError};

/// Line prompts over any reader/writer pair.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(VocabError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Space advances, `a` (or Ctrl+C) stops.
#[derive(Debug, Default)]
pub struct KeyGate;

impl AdvanceGate for KeyGate {
    fn wait(&mut self) -> Result<Signal> {
        terminal::enable_raw_mode()?;
        let signal = read_signal();
        terminal::disable_raw_mode()?;
        signal
    }
}

fn read_signal() -> Result<Signal> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char(' ') => return Ok(Signal::Advance),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(Signal::Stop)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => return Ok(Signal::Stop),
            _ => {}
        }
    }
}
