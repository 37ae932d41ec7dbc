//! Console interaction capabilities.
//!
//! The review loop talks to the user only through these traits, so tests
//! can drive it with scripted answers and key presses.

use crate::error::Result;

/// Outcome of waiting on the advance key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Reveal the next field.
    Advance,
    /// End the session now.
    Stop,
}

/// Line-oriented prompts.
pub trait Prompter {
    /// Show a line to the user.
    fn say(&mut self, message: &str) -> Result<()>;

    /// Ask a question and return the answer line without its newline.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Blocks until the user presses the advance (or stop) key.
pub trait AdvanceGate {
    fn wait(&mut self) -> Result<Signal>;
}

impl<T: Prompter + ?Sized> Prompter for &mut T {
    fn say(&mut self, message: &str) -> Result<()> {
        (**self).say(message)
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

impl<T: AdvanceGate + ?Sized> AdvanceGate for &mut T {
    fn wait(&mut self) -> Result<Signal> {
        (**self).wait()
    }
}

/// Ask until the answer parses as an integer accepted by `accept`.
pub fn ask_integer<P, F>(prompter: &mut P, question: &str, hint: &str, accept: F) -> Result<i64>
where
    P: Prompter + ?Sized,
    F: Fn(i64) -> bool,
{
    loop {
        let answer = prompter.ask(question)?;
        match answer.trim().parse::<i64>() {
            Ok(value) if accept(value) => return Ok(value),
            _ => prompter.say(hint)?,
        }
    }
}

/// Ask a yes/no question answered with 1 or 0.
pub fn ask_flag<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Result<bool> {
    let value = ask_integer(prompter, question, "Please enter 1 or 0", |v| v == 0 || v == 1)?;
    Ok(value == 1)
}
