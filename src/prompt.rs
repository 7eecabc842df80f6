//! Line-based interactive prompts.
//!
//! Works over any `BufRead`/`Write` pair so tests can drive it with in-memory
//! buffers; `Prompter::stdio()` is the terminal version.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{AppError, Result};

pub struct Prompter<I, O> {
    input: I,
    output: O,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Free-text answer, trimmed. End of input yields an empty answer.
    pub fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "? {} ", message)?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Index of the chosen entry; re-asks until the answer is a listed number.
    pub fn select(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        writeln!(self.output, "? {}", message)?;
        for (idx, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", idx + 1, choice)?;
        }

        loop {
            write!(self.output, "  Answer [1-{}]: ", choices.len())?;
            self.output.flush()?;

            let answer = self.read_line()?.ok_or(AppError::InputClosed)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "  Please enter a number between 1 and {}",
                    choices.len()
                )?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
