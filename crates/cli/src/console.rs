//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use stockledger_infra::PersistenceError;
use stockledger_inventory::InventoryError;
use thiserror::Error;

/// Failure of a single menu command.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input ended while a prompt was waiting for an answer.
    #[error("end of input")]
    EndOfInput,
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: impl core::fmt::Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<(), ConsoleError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask for free text. The answer is taken verbatim.
    pub fn ask_text(&mut self, message: &str) -> Result<String, ConsoleError> {
        self.prompt(message)?;
        self.read_line()
    }

    /// Ask until the answer parses as `T`.
    pub fn ask<T>(&mut self, message: &str) -> Result<T, ConsoleError>
    where
        T: FromStr,
        T::Err: core::fmt::Display,
    {
        self.prompt(message)?;
        loop {
            let line = self.read_line()?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(input = %line, error = %e, "unparsable answer");
                    self.prompt(&format!("Invalid value ({e}), try again: "))?;
                }
            }
        }
    }
}
