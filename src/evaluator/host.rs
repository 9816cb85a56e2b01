use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use crate::errors::errors::RuntimeError;

/// Console access for the built-in functions.
pub trait Host {
    /// Writes `text` followed by a line break.
    fn write_line(&mut self, text: &str) -> Result<(), RuntimeError>;
    /// Reads one line without its line break.
    fn read_line(&mut self) -> Result<String, RuntimeError>;
}

/// A host bound to the process' standard input and output.
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn write_line(&mut self, text: &str) -> Result<(), RuntimeError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, RuntimeError> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// A host that reads from a queue of prepared lines and records everything written.
///
/// Reading past the prepared input yields empty lines.
#[derive(Debug, Default)]
pub struct BufferedHost {
    pub input: VecDeque<String>,
    pub output: Vec<String>,
}

impl BufferedHost {
    pub fn new() -> Self {
        BufferedHost::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferedHost {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }
}

impl Host for BufferedHost {
    fn write_line(&mut self, text: &str) -> Result<(), RuntimeError> {
        self.output.push(text.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, RuntimeError> {
        Ok(self.input.pop_front().unwrap_or_default())
    }
}
