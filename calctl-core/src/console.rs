//! Prompt/response plumbing between the operator and the operations.
//!
//! Operations never touch stdin directly: they read through a [`LineSource`],
//! which lets tests drive a whole session from a script.

use std::io::{self, BufRead, Write};

use crate::error::{CalctlError, CalctlResult};

/// Yields one line of operator input per call, `None` once input is exhausted.
pub trait LineSource {
    fn read_line(&mut self) -> CalctlResult<Option<String>>;
}

/// Lines from the process's standard input.
#[derive(Default)]
pub struct StdinLines;

impl LineSource for StdinLines {
    fn read_line(&mut self) -> CalctlResult<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }
}

pub struct Console<L, W> {
    lines: L,
    out: W,
}

impl Console<StdinLines, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(StdinLines, io::stdout())
    }
}

impl<L: LineSource, W: Write> Console<L, W> {
    pub fn new(lines: L, out: W) -> Self {
        Console { lines, out }
    }

    /// Print `label: ` and return the next input line, trimmed.
    pub fn prompt(&mut self, label: &str) -> CalctlResult<String> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;

        match self.lines.read_line()? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(CalctlError::InputClosed),
        }
    }

    /// Yes/no gate: only a case-insensitive `y` counts as yes.
    pub fn confirm(&mut self, label: &str) -> CalctlResult<bool> {
        let answer = self.prompt(&format!("{label} (y/n)"))?;
        Ok(answer.eq_ignore_ascii_case("y"))
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<L, W: Write> Write for Console<L, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
