use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Line-oriented console the menu talks through. Input and output are
/// generic so the whole menu can be driven from memory in tests; colours and
/// screen clearing only happen when `interactive` is set.
pub struct Console<R, W> {
    input: R,
    output: W,
    interactive: bool,
    at_eof: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin/stdout. Styling is enabled only when
    /// stdout is a terminal.
    pub fn stdio() -> Self {
        let interactive = io::stdout().is_terminal();
        Self::new(io::stdin().lock(), io::stdout(), interactive)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over arbitrary input and output. `interactive` turns on
    /// colours and screen clearing; tests pass `false` to get plain text.
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
            at_eof: false,
        }
    }

    /// True once the input has been exhausted.
    pub fn at_eof(&self) -> bool {
        self.at_eof
    }

    /// Print `label` without a newline and read one line of input, without
    /// its line ending. End of input reads as an empty line.
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            self.at_eof = true;
            writeln!(self.output).context("failed to write output")?;
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Print one unstyled line.
    pub fn line(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write output")
    }

    /// Print a status line, coloured by `kind` when interactive.
    pub fn status(&mut self, kind: StatusKind, text: &str) -> Result<()> {
        if !self.interactive {
            return self.line(text);
        }
        match kind {
            StatusKind::Info => self.line(text.green()),
            StatusKind::Error => self.line(text.red()),
        }
    }

    /// Success or neutral status.
    pub fn info(&mut self, text: &str) -> Result<()> {
        self.status(StatusKind::Info, text)
    }

    /// Failure status. The menu routes every store error through here.
    pub fn error(&mut self, text: &str) -> Result<()> {
        self.status(StatusKind::Error, text)
    }

    /// Wipe the screen and home the cursor.
    pub fn clear(&mut self) -> Result<()> {
        if !self.interactive {
            return Ok(());
        }
        queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))
            .context("failed to clear screen")?;
        self.output.flush().context("failed to flush output")
    }

    /// Block until the user presses Enter.
    pub fn pause(&mut self) -> Result<()> {
        self.prompt("\nPress Enter to continue...").map(|_| ())
    }

    /// Give back the output sink, e.g. to inspect what a scripted run printed.
    pub fn into_output(self) -> W {
        self.output
    }
}
