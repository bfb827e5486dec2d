//! Line-oriented prompt and output used by the REPL and by every command.
use crate::error::{QuizError, Result};
use std::io::{BufRead, Write};

/// Reads answers from `input` and writes prompts and output lines to `output`.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one raw line without the line terminator, `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Shows `prompt` and waits for the user's answer.
    pub fn question(&mut self, prompt: &str) -> Result<String> {
        if prompt.ends_with('?') {
            write!(self.output, "{prompt} ")?;
        } else {
            write!(self.output, "{prompt}: ")?;
        }
        self.output.flush()?;
        self.read_line()?.ok_or(QuizError::InputClosed)
    }

    pub fn log(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Prints the top-level `> ` prompt.
    pub fn prompt(&mut self) -> Result<()> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
