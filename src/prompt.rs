use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use crate::error::EvalError;

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` without a newline and returns the answer with the
    /// line terminator trimmed. End of input is an error.
    pub fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            return Err(EvalError::InvalidInput(format!(
                "input ended before answering `{}`",
                message.trim()
            ))
            .into());
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
