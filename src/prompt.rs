//! Interactive confirmation

use std::io::{self, BufRead, Write};

/// Asks the user a yes/no question
pub trait Confirm {
    /// Returns true only on an explicit "y"
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Writes the prompt to `output` and reads a single answer line from `input`.
///
/// Only the exact answer `y` is affirmative. Empty input, end of input and
/// anything else (including `Y` or `yes`) decline. There is no timeout.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, answer on stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        let answer = answer
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(&answer);
        Ok(answer == "y")
    }
}
