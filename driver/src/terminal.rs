use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Resets the terminal and clears the scrollback.
const CLEAR_SEQUENCE: &str = "\x1Bc";

/// The interactive side of a build.
pub trait Terminal
{
    /// Asks a yes/no question and blocks for the answer.
    ///
    /// Only `y` (any case, surrounding whitespace ignored) is a yes. Empty
    /// input, end of input and read errors are all a no.
    fn confirm(
        &mut self,
        question: &str,
    ) -> bool;

    fn clear(&mut self);
}

/// A line based console, opened once per process.
///
/// Standard input stays locked for as long as the console lives.
pub struct Console<R, W>
where
    W: Write,
{
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout>
{
    pub fn stdio() -> Self
    {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(
        input: R,
        output: W,
    ) -> Self
    {
        Self { input, output }
    }

    fn ask(
        &mut self,
        question: &str,
    ) -> io::Result<String>
    {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();

        self.input.read_line(&mut answer)?;

        Ok(answer)
    }
}

impl<R, W> Terminal for Console<R, W>
where
    R: BufRead,
    W: Write,
{
    fn confirm(
        &mut self,
        question: &str,
    ) -> bool
    {
        match self.ask(question) {
            Ok(answer) => is_yes(&answer),
            Err(error) => {
                log::debug!("Treating failed prompt as a no: {error}");

                false
            }
        }
    }

    fn clear(&mut self)
    {
        if let Err(error) = write!(self.output, "{CLEAR_SEQUENCE}").and_then(|_| self.output.flush())
        {
            log::debug!("Failed to clear the terminal: {error}");
        }
    }
}

impl<R, W> Drop for Console<R, W>
where
    W: Write,
{
    fn drop(&mut self)
    {
        _ = self.output.flush();
    }
}

pub fn is_yes(answer: &str) -> bool
{
    answer.trim().eq_ignore_ascii_case("y")
}
