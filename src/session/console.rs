//! Line-oriented console prompts
//!
//! Wraps a reader/writer pair behind the prompt discipline the session uses
//! everywhere: ask, re-ask the same question on invalid input, and watch
//! every data prompt for the reserved cancel token. Generic over the I/O
//! pair so session flows can be driven from in-memory buffers in tests.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::models::Money;
use crate::validate;

/// Reserved input that cancels the current flow back to the main menu
pub const CANCEL_TOKEN: &str = "esc";

/// Control signal threaded through every prompt and flow function
///
/// `Cancelled` is caught once, at the top of the session loop; the other
/// variants carry real failures out of a flow.
#[derive(Debug)]
pub enum Interrupt {
    /// The user typed the cancel token; unwind to the main menu
    Cancelled,
    /// A store operation failed mid-flow
    Failed(LedgerError),
    /// The terminal failed, or input was closed
    Io(io::Error),
}

impl From<io::Error> for Interrupt {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<LedgerError> for Interrupt {
    fn from(err: LedgerError) -> Self {
        Self::Failed(err)
    }
}

/// Result alias for everything that runs inside a session flow
pub type Flow<T> = Result<T, Interrupt>;

/// A prompt-driven console over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// Console over the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print a blank line
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Print preformatted text as-is (already newline-terminated)
    pub fn show(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    fn read_line(&mut self) -> Flow<String> {
        let mut buffer = String::new();
        let read = self.input.read_line(&mut buffer).map_err(Interrupt::Io)?;
        if read == 0 {
            // Closed input would otherwise spin the prompt loop forever
            return Err(Interrupt::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(buffer.trim().to_string())
    }

    /// Ask a question with no cancel-token handling (main menu and
    /// continue prompts, where `esc` is just another invalid answer)
    pub fn ask(&mut self, prompt: &str) -> Flow<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask a question, turning the cancel token into an immediate unwind
    pub fn ask_esc(&mut self, prompt: &str) -> Flow<String> {
        let answer = self.ask(prompt)?;
        if answer == CANCEL_TOKEN {
            Err(Interrupt::Cancelled)
        } else {
            Ok(answer)
        }
    }

    /// Loop a date prompt until the answer parses as `YYYYMMDD`
    pub fn prompt_date(&mut self, prompt: &str) -> Flow<NaiveDate> {
        loop {
            let answer = self.ask_esc(prompt)?;
            match validate::parse_date(&answer) {
                Ok(date) => return Ok(date),
                Err(_) => self.line("\nInvalid input, please re-enter\n")?,
            }
        }
    }

    /// Loop an amount prompt until the answer parses as a decimal
    pub fn prompt_amount(&mut self, prompt: &str) -> Flow<Money> {
        loop {
            let answer = self.ask_esc(prompt)?;
            match validate::parse_amount(&answer) {
                Ok(amount) => return Ok(amount),
                Err(_) => self.line("\nInvalid input, please re-enter\n")?,
            }
        }
    }

    /// Block until the user presses Enter
    pub fn pause(&mut self) -> Flow<()> {
        self.ask("Press Enter to continue...")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console_over<'a>(
        script: &str,
        output: &'a mut Vec<u8>,
    ) -> Console<Cursor<Vec<u8>>, &'a mut Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), output)
    }

    #[test]
    fn test_ask_trims_answer() {
        let mut output = Vec::new();
        let mut console = console_over("  hello  \n", &mut output);
        assert_eq!(console.ask("? ").unwrap(), "hello");
    }

    #[test]
    fn test_ask_esc_cancels() {
        let mut output = Vec::new();
        let mut console = console_over("esc\n", &mut output);
        assert!(matches!(
            console.ask_esc("? "),
            Err(Interrupt::Cancelled)
        ));
    }

    #[test]
    fn test_prompt_date_loops_until_valid() {
        let mut output = Vec::new();
        let mut console = console_over("yesterday\n2024-03-05\n20240305\n", &mut output);
        let date = console.prompt_date("Date: ").unwrap();
        assert_eq!(date.to_string(), "2024-03-05");

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid input, please re-enter").count(), 2);
    }

    #[test]
    fn test_prompt_amount_accepts_negative() {
        let mut output = Vec::new();
        let mut console = console_over("-12.50\n", &mut output);
        assert_eq!(console.prompt_amount("Amount: ").unwrap().cents(), -1250);
    }

    #[test]
    fn test_closed_input_is_io_error() {
        let mut output = Vec::new();
        let mut console = console_over("", &mut output);
        assert!(matches!(console.ask("? "), Err(Interrupt::Io(_))));
    }
}
