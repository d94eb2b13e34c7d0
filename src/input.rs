//! Validated console input collection.
//!
//! The input source and output sink are injected so the retry loops can be
//! driven from scripted buffers in tests instead of a real console.

use std::io::{self, BufRead, Write};

/// Couples a line-oriented input source with an output sink for prompts.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Builds a prompter over the process stdin/stdout.
    pub fn console() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Builds a prompter over arbitrary reader/writer pairs.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompter and returns the output sink, so scripted tests
    /// can inspect everything that was written.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line to the output sink.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the sink cannot be written.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Prompts until a line parses as `f64` and returns the parsed value.
    ///
    /// Retries indefinitely on non-numeric input; never returns an invalid
    /// value. Input is trimmed before parsing.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::UnexpectedEof` if the source is exhausted
    /// before a valid number is supplied.
    pub fn ask_number(&mut self, prompt: &str) -> io::Result<f64> {
        loop {
            let line = self.prompt_line(prompt)?;
            match line.trim().parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Please enter a valid number like 12.5")?,
            }
        }
    }

    /// Prompts until the trimmed line exactly matches one of `allowed`.
    ///
    /// Comparison is an exact string match, no case folding. The valid
    /// choices are echoed on every miss.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::UnexpectedEof` if the source is exhausted
    /// before a valid choice is supplied.
    pub fn ask_menu(&mut self, prompt: &str, allowed: &[&str]) -> io::Result<String> {
        loop {
            let line = self.prompt_line(prompt)?;
            let choice = line.trim();
            if allowed.contains(&choice) {
                return Ok(choice.to_string());
            }
            self.say(&format!(
                "Invalid choice. Pick one of: {}",
                allowed.join(", ")
            ))?;
        }
    }

    /// Writes the prompt (no trailing newline) and reads one input line.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input source exhausted while waiting for a value",
            ));
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::Prompter;

    fn scripted(lines: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(lines.as_bytes(), Vec::new())
    }

    #[test]
    fn ask_number_returns_exact_parsed_value() {
        let mut p = scripted("12.5\n");
        let value = p.ask_number("kWh: ").expect("valid input should parse");
        assert_eq!(value, 12.5);
    }

    #[test]
    fn ask_number_retries_until_valid() {
        let mut p = scripted("abc\n\ntwelve\n7\n");
        let value = p.ask_number("kWh: ").expect("eventually valid");
        assert_eq!(value, 7.0);
    }

    #[test]
    fn ask_number_accepts_negative_and_trims_whitespace() {
        let mut p = scripted("  -3.25  \n");
        let value = p.ask_number("dT: ").expect("negative values accepted");
        assert_eq!(value, -3.25);
    }

    #[test]
    fn ask_number_eof_is_an_error() {
        let mut p = scripted("not-a-number\n");
        let err = p.ask_number("kWh: ").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn ask_menu_returns_immediately_on_valid_choice() {
        let mut p = scripted("2\n");
        let choice = p.ask_menu("> ", &["1", "2", "3"]).expect("valid choice");
        assert_eq!(choice, "2");
    }

    #[test]
    fn ask_menu_loops_on_invalid_choices() {
        let mut p = scripted("9\nx\n 3 \n");
        let choice = p.ask_menu("> ", &["1", "2", "3"]).expect("third try valid");
        assert_eq!(choice, "3");
    }

    #[test]
    fn ask_menu_is_case_sensitive() {
        let mut p = scripted("Q\nq\n");
        let choice = p.ask_menu("> ", &["q"]).expect("lowercase q matches");
        assert_eq!(choice, "q");
    }

    #[test]
    fn prompts_and_errors_reach_the_sink() {
        let mut p = Prompter::new("oops\n5\n".as_bytes(), Vec::new());
        p.ask_number("Enter kWh: ").expect("second line valid");
        let out = String::from_utf8(p.output).expect("utf-8 output");
        assert!(out.contains("Enter kWh: "));
        assert!(out.contains("valid number"));
    }
}
