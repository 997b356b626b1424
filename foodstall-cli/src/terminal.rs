use foodstall_core::Money;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// One answer read from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Value(T),
    /// Input was present but did not parse
    Invalid,
    /// Input stream ended
    Closed,
}

/// Line-oriented prompt/answer I/O over any reader and writer
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn ask_parsed<T: FromStr>(&mut self, prompt: &str) -> io::Result<Reply<T>> {
        Ok(match self.ask(prompt)? {
            None => Reply::Closed,
            Some(text) => match text.parse() {
                Ok(value) => Reply::Value(value),
                Err(_) => Reply::Invalid,
            },
        })
    }

    pub fn ask_int(&mut self, prompt: &str) -> io::Result<Reply<i64>> {
        self.ask_parsed(prompt)
    }

    pub fn ask_money(&mut self, prompt: &str) -> io::Result<Reply<Money>> {
        self.ask_parsed(prompt)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
