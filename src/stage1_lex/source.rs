use anyhow::Error;
use std::fmt::{self, Display};

/// A fatal compile diagnostic anchored at a source position. Rendered as
/// the 5-digit line number and the offending line, a caret under the
/// offending column, then the message.
#[derive(Debug)]
pub struct Diagnostic {
    line_number: usize,
    line: String,
    column: usize,
    message: String,
}
impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:05} {}", self.line_number, self.line)?;
        writeln!(f, "{}^", " ".repeat(self.column + 5))?;
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for Diagnostic {}

/// Character stream over SNARL source text, tracking the current line for
/// diagnostics. Each line behaves as if followed by a single blank; past
/// the last line the stream reports end of input.
#[derive(Debug)]
pub struct Source {
    lines: Vec<String>,
    line: Vec<char>,
    line_number: usize,
    line_index: usize,
    current: Option<char>,
    at_end: bool,
}
impl Source {
    pub fn new(text: &str) -> Self {
        let lines = text.lines().map(String::from).collect();
        let mut source = Self {
            lines,
            line: Vec::new(),
            line_number: 0,
            line_index: 0,
            current: None,
            at_end: false,
        };
        source.load_line();
        source.next_char();
        source
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn at_line_end(&self) -> bool {
        self.line_index >= self.line.len()
    }

    pub fn next_char(&mut self) {
        if self.at_line_end() {
            self.load_line();
        }
        if self.at_end {
            // The sentinel line holds the one end-of-input character.
            self.current = None;
            self.line_index = 1;
            return;
        }
        self.current = Some(self.line[self.line_index]);
        self.line_index += 1;
    }

    /// Lines are numbered as they load; past the last source line, one
    /// final end-of-file sentinel line loads and the stream freezes there.
    fn load_line(&mut self) {
        if self.at_end {
            return;
        }
        self.line_index = 0;
        match self.lines.get(self.line_number) {
            Some(text) => {
                self.line = text.chars().collect();
                self.line.push(' ');
            }
            None => {
                self.at_end = true;
                self.line.clear();
            }
        }
        self.line_number += 1;
    }

    /// Build a fatal diagnostic at the current position. The caret points
    /// at the most recently read character.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::new(Diagnostic {
            line_number: self.line_number,
            line: self.line.iter().collect(),
            column: self.line_index,
            message: message.into(),
        })
    }
}
