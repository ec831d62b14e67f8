use crate::stage1_lex::source::Source;
use crate::stage1_lex::tokens::{Token, RESERVED};
use anyhow::{Error, Result};

/// One-token-lookahead scanner over a SNARL character stream. Construction
/// already scans the first token.
#[derive(Debug)]
pub struct Scanner {
    source: Source,
    token: Token,
    token_string: String,
    token_int: i32,
}
impl Scanner {
    pub fn new(text: &str) -> Result<Self> {
        let mut scanner = Self {
            source: Source::new(text),
            token: Token::EndFile,
            token_string: String::new(),
            token_int: 0,
        };
        scanner.next_token()?;
        Ok(scanner)
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// Valid for name, string-constant and integer-constant tokens.
    pub fn token_string(&self) -> &str {
        &self.token_string
    }

    /// Valid for integer-constant tokens.
    pub fn token_int(&self) -> i32 {
        self.token_int
    }

    /// Build a fatal diagnostic at the current source position.
    pub fn error(&self, message: impl Into<String>) -> Error {
        self.source.error(message)
    }

    pub fn next_token(&mut self) -> Result<()> {
        loop {
            let token = match self.source.current() {
                None => Token::EndFile,
                Some(ch) => match ch {
                    ' ' | '\t' => {
                        self.source.next_char();
                        continue;
                    }
                    '#' => {
                        self.skip_comment();
                        continue;
                    }
                    '[' => self.single(Token::OpenBracket),
                    ']' => self.single(Token::CloseBracket),
                    '(' => self.single(Token::OpenParen),
                    ')' => self.single(Token::CloseParen),
                    ',' => self.single(Token::Comma),
                    ';' => self.single(Token::Semicolon),
                    '+' => self.single(Token::Plus),
                    '-' => self.single(Token::Dash),
                    '*' => self.single(Token::Star),
                    '/' => self.single(Token::Slash),
                    '=' => self.single(Token::Equal),
                    ':' => self.next_colon_or_assignment(),
                    '<' => self.next_less_comparison(),
                    '>' => self.next_greater_comparison(),
                    '"' => self.next_string_constant()?,
                    ch if ch.is_ascii_alphabetic() => self.next_name(),
                    ch if ch.is_ascii_digit() => self.next_int_constant()?,
                    _ => return Err(self.source.error("Unrecognized symbol.")),
                },
            };
            self.token = token;
            return Ok(());
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.source.next_char();
        token
    }

    fn next_colon_or_assignment(&mut self) -> Token {
        self.source.next_char();
        if self.source.current() == Some('=') {
            self.source.next_char();
            Token::ColonEqual
        } else {
            Token::Colon
        }
    }

    fn next_less_comparison(&mut self) -> Token {
        self.source.next_char();
        match self.source.current() {
            Some('>') => self.single(Token::LessGreater),
            Some('=') => self.single(Token::LessEqual),
            _ => Token::Less,
        }
    }

    fn next_greater_comparison(&mut self) -> Token {
        self.source.next_char();
        match self.source.current() {
            Some('=') => self.single(Token::GreaterEqual),
            _ => Token::Greater,
        }
    }

    /// A `"…"` literal. The closing quote must arrive before the line ends.
    fn next_string_constant(&mut self) -> Result<Token> {
        self.source.next_char();
        let mut text = String::new();
        loop {
            match self.source.current() {
                Some('"') => break,
                Some(ch) => {
                    if self.source.at_line_end() {
                        return Err(self
                            .source
                            .error("Missing closing quote for string constant."));
                    }
                    text.push(ch);
                    self.source.next_char();
                }
                None => {
                    return Err(self
                        .source
                        .error("Missing closing quote for string constant."))
                }
            }
        }
        self.source.next_char();
        self.token_string = text;
        Ok(Token::StringConstant)
    }

    fn next_int_constant(&mut self) -> Result<Token> {
        let mut text = String::new();
        while let Some(ch) = self.source.current() {
            if ch.is_ascii_digit() == false {
                break;
            }
            text.push(ch);
            self.source.next_char();
        }
        let value = text
            .parse::<i32>()
            .map_err(|_| self.source.error("Invalid integer constant."))?;
        self.token_int = value;
        self.token_string = text;
        Ok(Token::IntConstant)
    }

    /// A letter followed by letters and digits; reserved words take their
    /// own token.
    fn next_name(&mut self) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.source.current() {
            if ch.is_ascii_alphanumeric() == false {
                break;
            }
            text.push(ch);
            self.source.next_char();
        }
        let token = RESERVED.get(text.as_str()).copied().unwrap_or(Token::Name);
        self.token_string = text;
        token
    }

    /// `#` through end of line, newline included.
    fn skip_comment(&mut self) {
        self.source.next_char();
        while self.source.at_line_end() == false {
            self.source.next_char();
        }
        self.source.next_char();
    }
}
