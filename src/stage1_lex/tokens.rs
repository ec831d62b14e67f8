use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::{self, Display};

/// The SNARL token alphabet. Payloads (name text, string text, integer
/// value) live on the scanner, not the token.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Token {
    /* Reserved words */
    And,
    Begin,
    Code,
    Do,
    Else,
    End,
    If,
    Int,
    Not,
    Or,
    Proc,
    String,
    Then,
    Value,
    While,
    /* Punctuation */
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Colon,
    ColonEqual,
    Equal,
    Less,
    LessEqual,
    LessGreater,
    Greater,
    GreaterEqual,
    Plus,
    Dash,
    Star,
    Slash,
    /* Classes */
    Name,
    IntConstant,
    StringConstant,
    /* Sentinel */
    EndFile,
}

pub static RESERVED: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("and", Token::And);
    table.insert("begin", Token::Begin);
    table.insert("code", Token::Code);
    table.insert("do", Token::Do);
    table.insert("else", Token::Else);
    table.insert("end", Token::End);
    table.insert("if", Token::If);
    table.insert("int", Token::Int);
    table.insert("not", Token::Not);
    table.insert("or", Token::Or);
    table.insert("proc", Token::Proc);
    table.insert("string", Token::String);
    table.insert("then", Token::Then);
    table.insert("value", Token::Value);
    table.insert("while", Token::While);
    table
});

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match self {
            Self::And => "and",
            Self::Begin => "begin",
            Self::Code => "code",
            Self::Do => "do",
            Self::Else => "else",
            Self::End => "end",
            Self::If => "if",
            Self::Int => "int",
            Self::Not => "not",
            Self::Or => "or",
            Self::Proc => "proc",
            Self::String => "string",
            Self::Then => "then",
            Self::Value => "value",
            Self::While => "while",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::ColonEqual => ":=",
            Self::Equal => "=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::LessGreater => "<>",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Plus => "+",
            Self::Dash => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Name => "name",
            Self::IntConstant => "integer constant",
            Self::StringConstant => "string constant",
            Self::EndFile => "end of file",
        };
        write!(f, "{spelling}")
    }
}
