use std::fmt;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::source::CharSource;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Eof,
    Def,
    Extern,
    Ident(String),
    Number(f64),
    /// Any other character: operators, parens, commas, semicolons, and junk
    /// the parser will reject.
    Char(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Def => write!(f, "'def'"),
            Token::Extern => write!(f, "'extern'"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Number(value) => write!(f, "number {}", value),
            Token::Char(c) => write!(f, "'{}'", c),
        }
    }
}

/// 1-based line and column of a character in the input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

lazy_static! {
    // mirrors strtod on a buffer of digits and dots: "1.2.3" reads as 1.2
    static ref NUMBER_PREFIX_RE: Regex = Regex::new(r"^(\d+\.?\d*|\.\d+)").unwrap();
}

fn parse_number(buffer: &str) -> f64 {
    NUMBER_PREFIX_RE
        .find(buffer)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

pub struct Lexer<S> {
    source: S,
    /// `None` once the source is exhausted.
    last_char: Option<char>,
    line: usize,
    column: usize,
    token_start: Position,
}

impl<S: CharSource> Lexer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            // whitespace, so the first call fetches
            last_char: Some(' '),
            line: 1,
            column: 0,
            token_start: Position { line: 1, column: 1 },
        }
    }

    fn bump(&mut self) {
        if self.last_char.is_none() {
            return;
        }
        if self.last_char == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.last_char = self.source.next_char();
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Where the most recently returned token started.
    pub fn token_position(&self) -> Position {
        self.token_start
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        trace!("lexed {} at {}", token, self.token_start);
        token
    }

    fn scan(&mut self) -> Token {
        loop {
            while matches!(self.last_char, Some(c) if c.is_whitespace()) {
                self.bump();
            }
            self.token_start = self.position();

            let c = match self.last_char {
                Some(c) => c,
                None => return Token::Eof,
            };

            if c.is_alphabetic() {
                let mut ident = String::new();
                while let Some(c) = self.last_char.filter(|c| c.is_alphanumeric()) {
                    ident.push(c);
                    self.bump();
                }
                return match ident.as_str() {
                    "def" => Token::Def,
                    "extern" => Token::Extern,
                    _ => Token::Ident(ident),
                };
            }

            if c.is_ascii_digit() || c == '.' {
                let mut buffer = String::new();
                while let Some(c) = self.last_char.filter(|c| c.is_ascii_digit() || *c == '.') {
                    buffer.push(c);
                    self.bump();
                }
                return Token::Number(parse_number(&buffer));
            }

            if c == '#' {
                while !matches!(self.last_char, None | Some('\n') | Some('\r')) {
                    self.bump();
                }
                continue;
            }

            self.bump();
            return Token::Char(c);
        }
    }
}

/// lex the given input string up to (not including) the end of input
pub fn lex(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input.chars());
    let mut res = Vec::new();
    loop {
        match lexer.next_token() {
            Token::Eof => break,
            token => res.push(token),
        }
    }
    res
}
