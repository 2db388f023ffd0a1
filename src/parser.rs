use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::{ASTNode, Expression, Function, Prototype};
use crate::error::{OperatorError, ParserError};
use crate::lexer::{Lexer, Position, Token};
use crate::source::CharSource;

lazy_static! {
    static ref DEFAULT_PRECEDENCE: HashMap<char, i32> = {
        let mut operator_precedence = HashMap::new();
        operator_precedence.insert('<', 10);
        operator_precedence.insert('+', 20);
        operator_precedence.insert('-', 20);
        operator_precedence.insert('*', 40);
        operator_precedence
    };
}

/// Characters with a fixed grammatical role that can never be infix operators.
const RESERVED: &[char] = &['(', ')', ',', ';', '#', '.'];

pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub operators: HashMap<char, i32>,
    /// How deeply parenthesized groups and call arguments may nest before
    /// parsing gives up instead of exhausting the stack.
    pub max_depth: usize,
}

impl std::default::Default for ParserConfig {
    fn default() -> Self {
        Self {
            operators: DEFAULT_PRECEDENCE.clone(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn register_operator(&mut self, op: char, precedence: i32) -> Result<Option<i32>, OperatorError> {
        if !op.is_ascii_graphic() || op.is_ascii_alphanumeric() || RESERVED.contains(&op) {
            return Err(OperatorError::ReservedCharacter(op));
        }
        if precedence <= 0 {
            return Err(OperatorError::NonPositivePrecedence(op, precedence));
        }
        Ok(self.operators.insert(op, precedence))
    }
}

pub type PartialParseResult = Result<Expression, ParserError>;

pub struct Parser<S> {
    lexer: Lexer<S>,
    current: Token,
    position: Position,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<std::str::Chars<'a>> {
    pub fn from_source_str(input: &'a str) -> Self {
        Self::new(Lexer::new(input.chars()))
    }
}

impl<S: CharSource> Parser<S> {
    pub fn new(lexer: Lexer<S>) -> Self {
        Self::with_config(lexer, ParserConfig::default())
    }

    /// Builds a parser and primes the lookahead with the first token.
    pub fn with_config(lexer: Lexer<S>, config: ParserConfig) -> Self {
        let mut parser = Self {
            lexer,
            current: Token::Eof,
            position: Position { line: 1, column: 1 },
            config,
            depth: 0,
        };
        parser.advance();
        parser
    }

    pub fn register_operator(&mut self, op: char, precedence: i32) -> Result<Option<i32>, OperatorError> {
        self.config.register_operator(op, precedence)
    }

    pub fn remove_operator(&mut self, op: char) -> Option<i32> {
        self.config.operators.remove(&op)
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_position(&self) -> Position {
        self.position
    }

    /// Discards the lookahead and fetches the next token.
    pub fn advance(&mut self) {
        self.current = self.lexer.next_token();
        self.position = self.lexer.token_position();
    }

    fn expected(&self, expected: &'static str) -> ParserError {
        ParserError::Expected {
            expected,
            found: self.current.clone(),
            position: self.position,
        }
    }

    fn expect_char(&mut self, c: char, expected: &'static str) -> Result<(), ParserError> {
        if self.current != Token::Char(c) {
            return Err(self.expected(expected));
        }
        self.advance();
        Ok(())
    }

    /// -1 for anything that is not a registered infix operator.
    fn token_precedence(&self) -> i32 {
        match self.current {
            Token::Char(c) => match self.config.operators.get(&c) {
                Some(&precedence) if precedence > 0 => precedence,
                _ => -1,
            },
            _ => -1,
        }
    }

    fn parse_number(&mut self, value: f64) -> PartialParseResult {
        self.advance();
        Ok(Expression::Number(value))
    }

    fn parse_identifier(&mut self, ident: String) -> PartialParseResult {
        self.advance();
        if self.current != Token::Char('(') {
            return Ok(Expression::Variable(ident));
        }
        self.advance();

        let mut args = Vec::new();
        if self.current != Token::Char(')') {
            loop {
                args.push(self.parse_expr()?);
                match self.current {
                    Token::Char(')') => break,
                    Token::Char(',') => self.advance(),
                    _ => return Err(self.expected("')' or ',' in argument list")),
                }
            }
        }
        self.advance();

        Ok(Expression::Call(ident, args))
    }

    fn parse_nested(&mut self) -> PartialParseResult {
        self.advance();
        let res = self.parse_expr()?;
        self.expect_char(')', "')'")?;
        Ok(res)
    }

    fn parse_primary(&mut self) -> PartialParseResult {
        match self.current.clone() {
            Token::Ident(ident) => self.parse_identifier(ident),
            Token::Number(value) => self.parse_number(value),
            Token::Char('(') => self.parse_nested(),
            found => Err(ParserError::UnexpectedToken {
                found,
                position: self.position,
            }),
        }
    }

    fn parse_rhs(&mut self, expr_precedence: i32, lhs: Expression) -> PartialParseResult {
        let mut result = lhs;

        loop {
            let precedence = self.token_precedence();
            if precedence < expr_precedence {
                return Ok(result);
            }
            let operator = match self.current {
                Token::Char(op) => op,
                _ => return Ok(result),
            };
            self.advance();

            let mut rhs = self.parse_primary()?;

            if precedence < self.token_precedence() {
                rhs = self.parse_rhs(precedence + 1, rhs)?;
            }

            result = Expression::Binary(operator, Box::new(result), Box::new(rhs));
        }
    }

    pub fn parse_expr(&mut self) -> PartialParseResult {
        if self.depth >= self.config.max_depth {
            return Err(ParserError::NestingTooDeep {
                limit: self.config.max_depth,
                position: self.position,
            });
        }
        self.depth += 1;
        let res = self
            .parse_primary()
            .and_then(|lhs| self.parse_rhs(0, lhs));
        self.depth -= 1;
        res
    }

    pub fn parse_prototype(&mut self) -> Result<Prototype, ParserError> {
        let name = match &self.current {
            Token::Ident(name) => name.clone(),
            _ => return Err(self.expected("function name in prototype")),
        };
        self.advance();
        if self.current != Token::Char('(') {
            return Err(self.expected("'(' in prototype"));
        }

        let mut args = Vec::new();
        self.advance();
        while let Token::Ident(arg) = &self.current {
            args.push(arg.clone());
            self.advance();
        }
        self.expect_char(')', "')' in prototype")?;

        Ok(Prototype { name, args })
    }

    pub fn parse_definition(&mut self) -> Result<Function, ParserError> {
        self.advance();
        let prototype = self.parse_prototype()?;
        let body = self.parse_expr()?;
        Ok(Function { prototype, body })
    }

    pub fn parse_extern(&mut self) -> Result<Prototype, ParserError> {
        self.advance();
        self.parse_prototype()
    }

    pub fn parse_top_level_expr(&mut self) -> Result<Function, ParserError> {
        self.parse_expr().map(Function::anonymous)
    }

    /// Parses one top-level form starting at the current token. Returns `None`
    /// at end of input; `;` separators are skipped.
    pub fn parse_top_level(&mut self) -> Option<Result<ASTNode, ParserError>> {
        loop {
            let node = match self.current {
                Token::Eof => return None,
                Token::Char(';') => {
                    self.advance();
                    continue;
                }
                Token::Def => self.parse_definition().map(ASTNode::Function),
                Token::Extern => self.parse_extern().map(ASTNode::Extern),
                _ => self.parse_top_level_expr().map(ASTNode::Function),
            };
            return Some(node);
        }
    }
}
