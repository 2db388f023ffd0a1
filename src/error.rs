use crate::lexer::{Position, Token};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ErrorKind {
    UnexpectedToken,
    Expected,
    NestingTooDeep,
}

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserError {
    #[error("{position}: unexpected {found} when expecting an expression")]
    UnexpectedToken { found: Token, position: Position },
    #[error("{position}: expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: Token,
        position: Position,
    },
    #[error("{position}: expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, position: Position },
}

impl ParserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParserError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParserError::Expected { .. } => ErrorKind::Expected,
            ParserError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParserError::UnexpectedToken { position, .. }
            | ParserError::Expected { position, .. }
            | ParserError::NestingTooDeep { position, .. } => *position,
        }
    }
}

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum OperatorError {
    #[error("'{0}' cannot be used as a binary operator")]
    ReservedCharacter(char),
    #[error("precedence of '{0}' must be positive, got {1}")]
    NonPositivePrecedence(char, i32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_carry_position() {
        let err = ParserError::Expected {
            expected: "')' in prototype",
            found: Token::Char(';'),
            position: Position { line: 3, column: 7 },
        };
        assert_eq!(err.to_string(), "3:7: expected ')' in prototype, found ';'");
        assert_eq!(err.kind(), ErrorKind::Expected);
        assert_eq!(err.position(), Position { line: 3, column: 7 });
    }

    #[test]
    fn unexpected_token_message() {
        let err = ParserError::UnexpectedToken {
            found: Token::Eof,
            position: Position { line: 1, column: 4 },
        };
        assert_eq!(
            err.to_string(),
            "1:4: unexpected end of input when expecting an expression"
        );
    }
}
