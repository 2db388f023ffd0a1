pub mod ast;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;

use ast::ASTNode;
use error::ParserError;
use parser::Parser;

/// Parses every top-level form in `input`, stopping at the first error.
pub fn parse_str(input: &str) -> Result<Vec<ASTNode>, ParserError> {
    let mut parser = Parser::from_source_str(input);
    let mut ast = Vec::new();
    while let Some(node) = parser.parse_top_level() {
        ast.push(node?);
    }
    Ok(ast)
}
