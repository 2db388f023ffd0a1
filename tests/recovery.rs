use std::io::Cursor;

use kaleidoscope::ast::{ASTNode, Expression, Function, Prototype};
use kaleidoscope::driver::{parse_all, run, Summary};
use kaleidoscope::error::ErrorKind;
use kaleidoscope::lexer::Lexer;
use kaleidoscope::parse_str;
use kaleidoscope::parser::Parser;
use kaleidoscope::source::ReaderSource;
use pretty_assertions::assert_eq;

#[test]
fn bad_definition_does_not_lose_next_form() {
    let outcomes = parse_all(&mut Parser::from_source_str("def f( ; 42"));
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].as_ref().unwrap_err().kind(), ErrorKind::Expected);
    assert_eq!(
        outcomes[1],
        Ok(ASTNode::Function(Function::anonymous(Expression::Number(42.0))))
    );
}

#[test]
fn extern_without_params() {
    assert_eq!(
        parse_str("extern f()").unwrap(),
        [ASTNode::Extern(Prototype {
            name: "f".to_string(),
            args: vec![],
        })]
    );
}

#[test]
fn strict_parse_stops_at_first_error() {
    let err = parse_str("1 + ; 2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err.position().column, 5);
}

#[test]
fn unterminated_call_terminates() {
    let outcomes = parse_all(&mut Parser::from_source_str("foo(1, 2"));
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].as_ref().unwrap_err().kind(), ErrorKind::Expected);
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    let source = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let outcomes = parse_all(&mut Parser::from_source_str(&source));
    assert_eq!(outcomes[0].as_ref().unwrap_err().kind(), ErrorKind::NestingTooDeep);
}

#[test]
fn reader_input_matches_string_input() {
    let source = "extern sin(x)\n# a comment\ndef g(a b) sin(a) * b\ng(1, 2)\n";
    let mut parser = Parser::new(Lexer::new(ReaderSource::new(Cursor::new(source))));
    let mut nodes = Vec::new();
    let summary = run(&mut parser, |outcome| nodes.push(outcome.unwrap()));

    assert_eq!(summary, Summary { parsed: 3, failed: 0 });
    assert_eq!(nodes, parse_str(source).unwrap());
}

#[test]
fn invalid_byte_is_skipped_like_any_bad_token() {
    let mut parser = Parser::new(Lexer::new(ReaderSource::new(Cursor::new(&b"1\n\xff\n2\n3\n"[..]))));
    let mut nodes = Vec::new();
    let summary = run(&mut parser, |outcome| nodes.push(outcome));

    assert_eq!(summary, Summary { parsed: 3, failed: 1 });
    assert_eq!(nodes[1].as_ref().unwrap_err().kind(), ErrorKind::UnexpectedToken);
    assert_eq!(
        nodes[2],
        Ok(ASTNode::Function(Function::anonymous(Expression::Number(2.0))))
    );
}
