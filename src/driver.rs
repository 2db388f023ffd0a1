use log::{info, warn};

use crate::ast::ASTNode;
use crate::error::ParserError;
use crate::parser::Parser;
use crate::source::CharSource;

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Summary {
    pub parsed: usize,
    pub failed: usize,
}

fn describe(node: &ASTNode) -> &'static str {
    match node {
        ASTNode::Extern(_) => "an extern",
        ASTNode::Function(function) if function.is_anonymous() => "a top-level expression",
        ASTNode::Function(_) => "a function definition",
    }
}

/// Parses top-level forms until end of input, handing each outcome to
/// `handler`. A failed form is skipped by discarding the token it stopped on,
/// so one bad line never ends the session.
pub fn run<S, F>(parser: &mut Parser<S>, mut handler: F) -> Summary
where
    S: CharSource,
    F: FnMut(Result<ASTNode, ParserError>),
{
    let mut summary = Summary::default();

    while let Some(outcome) = parser.parse_top_level() {
        match &outcome {
            Ok(node) => {
                info!("parsed {}", describe(node));
                summary.parsed += 1;
            }
            Err(e) => {
                warn!("{}", e);
                summary.failed += 1;
                parser.advance();
            }
        }
        handler(outcome);
    }

    summary
}

pub fn parse_all<S: CharSource>(parser: &mut Parser<S>) -> Vec<Result<ASTNode, ParserError>> {
    let mut outcomes = Vec::new();
    run(parser, |outcome| outcomes.push(outcome));
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Function, Prototype};
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn recovers_after_bad_prototype() {
        let mut parser = Parser::from_source_str("def f( ; 42");
        let outcomes = parse_all(&mut parser);

        assert_eq!(outcomes.len(), 2);
        let err = outcomes[0].clone().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Expected);
        assert!(err.to_string().contains("')' in prototype"));
        assert_eq!(
            outcomes[1],
            Ok(ASTNode::Function(Function::anonymous(Expression::Number(42.0))))
        );
    }

    #[test]
    fn summary_counts_forms() {
        let mut parser = Parser::from_source_str("extern sin(x); def id(x) x; id(1); ) ; 2");
        let mut seen = Vec::new();
        let summary = run(&mut parser, |outcome| seen.push(outcome.is_ok()));

        assert_eq!(summary, Summary { parsed: 4, failed: 1 });
        assert_eq!(seen, [true, true, true, false, true]);
    }

    #[test]
    fn forms_need_no_separator() {
        let mut parser = Parser::from_source_str("extern cos(a)\ndef two() 2\n");
        let outcomes = parse_all(&mut parser);
        assert_eq!(
            outcomes,
            vec![
                Ok(ASTNode::Extern(Prototype {
                    name: "cos".to_string(),
                    args: vec!["a".to_string()],
                })),
                Ok(ASTNode::Function(Function {
                    prototype: Prototype {
                        name: "two".to_string(),
                        args: vec![],
                    },
                    body: Expression::Number(2.0),
                })),
            ]
        );
    }

    #[test]
    fn empty_input_parses_nothing() {
        let mut parser = Parser::from_source_str("  # only a comment\n;;");
        assert_eq!(run(&mut parser, |_| {}), Summary::default());
    }
}
