use super::{Grammar, Parser};
use crate::functions::Registry;
use crate::{Expr, ParseError, ParseErrorKind};

/// `(<sign> <operand> ...)`, one token of lookahead
///
/// The sign right after `(` fixes the arity, so operands are read until the
/// arity is reached or, for variadic operations, until `)`.
pub(crate) struct PrefixGrammar;

impl Grammar for PrefixGrammar {
    fn parse_operation(parser: &mut Parser<'_, Self>) -> Result<Expr, ParseError> {
        let token = parser.stream.current();
        let op = match Registry::get(token.text) {
            Some(op) if !parser.stream.at_end() => op,
            _ => {
                return Err(parser.stream.error(ParseErrorKind::OperationExpected {
                    token: token.text.to_string(),
                }));
            }
        };
        parser.stream.advance();

        let mut operands = Vec::new();
        while !parser.stream.at_end()
            && parser.stream.current().text != ")"
            && op.arity().has_room(operands.len())
        {
            operands.push(parser.parse()?);
        }

        if let Some(expected) = op.arity().fixed()
            && operands.len() < expected
        {
            return Err(parser.stream.error(ParseErrorKind::ArityMismatch {
                sign: op.sign().to_string(),
                expected,
                got: operands.len(),
            }));
        }
        parser.expect_closing()?;

        Ok(op.build(operands))
    }
}
