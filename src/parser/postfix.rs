use super::{Grammar, Parser};
use crate::functions::{Operator, Registry};
use crate::{Expr, ParseError, ParseErrorKind};

/// `(<operand> ... <sign>)`, two tokens of lookahead
///
/// Operands are read while the token after the current one is not `)`; the
/// token right before `)` is then taken as the group's sign and the operand
/// count is checked against its arity. A sign met earlier in the group is
/// applied in reverse Polish style to the operands read so far, so
/// `(x 2 y * +)` reads as `(x (2 y *) +)`.
pub(crate) struct PostfixGrammar;

impl Grammar for PostfixGrammar {
    fn parse_operation(parser: &mut Parser<'_, Self>) -> Result<Expr, ParseError> {
        let mut operands = Vec::new();
        while !parser.stream.at_end() && parser.stream.peek().text != ")" {
            match Registry::get(parser.stream.current().text) {
                Some(op) => {
                    let inline = apply_inline(parser, op, &mut operands)?;
                    operands.push(inline);
                }
                None => operands.push(parser.parse()?),
            }
        }

        if parser.stream.at_end() {
            return Err(parser.stream.error(ParseErrorKind::MissingClosingParen {
                got: String::new(),
            }));
        }

        let token = parser.stream.current();
        let op = Registry::get(token.text).ok_or_else(|| {
            parser.stream.error(ParseErrorKind::OperationExpected {
                token: token.text.to_string(),
            })
        })?;
        if let Some(expected) = op.arity().fixed()
            && operands.len() != expected
        {
            return Err(parser.stream.error(ParseErrorKind::ArityMismatch {
                sign: op.sign().to_string(),
                expected,
                got: operands.len(),
            }));
        }
        parser.stream.advance();
        parser.expect_closing()?;

        Ok(op.build(operands))
    }
}

/// Apply a sign found inside a group to the trailing operands read so far;
/// variadic signs take all of them
fn apply_inline(
    parser: &mut Parser<'_, PostfixGrammar>,
    op: &'static Operator,
    operands: &mut Vec<Expr>,
) -> Result<Expr, ParseError> {
    let count = op.arity().fixed().unwrap_or(operands.len());
    if operands.len() < count {
        return Err(parser.stream.error(ParseErrorKind::ArityMismatch {
            sign: op.sign().to_string(),
            expected: count,
            got: operands.len(),
        }));
    }
    parser.stream.advance();
    let args = operands.split_off(operands.len() - count);
    Ok(op.build(args))
}
