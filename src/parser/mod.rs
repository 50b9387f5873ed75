//! Parser module - converts prefix or postfix text to expression trees
//!
//! Pipeline: lex -> recursive descent. Both notations share the token
//! stream, leaf handling and error reporting; they differ only in how an
//! operation between `(` and `)` is recognised (see [`Grammar`]).
mod lexer;
mod postfix;
mod prefix;
mod stream;

use crate::ast::Variable;
use crate::{Expr, ParseError, ParseErrorKind};
use std::marker::PhantomData;
use stream::TokenStream;

pub(crate) use postfix::PostfixGrammar;
pub(crate) use prefix::PrefixGrammar;

/// Notation-specific part of the parser
pub(crate) trait Grammar: Sized {
    /// Parse the body of an operation; the opening `(` is already consumed
    fn parse_operation(parser: &mut Parser<'_, Self>) -> Result<Expr, ParseError>;
}

pub(crate) struct Parser<'a, G> {
    stream: TokenStream<'a>,
    max_depth: Option<usize>,
    depth: usize,
    _grammar: PhantomData<G>,
}

impl<'a, G: Grammar> Parser<'a, G> {
    /// Tokenize `source`, rejecting input without any tokens
    pub(crate) fn new(
        source: &'a str,
        context_width: usize,
        max_depth: Option<usize>,
    ) -> Result<Self, ParseError> {
        let stream = TokenStream::new(source, context_width);
        if stream.is_empty() {
            return Err(stream.error(ParseErrorKind::EmptyInput));
        }
        Ok(Parser {
            stream,
            max_depth,
            depth: 0,
            _grammar: PhantomData,
        })
    }

    /// Consume `expected` if it is the current token
    pub(crate) fn take(&mut self, expected: &str) -> bool {
        self.stream.take(expected)
    }

    /// Parse one expression that must span the whole input
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let result = self.parse()?;

        if !self.stream.at_end() {
            let token = self.stream.current().text.to_string();
            return Err(self.stream.error(ParseErrorKind::TrailingTokens { token }));
        }

        Ok(result)
    }

    /// Parse an operand: a parenthesized operation, a variable or a number
    pub(crate) fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.take("(") {
            self.enter()?;
            let result = G::parse_operation(self);
            self.depth -= 1;
            return result;
        }

        let token = self.stream.current();
        if !self.stream.at_end() {
            if let Some(var) = Variable::from_name(token.text) {
                self.stream.advance();
                return Ok(Expr::from(var));
            }
            if let Some(value) = parse_number(token.text) {
                self.stream.advance();
                return Ok(Expr::constant(value));
            }
        }

        Err(self.stream.error(ParseErrorKind::UnexpectedToken {
            token: token.text.to_string(),
        }))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => {
                Err(self.stream.error(ParseErrorKind::MaxDepthExceeded { limit }))
            }
            _ => Ok(()),
        }
    }

    /// Require the closing `)` of an operation
    fn expect_closing(&mut self) -> Result<(), ParseError> {
        if self.take(")") {
            Ok(())
        } else {
            let got = self.stream.current().text.to_string();
            Err(self.stream.error(ParseErrorKind::MissingClosingParen { got }))
        }
    }
}

/// Numeric literal in decimal or exponential notation; NaN spellings are
/// not numbers
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| !value.is_nan())
}
