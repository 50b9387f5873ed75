use super::lexer::{Token, lex};
use crate::{ParseError, ParseErrorKind};

/// Cursor over the token sequence with up to two tokens of lookahead
///
/// Reading past the last token keeps yielding the end-of-input marker.
pub(crate) struct TokenStream<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    end: Token<'a>,
    pos: usize,
    context_width: usize,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(source: &'a str, context_width: usize) -> Self {
        TokenStream {
            source,
            tokens: lex(source),
            end: Token::end(source.chars().count()),
            pos: 0,
            context_width,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn current(&self) -> Token<'a> {
        self.tokens.get(self.pos).copied().unwrap_or(self.end)
    }

    /// The token after the current one
    pub(crate) fn peek(&self) -> Token<'a> {
        self.tokens.get(self.pos + 1).copied().unwrap_or(self.end)
    }

    /// Consume the current token and return it
    pub(crate) fn advance(&mut self) -> Token<'a> {
        let token = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume the current token if it is `expected`
    pub(crate) fn take(&mut self, expected: &str) -> bool {
        if !self.at_end() && self.current().text == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Build an error positioned at the current token
    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.current().position)
    }

    pub(crate) fn error_at(&self, kind: ParseErrorKind, position: usize) -> ParseError {
        ParseError::new(kind, self.source, position, self.context_width)
    }
}
