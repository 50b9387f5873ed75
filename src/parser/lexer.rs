//! Tokenizer: splits source text into position-tagged tokens
//!
//! Whitespace separates tokens and is dropped. `(` and `)` always form
//! single-character tokens. Any other maximal run of characters is one token;
//! telling numbers, variables and signs apart is left to the parsers.

/// A token slice of the source and the 1-based character position of its
/// first character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Token<'a> {
    /// End-of-input marker for a source of `char_count` characters
    pub(crate) fn end(char_count: usize) -> Self {
        Token {
            text: "",
            position: char_count + 1,
        }
    }
}

fn is_paren(ch: char) -> bool {
    ch == '(' || ch == ')'
}

/// Tokenize `source`; an empty or all-whitespace source yields no tokens
pub(crate) fn lex(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(source.len() / 2);
    // (byte offset, 1-based position) of the run being accumulated
    let mut run: Option<(usize, usize)> = None;

    for (index, (offset, ch)) in source.char_indices().enumerate() {
        if ch.is_whitespace() || is_paren(ch) {
            if let Some((start, position)) = run.take() {
                tokens.push(Token {
                    text: &source[start..offset],
                    position,
                });
            }
            if is_paren(ch) {
                tokens.push(Token {
                    text: &source[offset..offset + 1],
                    position: index + 1,
                });
            }
        } else if run.is_none() {
            run = Some((offset, index + 1));
        }
    }

    if let Some((start, position)) = run {
        tokens.push(Token {
            text: &source[start..],
            position,
        });
    }

    tokens
}
