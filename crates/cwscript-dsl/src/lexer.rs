use std::fmt;

use logos::Logos;

use crate::error::Span;
use crate::token::TokenKind;

/// A token with its exact source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source slice.
    pub text: String,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character, counted in characters.
    pub column: usize,
}

impl Token {
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// `AND`, `OR`, `NOT` or `NOR`.
    pub fn is_combinator(&self) -> bool {
        self.kind == TokenKind::Operator && matches!(self.text.as_str(), "AND" | "OR" | "NOT" | "NOR")
    }

    /// A comparison operator such as `>=`.
    pub fn is_comparison(&self) -> bool {
        self.kind == TokenKind::Operator && !self.is_combinator()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {:?}",
            self.line, self.column, self.kind, self.text
        )
    }
}

/// Line/column cursor advanced over source text.
#[derive(Debug, Clone, Copy)]
struct Position {
    line: usize,
    column: usize,
}

impl Position {
    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

/// Tokenizes script source into an ordered token stream.
///
/// This never fails. Characters that match no rule are skipped, so the
/// token texts concatenate back to the input minus those characters.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut position = Position { line: 1, column: 1 };
    let mut offset = 0;

    for (result, range) in TokenKind::lexer(source).spanned() {
        // Anything between the previous token and this one was skipped.
        position.advance(&source[offset..range.start]);
        offset = range.end;
        let text = &source[range.clone()];

        match result {
            Ok(TokenKind::Whitespace) if extends_whitespace(tokens.last(), range.start) => {
                if let Some(last) = tokens.last_mut() {
                    last.text.push_str(text);
                    last.span.end = range.end;
                }
            }
            Ok(kind) => {
                tokens.push(Token {
                    kind,
                    text: text.to_string(),
                    span: Span::new(range.start, range.end),
                    line: position.line,
                    column: position.column,
                });
            }
            Err(()) => {
                tracing::trace!(
                    line = position.line,
                    column = position.column,
                    text,
                    "skipping unrecognized input"
                );
            }
        }
        position.advance(text);
    }

    tokens
}

/// A lone `\r` lexes apart from the blanks around it; adjacent runs are
/// joined so whitespace stays a single token.
fn extends_whitespace(last: Option<&Token>, start: usize) -> bool {
    last.is_some_and(|t| t.kind == TokenKind::Whitespace && t.span.end == start)
}
