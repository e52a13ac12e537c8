use cwscript_core::types::{
    Block, Combinator, Comment, Condition, Document, Node, Property, PropertyValue, Scalar,
    Trivia, Value,
};

use crate::lexer::{tokenize, Token};
use crate::token::TokenKind;

/// A run of whitespace, line breaks and comments between two structural tokens.
#[derive(Debug, Default)]
struct Gap {
    text: String,
    comments: Vec<String>,
}

impl Gap {
    fn append(&mut self, other: Gap) {
        self.text.push_str(&other.text);
        self.comments.extend(other.comments);
    }

    fn take(&mut self) -> Gap {
        std::mem::take(self)
    }
}

/// Children of a `{ ... }` group with the layout inside the braces.
#[derive(Debug, Default)]
struct Braced {
    children: Vec<Node>,
    open_space: String,
    close_space: String,
    /// Comments ahead of the first child, or all of them in an empty body.
    inner_comments: Vec<String>,
}

/// Where an object is being parsed; bare scalars are only valid in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    TopLevel,
    InBlock,
}

/// Best-effort parser that keeps every byte of layout.
///
/// The cursor only moves forward. Trivia seen between siblings is held in a
/// pending gap until the next token shows whether it trails the previous
/// sibling or precedes the closing brace.
struct PreservingParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl PreservingParser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consumes the trivia run at the cursor.
    fn take_gap(&mut self) -> Gap {
        let mut gap = Gap::default();
        while let Some(tok) = self.tokens.get(self.pos) {
            if !tok.is_trivia() {
                break;
            }
            if tok.kind == TokenKind::Comment {
                gap.comments.push(tok.text.clone());
            }
            gap.text.push_str(&tok.text);
            self.pos += 1;
        }
        gap
    }

    /// Drops the token at `start` after a malformed object and resumes after it.
    fn skip_malformed(&mut self, start: usize) {
        self.pos = start;
        if let Some(tok) = self.advance() {
            tracing::debug!(
                line = tok.line,
                column = tok.column,
                text = %tok.text,
                "dropping malformed object"
            );
        }
    }

    fn parse_document(&mut self) -> Document {
        let mut document = Document {
            trivia: Trivia::preserved(),
            ..Document::new()
        };

        // Comments ahead of the first object stand as nodes of their own;
        // plain whitespace waits to become the first object's leading text.
        let mut pending = String::new();
        loop {
            match self.peek() {
                Some(tok) if tok.kind == TokenKind::Comment => {
                    let text = tok.text.clone();
                    self.pos += 1;
                    let trivia = Trivia {
                        leading: std::mem::take(&mut pending),
                        ..Trivia::preserved()
                    };
                    document.push(Comment { text, trivia });
                }
                Some(tok) if tok.is_trivia() => {
                    pending.push_str(&tok.text);
                    self.pos += 1;
                }
                _ => break,
            }
        }

        let mut objects = 0usize;
        while self.peek().is_some() {
            let start = self.pos;
            match self.parse_object(Context::TopLevel) {
                Some(mut node) => {
                    if objects == 0 {
                        node.trivia_mut().leading = std::mem::take(&mut pending);
                    }
                    objects += 1;
                    attach_trailing(&mut node, self.take_gap());
                    document.push(node);
                }
                None => {
                    self.skip_malformed(start);
                    let gap = self.take_gap();
                    match document.children.last_mut() {
                        Some(last) if objects > 0 => attach_trailing(last, gap),
                        _ => pending.push_str(&gap.text),
                    }
                }
            }
        }

        document.trivia.trailing = pending;
        document
    }

    /// Parses one object at a structural token, or returns `None` if malformed.
    fn parse_object(&mut self, context: Context) -> Option<Node> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::Identifier => self.parse_keyed(context),
            TokenKind::Operator if tok.is_combinator() => {
                self.parse_condition().map(Node::Condition)
            }
            TokenKind::String | TokenKind::Number if context == Context::InBlock => {
                let tok = self.advance()?;
                Some(Node::Value(Value {
                    scalar: scalar(&tok),
                    trivia: Trivia::preserved(),
                }))
            }
            _ => None,
        }
    }

    fn parse_keyed(&mut self, context: Context) -> Option<Node> {
        let key = self.advance()?;
        let after_key = self.pos;
        let key_gap = self.take_gap();

        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Equals || tok.is_comparison() => {
                let operator = tok.text.clone();
                self.pos += 1;
                let operator_gap = self.take_gap();
                let value = self.parse_value()?;

                let mut trivia = Trivia::preserved();
                trivia.comments.extend(key_gap.comments);
                trivia.comments.extend(operator_gap.comments);
                Some(Node::Property(Property {
                    key: key.text,
                    operator,
                    value,
                    key_space: key_gap.text,
                    operator_space: operator_gap.text,
                    trivia,
                }))
            }
            Some(tok) if tok.kind == TokenKind::OpenBrace => {
                let braced = self.parse_braced()?;
                let mut block = braced.into_block(Some(key.text));
                block.name_space = key_gap.text;
                block.trivia.comments = key_gap.comments;
                Some(Node::Block(block))
            }
            _ if context == Context::InBlock => {
                // A bare identifier list element; the gap belongs to the sibling run.
                self.pos = after_key;
                Some(Node::Value(Value {
                    scalar: scalar(&key),
                    trivia: Trivia::preserved(),
                }))
            }
            _ => None,
        }
    }

    fn parse_condition(&mut self) -> Option<Condition> {
        let keyword = self.advance()?;
        let combinator: Combinator = keyword.text.parse().ok()?;
        let keyword_gap = self.take_gap();

        let mut comments = keyword_gap.comments;
        let mut operator = None;
        let mut operator_space = String::new();
        if self.peek_kind() == Some(TokenKind::Equals) {
            let equals = self.advance()?;
            let operator_gap = self.take_gap();
            operator = Some(equals.text);
            operator_space = operator_gap.text;
            comments.extend(operator_gap.comments);
        }

        let braced = self.parse_braced()?;
        Some(Condition {
            combinator,
            operator,
            operands: braced.children,
            keyword_space: keyword_gap.text,
            operator_space,
            open_space: braced.open_space,
            close_space: braced.close_space,
            inner_comments: braced.inner_comments,
            trivia: Trivia {
                comments,
                ..Trivia::preserved()
            },
        })
    }

    fn parse_value(&mut self) -> Option<PropertyValue> {
        let tok = self.peek()?;
        match tok.kind {
            kind if kind.is_scalar() => {
                let value = scalar(tok);
                self.pos += 1;
                Some(PropertyValue::Scalar(value))
            }
            TokenKind::OpenBrace => {
                let braced = self.parse_braced()?;
                Some(PropertyValue::Block(braced.into_block(None)))
            }
            TokenKind::Operator if tok.is_combinator() => {
                self.parse_condition().map(PropertyValue::Condition)
            }
            _ => None,
        }
    }

    /// Parses `{ ... }` with the cursor on `{`.
    fn parse_braced(&mut self) -> Option<Braced> {
        if self.peek_kind() != Some(TokenKind::OpenBrace) {
            return None;
        }
        self.pos += 1;

        let open = self.take_gap();
        let mut braced = Braced {
            open_space: open.text,
            inner_comments: open.comments,
            ..Braced::default()
        };
        let mut pending = Gap::default();

        loop {
            match self.peek() {
                None => {
                    tracing::debug!("block not closed before end of input");
                    break;
                }
                Some(tok) if tok.kind == TokenKind::CloseBrace => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            let start = self.pos;
            match self.parse_object(Context::InBlock) {
                Some(node) => {
                    // Another child follows, so the pending run trails the previous one.
                    let gap = pending.take();
                    match braced.children.last_mut() {
                        Some(previous) => attach_trailing(previous, gap),
                        None => {
                            braced.open_space.push_str(&gap.text);
                            braced.inner_comments.extend(gap.comments);
                        }
                    }
                    braced.children.push(node);
                }
                None => self.skip_malformed(start),
            }
            pending.append(self.take_gap());
        }

        // Comments before `}` follow the last child so they stay inside the body.
        braced.close_space = pending.text;
        match braced.children.last_mut() {
            Some(last) => last.trivia_mut().comments.extend(pending.comments),
            None => braced.inner_comments.extend(pending.comments),
        }
        Some(braced)
    }
}

impl Braced {
    fn into_block(self, name: Option<String>) -> Block {
        Block {
            name,
            children: self.children,
            name_space: String::new(),
            open_space: self.open_space,
            close_space: self.close_space,
            inner_comments: self.inner_comments,
            trivia: Trivia::preserved(),
        }
    }
}

fn attach_trailing(node: &mut Node, gap: Gap) {
    let trivia = node.trivia_mut();
    trivia.trailing.push_str(&gap.text);
    trivia.comments.extend(gap.comments);
}

fn scalar(tok: &Token) -> Scalar {
    match tok.kind {
        TokenKind::String => Scalar::String(tok.text.clone()),
        TokenKind::Number => Scalar::Number(tok.text.clone()),
        _ => Scalar::Identifier(tok.text.clone()),
    }
}

/// Parses `source` keeping all whitespace and comments.
///
/// Never fails: a malformed object is dropped, one token is skipped, and
/// parsing resumes. For well-formed input, printing the result reproduces
/// `source` exactly.
pub fn parse_preserving(source: &str) -> Document {
    let document = PreservingParser::new(tokenize(source)).parse_document();
    tracing::debug!(nodes = document.len(), "parsed document with formatting");
    document
}

/// Like [`parse_preserving`], recording `filename` on the document.
pub fn parse_preserving_named(source: &str, filename: impl Into<String>) -> Document {
    let mut document = parse_preserving(source);
    document.filename = Some(filename.into());
    document
}
