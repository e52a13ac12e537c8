use cwscript_core::types::{
    Block, Combinator, Condition, Document, Node, Property, PropertyValue, Scalar, Value,
};

use crate::error::{ScriptError, Span};
use crate::lexer::{tokenize, Token};
use crate::token::TokenKind;

/// Recursive descent parser producing a clean tree.
///
/// Works on structural tokens only; whitespace, line breaks and comments
/// are filtered out before parsing starts. Any grammar violation is fatal.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Zero-width span at end of input, used for end-of-input errors.
    end: Span,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|t| Span::new(t.span.end, t.span.end))
            .unwrap_or(Span::new(0, 0));
        let tokens = tokens.into_iter().filter(|t| !t.is_trivia()).collect();
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    // -- Cursor helpers --

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

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ScriptError> {
        match self.advance() {
            Some(tok) if tok.kind == expected => Ok(tok),
            Some(tok) => Err(unexpected(&tok, expected.description())),
            None => Err(self.end_of_input(expected.description())),
        }
    }

    fn end_of_input(&self, expected: &str) -> ScriptError {
        ScriptError::UnexpectedEndOfInput {
            expected: expected.to_string(),
            span: self.end,
        }
    }

    // -- Grammar productions --

    /// document = object*
    fn parse_document(&mut self) -> Result<Vec<Node>, ScriptError> {
        let mut nodes = Vec::new();
        while self.peek().is_some() {
            nodes.push(self.parse_object(false)?);
        }
        Ok(nodes)
    }

    /// object = IDENT ('=' | CMP) value | IDENT block | COMBINATOR ['='] block
    ///        | scalar (inside a block only)
    fn parse_object(&mut self, in_block: bool) -> Result<Node, ScriptError> {
        let expected = if in_block {
            "key, combinator, value or '}'"
        } else {
            "key or combinator"
        };
        let Some(tok) = self.peek() else {
            return Err(self.end_of_input(expected));
        };

        match tok.kind {
            TokenKind::Identifier => self.parse_keyed(in_block),
            TokenKind::Operator if tok.is_combinator() => {
                Ok(Node::Condition(self.parse_condition()?))
            }
            TokenKind::String | TokenKind::Number if in_block => {
                let tok = self.advance().ok_or_else(|| self.end_of_input(expected))?;
                Ok(Node::Value(Value::new(scalar(&tok))))
            }
            _ => Err(unexpected(tok, expected)),
        }
    }

    /// An identifier followed by an operator, a block, or nothing (list element).
    fn parse_keyed(&mut self, in_block: bool) -> Result<Node, ScriptError> {
        let key = self.expect(TokenKind::Identifier)?;

        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Equals || tok.is_comparison() => {
                let operator = tok.text.clone();
                self.pos += 1;
                let value = self.parse_value()?;
                Ok(Node::Property(Property {
                    operator,
                    ..Property::new(key.text, value)
                }))
            }
            Some(tok) if tok.kind == TokenKind::OpenBrace => {
                let children = self.parse_braced()?;
                Ok(Node::Block(Block {
                    children,
                    ..Block::new(key.text)
                }))
            }
            _ if in_block => Ok(Node::Value(Value::new(scalar(&key)))),
            Some(tok) => Err(unexpected(tok, "'=', comparison operator or '{'")),
            None => Err(self.end_of_input("'=' or '{'")),
        }
    }

    /// condition = COMBINATOR ['='] '{' object* '}'
    fn parse_condition(&mut self) -> Result<Condition, ScriptError> {
        let keyword = self.expect(TokenKind::Operator)?;
        let combinator: Combinator = keyword
            .text
            .parse()
            .map_err(|_| unexpected(&keyword, "combinator"))?;

        let mut condition = Condition::new(combinator);
        if self.peek_kind() == Some(TokenKind::Equals) {
            self.pos += 1;
            condition.operator = Some(Property::ASSIGN.to_string());
        }
        condition.operands = self.parse_braced()?;
        Ok(condition)
    }

    /// value = STRING | NUMBER | IDENT | block | condition
    fn parse_value(&mut self) -> Result<PropertyValue, ScriptError> {
        let Some(tok) = self.peek() else {
            return Err(self.end_of_input("value"));
        };

        match tok.kind {
            kind if kind.is_scalar() => {
                let value = scalar(tok);
                self.pos += 1;
                Ok(PropertyValue::Scalar(value))
            }
            TokenKind::OpenBrace => {
                let children = self.parse_braced()?;
                Ok(PropertyValue::Block(Block {
                    children,
                    ..Block::anonymous()
                }))
            }
            TokenKind::Operator if tok.is_combinator() => {
                Ok(PropertyValue::Condition(self.parse_condition()?))
            }
            _ => Err(unexpected(tok, "value")),
        }
    }

    /// block = '{' object* '}'
    fn parse_braced(&mut self) -> Result<Vec<Node>, ScriptError> {
        self.expect(TokenKind::OpenBrace)?;
        let mut children = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::CloseBrace) => {
                    self.pos += 1;
                    return Ok(children);
                }
                Some(_) => children.push(self.parse_object(true)?),
                None => return Err(self.end_of_input(TokenKind::CloseBrace.description())),
            }
        }
    }
}

fn unexpected(tok: &Token, expected: &str) -> ScriptError {
    ScriptError::UnexpectedToken {
        expected: expected.to_string(),
        found: tok.kind.description().to_string(),
        text: tok.text.clone(),
        span: tok.span,
        line: tok.line,
        column: tok.column,
    }
}

/// Scalar holding the literal token text.
fn scalar(tok: &Token) -> Scalar {
    match tok.kind {
        TokenKind::String => Scalar::String(tok.text.clone()),
        TokenKind::Number => Scalar::Number(tok.text.clone()),
        _ => Scalar::Identifier(tok.text.clone()),
    }
}

/// Parses a token stream into a [`Document`] with no stored formatting.
///
/// # Errors
///
/// Returns the first grammar violation as a `ScriptError`. There is no
/// recovery.
pub fn parse(tokens: Vec<Token>) -> Result<Document, ScriptError> {
    let mut parser = Parser::new(tokens);
    let children = parser.parse_document()?;
    tracing::debug!(nodes = children.len(), "parsed document");
    Ok(Document {
        children,
        ..Document::new()
    })
}

/// Tokenizes and parses `source`.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str(source: &str) -> Result<Document, ScriptError> {
    parse(tokenize(source))
}

/// Like [`parse_str`], recording `filename` on the document.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str_named(source: &str, filename: impl Into<String>) -> Result<Document, ScriptError> {
    let mut document = parse_str(source)?;
    document.filename = Some(filename.into());
    Ok(document)
}
