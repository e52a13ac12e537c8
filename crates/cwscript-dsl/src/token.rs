use logos::Logos;

/// Token kinds produced by the script lexer.
///
/// Whitespace, line breaks and comments are real tokens here: the
/// formatting-preserving parser needs them to rebuild the source exactly.
/// Characters matching no rule surface as `Err(())` and are dropped by
/// [`tokenize`](crate::tokenize).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Letters, digits and underscores, starting with a letter or underscore.
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Identifier,

    /// A double-quoted string with backslash escapes. An unterminated string
    /// runs to end of input.
    #[regex(r#""([^"\\]|\\[\s\S])*\\?"?"#)]
    String,

    /// Permissive number: `2`, `-0.5`, `2200.01.01`, `1-2`.
    #[regex(r"-?[0-9][0-9.\-]*")]
    Number,

    #[token("=")]
    Equals,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    /// Combinator keywords and comparison operators.
    #[token("AND")]
    #[token("OR")]
    #[token("NOT")]
    #[token("NOR")]
    #[regex(r"[<>!][<>=!]*")]
    Operator,

    /// `#` to end of line, terminator excluded.
    #[regex(r"#[^\r\n]*")]
    Comment,

    /// A run of horizontal whitespace. A lone `\r` not followed by `\n`
    /// also lands here.
    #[regex(r"[^\S\r\n]+")]
    #[token("\r")]
    Whitespace,

    #[regex(r"\r?\n")]
    NewLine,
}

impl TokenKind {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::String => "string literal",
            Self::Number => "number",
            Self::Equals => "'='",
            Self::OpenBrace => "'{'",
            Self::CloseBrace => "'}'",
            Self::OpenBracket => "'['",
            Self::CloseBracket => "']'",
            Self::Operator => "operator",
            Self::Comment => "comment",
            Self::Whitespace => "whitespace",
            Self::NewLine => "line break",
        }
    }

    /// Layout tokens carry no structure.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::NewLine | Self::Comment)
    }

    /// Kinds usable as a scalar value.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Identifier | Self::String | Self::Number)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
