use std::fmt;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors raised by the strict parser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScriptError {
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken {
        expected: String,
        found: String,
        text: String,
        span: Span,
        line: usize,
        column: usize,
    },

    /// Input ended while more tokens were expected.
    UnexpectedEndOfInput { expected: String, span: Span },
}

impl ScriptError {
    /// Byte span of the offending input.
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } | Self::UnexpectedEndOfInput { span, .. } => *span,
        }
    }

    /// Short label for diagnostics.
    pub fn label(&self) -> String {
        match self {
            Self::UnexpectedToken { expected, .. } => format!("expected {expected}"),
            Self::UnexpectedEndOfInput { expected, .. } => format!("{expected} missing here"),
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                expected,
                found,
                text,
                line,
                column,
                ..
            } => {
                write!(
                    f,
                    "unexpected token at line {line}, column {column}: expected {expected}, found {found} ('{text}')"
                )
            }
            Self::UnexpectedEndOfInput { expected, .. } => {
                write!(f, "unexpected end of input: expected {expected}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}
