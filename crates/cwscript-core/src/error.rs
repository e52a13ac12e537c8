use std::fmt;

/// Errors that occur when constructing syntax tree values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    /// Keyword is not one of `AND`, `OR`, `NOT`, `NOR`.
    InvalidCombinator(String),
    /// Property operator is neither `=` nor a comparison run.
    InvalidOperator(String),
    /// Property key was empty.
    EmptyKey,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCombinator(s) => {
                write!(f, "invalid combinator '{s}': must be one of AND, OR, NOT, NOR")
            }
            Self::InvalidOperator(s) => {
                write!(
                    f,
                    "invalid operator '{s}': must be '=' or a comparison such as '>=' or '!='"
                )
            }
            Self::EmptyKey => write!(f, "property key must not be empty"),
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let cases = vec![
            (
                CoreError::InvalidCombinator("XOR".into()),
                "invalid combinator 'XOR'",
            ),
            (
                CoreError::InvalidOperator("=>".into()),
                "invalid operator '=>'",
            ),
            (CoreError::EmptyKey, "property key must not be empty"),
        ];

        for (error, expected_prefix) in cases {
            let msg = error.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error display for {error:?} = '{msg}', expected to start with '{expected_prefix}'"
            );
        }
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::InvalidCombinator("x".into()));
        assert!(err.to_string().contains("invalid combinator"));
    }
}
