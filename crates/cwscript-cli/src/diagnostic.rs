use cwscript_dsl::ScriptError;
use miette::{Diagnostic, NamedSource, SourceSpan};

/// A diagnostic wrapping a `ScriptError` for rich miette rendering.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ScriptDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

/// Convert a `ScriptError` into a miette `ScriptDiagnostic`.
pub fn script_error_to_diagnostic(
    error: &ScriptError,
    source: &str,
    filename: &str,
) -> ScriptDiagnostic {
    let span = error.span();
    // Zero-width spans at end of input still need a visible caret.
    let start = span.start.min(source.len());
    let span: SourceSpan = (start, span.len()).into();

    let suggestion = match error {
        ScriptError::UnexpectedToken { found, .. } if found == "'='" => {
            Some("Every '=' needs a key on its left, e.g. `key = value`.".to_string())
        }
        ScriptError::UnexpectedToken { found, .. } if found == "'}'" => {
            Some("Check for a '}' without a matching '{'.".to_string())
        }
        ScriptError::UnexpectedEndOfInput { expected, .. } if expected.contains('}') => {
            Some("A block is missing its closing '}'.".to_string())
        }
        _ => None,
    };

    ScriptDiagnostic {
        src: NamedSource::new(filename, source.to_string()),
        span,
        message: error.to_string(),
        label: error.label(),
        suggestion,
    }
}
