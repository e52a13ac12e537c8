use std::io;
use std::path::PathBuf;

/// Errors raised while mapping entities or persisting a mod.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ModError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file is not valid UTF-8: {path}")]
    Encoding { path: PathBuf },

    #[error("path '{path}' must be relative to the mod root and stay inside it")]
    InvalidPath { path: String },

    #[error("no document loaded or created at '{path}'")]
    UnknownDocument { path: String },

    #[error("too many descriptor tags: {count} given, at most {max} allowed")]
    TooManyTags { count: usize, max: usize },

    #[error("invalid {kind} '{id}': {reason}")]
    InvalidEntity {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ModError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
