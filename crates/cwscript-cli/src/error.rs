use std::path::PathBuf;

use cwscript_dsl::ScriptError;
use cwscript_mod::ModError;

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error
/// - 2: invalid arguments / usage error
/// - 3: parse error (syntax check failure)
/// - 4: a check found differences (`fmt --check`, `roundtrip`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    ParseError = 3,
    CheckFailed = 4,
}

/// Errors returned by CLI command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Syntax errors found by the strict parser, one per failing file.
    #[error("syntax errors in {} file(s)", failures.len())]
    Parse { failures: Vec<ParseFailure> },

    #[error(transparent)]
    Mod(#[from] ModError),

    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("no script files found in {path}")]
    NoScriptFiles { path: PathBuf },

    /// Init without --force.
    #[error("directory '{path}' already exists (use --force to overwrite)")]
    DirectoryExists { path: PathBuf },

    /// Files that `fmt --check` would rewrite.
    #[error("{} file(s) are not formatted", files.len())]
    Unformatted { files: Vec<PathBuf> },

    /// Files whose preserved print differs from their source.
    #[error("{} file(s) do not round-trip", files.len())]
    RoundTrip { files: Vec<PathBuf> },

    #[error("{0}")]
    Other(String),
}

/// One file that failed the strict parse.
#[derive(Debug)]
pub struct ParseFailure {
    pub file: PathBuf,
    pub error: ScriptError,
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { .. } => ExitCode::ParseError,
            Self::Unformatted { .. } | Self::RoundTrip { .. } => ExitCode::CheckFailed,
            Self::Config { .. } | Self::NoScriptFiles { .. } => ExitCode::InvalidArguments,
            Self::Mod(ModError::TooManyTags { .. } | ModError::InvalidPath { .. }) => {
                ExitCode::InvalidArguments
            }
            Self::Mod(_)
            | Self::Io { .. }
            | Self::DirectoryExists { .. }
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Parse { failures } => {
                let list: Vec<serde_json::Value> = failures
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "file": f.file.display().to_string(),
                            "message": f.error.to_string(),
                            "span": [f.error.span().start, f.error.span().end],
                        })
                    })
                    .collect();
                serde_json::json!({
                    "error": "parse_error",
                    "errors": list,
                })
            }
            Self::Mod(e) => serde_json::json!({
                "error": "mod_error",
                "message": e.to_string(),
            }),
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            Self::Unformatted { files } | Self::RoundTrip { files } => {
                let kind = match self {
                    Self::Unformatted { .. } => "unformatted",
                    _ => "round_trip",
                };
                let files: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
                serde_json::json!({
                    "error": kind,
                    "files": files,
                })
            }
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
