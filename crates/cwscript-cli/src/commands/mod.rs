pub mod check;
pub mod completions;
pub mod fmt;
pub mod init;
pub mod roundtrip;
pub mod tokens;

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Discover script files from a list of paths.
///
/// Paths can be files (used directly) or directories (searched recursively
/// for files matching `**/*.txt`).
pub fn discover_script_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let base = glob::Pattern::escape(&path.display().to_string());
            let entries =
                glob::glob(&format!("{base}/**/*.txt")).map_err(|e| CliError::Other(e.to_string()))?;
            for entry in entries {
                let entry = entry.map_err(|e| CliError::Other(e.to_string()))?;
                files.push(entry);
            }
        } else {
            return Err(CliError::NoScriptFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths.first().cloned().unwrap_or_else(|| PathBuf::from("."));
        return Err(CliError::NoScriptFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Reads a script file, dropping a leading byte order mark.
pub fn read_source(path: &Path) -> Result<String, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_nonexistent_path() {
        let result = discover_script_files(&[PathBuf::from("/nonexistent/path")]);
        assert!(matches!(result, Err(CliError::NoScriptFiles { .. })));
    }

    #[test]
    fn discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_script_files(&[dir.path().to_path_buf()]);
        assert!(result.is_err());
    }

    #[test]
    fn discover_finds_nested_txt_only() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("common").join("traits");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("t.txt"), "a = 1").unwrap();
        std::fs::write(dir.path().join("loc.yml"), "l_english:").unwrap();
        let files = discover_script_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![nested.join("t.txt")]);
    }

    #[test]
    fn discover_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.txt");
        std::fs::write(&path, "a = 1").unwrap();
        let files = discover_script_files(&[path.clone(), path.clone()]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn read_source_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.txt");
        std::fs::write(&path, "\u{feff}a = 1").unwrap();
        assert_eq!(read_source(&path).unwrap(), "a = 1");
    }
}
