use std::path::PathBuf;

use cwscript_dsl::{parse_preserving_named, print};

use crate::cli::{GlobalOpts, RoundtripArgs};
use crate::commands::{discover_script_files, read_source};
use crate::error::CliError;
use crate::output::{FileReport, OutputContext};

/// First line where `printed` departs from `source`: 1-based number plus
/// both versions of the line.
pub fn first_difference(source: &str, printed: &str) -> Option<(usize, String, String)> {
    if source == printed {
        return None;
    }
    let mut expected = source.split_inclusive('\n');
    let mut actual = printed.split_inclusive('\n');
    let mut line = 1;
    loop {
        match (expected.next(), actual.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            (a, b) => {
                return Some((
                    line,
                    a.unwrap_or_default().to_string(),
                    b.unwrap_or_default().to_string(),
                ))
            }
        }
    }
}

/// Run the `roundtrip` command.
pub fn run(
    args: RoundtripArgs,
    _global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let files = discover_script_files(&args.paths)?;
    let mut report = FileReport::new(output, files.len());
    let mut failed: Vec<PathBuf> = Vec::new();

    for file in &files {
        let source = read_source(file)?;
        let filename = file.display().to_string();
        let printed = print(&parse_preserving_named(&source, filename.as_str()));

        match first_difference(&source, &printed) {
            None => report.round_trips(file),
            Some((line, expected, actual)) => {
                report.differs(file, line, &expected, &actual);
                failed.push(file.clone());
            }
        }
    }
    report.finish_roundtrip();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::RoundTrip { files: failed })
    }
}
