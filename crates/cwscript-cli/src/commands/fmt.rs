use std::path::PathBuf;

use cwscript_dsl::{parse_preserving_named, print};

use crate::cli::{FmtArgs, GlobalOpts};
use crate::commands::{discover_script_files, read_source};
use crate::error::CliError;
use crate::output::{FileReport, OutputContext};

/// Canonical layout for `source`. Comments stay inside their enclosing
/// block, each on its own line after the node that owns it.
pub fn format_source(source: &str, filename: &str) -> String {
    let mut document = parse_preserving_named(source, filename);
    document.strip_formatting();
    print(&document)
}

/// Run the `fmt` command.
pub fn run(args: FmtArgs, _global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let files = discover_script_files(&args.paths)?;
    let mut report = FileReport::new(output, files.len());
    let mut changed: Vec<PathBuf> = Vec::new();

    for file in &files {
        let source = read_source(file)?;
        let formatted = format_source(&source, &file.display().to_string());

        if args.stdout {
            print!("{formatted}");
            continue;
        }
        if formatted == source {
            continue;
        }
        if !args.check {
            std::fs::write(file, &formatted).map_err(|e| CliError::Io {
                path: file.clone(),
                source: e,
            })?;
        }
        report.reformatted(file, args.check);
        changed.push(file.clone());
    }

    if args.stdout {
        return Ok(());
    }
    report.finish_fmt(args.check);

    if args.check && !changed.is_empty() {
        return Err(CliError::Unformatted { files: changed });
    }
    Ok(())
}
