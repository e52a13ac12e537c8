use crate::cli::{CheckArgs, GlobalOpts};
use crate::commands::{discover_script_files, read_source};
use crate::error::{CliError, ParseFailure};
use crate::output::{FileReport, OutputContext};

/// Run the `check` command: strictly parse script files and render diagnostics.
pub fn run(args: CheckArgs, _global: &GlobalOpts, output: &OutputContext) -> Result<(), CliError> {
    let files = discover_script_files(&args.paths)?;

    let mut report = FileReport::new(output, files.len());
    let mut failures = Vec::new();

    for file in &files {
        let source_text = read_source(file)?;
        let filename = file.display().to_string();

        match cwscript_dsl::parse_str_named(&source_text, filename.as_str()) {
            Ok(document) => report.parsed(file, document.len()),
            Err(error) => {
                report.parse_failed(file, &source_text, &error);
                failures.push(ParseFailure {
                    file: file.clone(),
                    error,
                });
            }
        }
    }
    report.finish_check();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Parse { failures })
    }
}
