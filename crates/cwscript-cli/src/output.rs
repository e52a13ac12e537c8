use std::path::Path;

use console::Term;
use cwscript_dsl::ScriptError;

use crate::cli::GlobalOpts;
use crate::diagnostic::script_error_to_diagnostic;
use crate::error::CliError;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Output context derived from global flags.
pub struct OutputContext {
    pub mode: OutputMode,
    pub verbose: u8,
    pub quiet: bool,
    pub use_color: bool,
}

impl OutputContext {
    /// Construct from global CLI options.
    pub fn from_global(global: &GlobalOpts) -> Self {
        let mode = match global.format.as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        };

        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();

        Self {
            mode,
            verbose: global.verbose,
            quiet: global.quiet,
            use_color,
        }
    }

    /// Print a success message to stderr (human mode only, not in quiet mode).
    pub fn success(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        if self.use_color {
            let style = console::Style::new().green().bold();
            eprintln!("{} {}", style.apply_to("ok"), msg);
        } else {
            eprintln!("ok {msg}");
        }
    }

    /// Print a warning to stderr (not in quiet mode).
    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                if self.use_color {
                    let style = console::Style::new().yellow().bold();
                    eprintln!("{} {}", style.apply_to("warning:"), msg);
                } else {
                    eprintln!("warning: {msg}");
                }
            }
            OutputMode::Json => {
                let json = serde_json::json!({ "warning": msg });
                eprintln!("{json}");
            }
            OutputMode::Plain => {
                eprintln!("warning\t{msg}");
            }
        }
    }

    /// Print an error using the appropriate output mode.
    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human => {
                if self.use_color {
                    let style = console::Style::new().red().bold();
                    eprintln!("{} {}", style.apply_to("error:"), err);
                } else {
                    eprintln!("error: {err}");
                }
            }
            OutputMode::Json => {
                let json = err.to_json();
                eprintln!("{json}");
            }
            OutputMode::Plain => {
                eprintln!("error\t{err}");
            }
        }
    }

    /// Print JSON data to stdout.
    pub fn print_json(&self, value: &serde_json::Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }

    /// Print a status message to stderr (human mode only, not in quiet mode).
    pub fn status(&self, msg: &str) {
        if self.quiet || self.mode != OutputMode::Human {
            return;
        }
        eprintln!("{msg}");
    }

    /// Style a file path for human output.
    pub fn path(&self, path: &std::path::Path) -> String {
        let text = path.display().to_string();
        if self.use_color {
            console::Style::new().cyan().apply_to(text).to_string()
        } else {
            text
        }
    }
}

/// Per-file results of a `check`, `fmt` or `roundtrip` run.
///
/// Human and plain lines are written as each file is reported; JSON
/// results are collected and printed once by the matching `finish_*`.
pub struct FileReport<'a> {
    output: &'a OutputContext,
    files: usize,
    nodes: usize,
    failed: usize,
    results: Vec<serde_json::Value>,
}

impl<'a> FileReport<'a> {
    pub fn new(output: &'a OutputContext, files: usize) -> Self {
        Self {
            output,
            files,
            nodes: 0,
            failed: 0,
            results: Vec::new(),
        }
    }

    /// A file that parsed into `nodes` top-level objects.
    pub fn parsed(&mut self, file: &Path, nodes: usize) {
        self.nodes += nodes;
        match self.output.mode {
            OutputMode::Json => self.results.push(serde_json::json!({
                "file": file.display().to_string(),
                "nodes": nodes,
                "error": null,
            })),
            _ => self
                .output
                .status(&format!("  {} .... {nodes} objects", self.output.path(file))),
        }
    }

    /// A file the strict parser rejected. Human mode renders the source
    /// excerpt under the error.
    pub fn parse_failed(&mut self, file: &Path, source: &str, error: &ScriptError) {
        self.failed += 1;
        let filename = file.display().to_string();
        match self.output.mode {
            OutputMode::Human => {
                let diagnostic = script_error_to_diagnostic(error, source, &filename);
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            OutputMode::Json => self.results.push(serde_json::json!({
                "file": filename,
                "nodes": 0,
                "error": error.to_string(),
            })),
            OutputMode::Plain => eprintln!("{filename}\terror\t{error}"),
        }
    }

    pub fn round_trips(&mut self, file: &Path) {
        self.output
            .status(&format!("  {} .... ok", self.output.path(file)));
        self.results.push(serde_json::json!({
            "file": file.display().to_string(),
            "ok": true,
        }));
    }

    /// A file whose reprint departs from the source at `line`.
    pub fn differs(&mut self, file: &Path, line: usize, source: &str, printed: &str) {
        self.failed += 1;
        let filename = file.display().to_string();
        match self.output.mode {
            OutputMode::Human => self.output.warn(&format!(
                "{filename}:{line} differs\n  source:  {source:?}\n  printed: {printed:?}"
            )),
            OutputMode::Plain => eprintln!("{filename}\t{line}\tdiffers"),
            OutputMode::Json => {}
        }
        self.results.push(serde_json::json!({
            "file": filename,
            "ok": false,
            "line": line,
            "source": source,
            "printed": printed,
        }));
    }

    /// A file whose layout is not canonical. With `check` it is left alone.
    pub fn reformatted(&mut self, file: &Path, check: bool) {
        self.failed += 1;
        let verb = if check { "would reformat" } else { "reformatted" };
        self.output
            .status(&format!("  {verb} {}", self.output.path(file)));
        self.results
            .push(serde_json::Value::String(file.display().to_string()));
    }

    pub fn finish_check(self) {
        let errors = self.failed;
        match self.output.mode {
            OutputMode::Human => {
                let summary = format!(
                    "{} objects in {} files, {errors} errors",
                    self.nodes, self.files
                );
                if errors == 0 {
                    self.output.success(&summary);
                } else {
                    self.output.warn(&summary);
                }
            }
            OutputMode::Json => self.output.print_json(&serde_json::json!({
                "files": self.files,
                "nodes": self.nodes,
                "errors": errors,
                "results": self.results,
            })),
            OutputMode::Plain => println!("{}\t{}\t{errors}", self.files, self.nodes),
        }
    }

    pub fn finish_roundtrip(self) {
        match self.output.mode {
            OutputMode::Json => self.output.print_json(&serde_json::json!({
                "files": self.files,
                "failed": self.failed,
                "results": self.results,
            })),
            OutputMode::Plain => println!("{}\t{}", self.files, self.failed),
            OutputMode::Human if self.failed == 0 => {
                self.output
                    .success(&format!("{} files round-trip exactly", self.files));
            }
            OutputMode::Human => {}
        }
    }

    pub fn finish_fmt(self, check: bool) {
        match self.output.mode {
            OutputMode::Json => self.output.print_json(&serde_json::json!({
                "files": self.files,
                "changed": self.results,
                "check": check,
            })),
            OutputMode::Plain => {
                for file in &self.results {
                    if let Some(file) = file.as_str() {
                        println!("{file}");
                    }
                }
            }
            OutputMode::Human => {
                let verb = if check { "would be reformatted" } else { "reformatted" };
                self.output
                    .success(&format!("{} of {} files {verb}", self.failed, self.files));
            }
        }
    }
}
