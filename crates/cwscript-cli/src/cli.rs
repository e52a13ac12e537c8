use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Tools for Clausewitz game scripts.
///
/// Checks, formats and round-trips script files, and scaffolds new mods.
#[derive(Parser)]
#[command(
    name = "cwscript",
    version,
    about = "Tools for Clausewitz game scripts",
    after_help = "Use 'cwscript <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: CWSCRIPT_CONFIG]
    #[arg(short = 'c', long = "config", global = true, env = "CWSCRIPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Strictly parse script files and report syntax errors
    Check(CheckArgs),

    /// Rewrite script files in canonical layout
    Fmt(FmtArgs),

    /// Verify that files print back byte for byte
    Roundtrip(RoundtripArgs),

    /// Dump the token stream of a file
    Tokens(TokensArgs),

    /// Create a new mod skeleton
    Init(InitArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `cwscript check`.
#[derive(Args)]
pub struct CheckArgs {
    /// Script files or directories (directories are searched for *.txt)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for `cwscript fmt`.
#[derive(Args)]
pub struct FmtArgs {
    /// Script files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Report files that would change instead of rewriting them
    #[arg(long = "check", conflicts_with = "stdout")]
    pub check: bool,

    /// Print formatted output instead of rewriting files
    #[arg(long = "stdout")]
    pub stdout: bool,
}

/// Arguments for `cwscript roundtrip`.
#[derive(Args)]
pub struct RoundtripArgs {
    /// Script files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for `cwscript tokens`.
#[derive(Args)]
pub struct TokensArgs {
    /// Script file to tokenize
    pub file: PathBuf,

    /// Include whitespace, line break and comment tokens
    #[arg(short = 'a', long = "all")]
    pub all: bool,
}

/// Arguments for `cwscript init`.
#[derive(Args)]
pub struct InitArgs {
    /// Mod name (becomes the directory name under the mods directory)
    pub name: String,

    /// Mods directory (overrides the configured one)
    #[arg(long = "mods-dir")]
    pub mods_dir: Option<PathBuf>,

    /// Mod version written to the descriptor
    #[arg(long = "mod-version", default_value = "1.0.0")]
    pub mod_version: String,

    /// Supported game version (default from config)
    #[arg(long = "supported-version")]
    pub supported_version: Option<String>,

    /// Descriptor tag; repeat for several (at most 10)
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,

    /// Overwrite an existing mod directory
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

/// Arguments for `cwscript completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_parser = ["bash", "zsh", "fish", "powershell", "elvish"])]
    pub shell: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check_command() {
        let cli = Cli::try_parse_from(["cwscript", "check", "common/", "events/x.txt"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(
                args.paths,
                vec![PathBuf::from("common/"), PathBuf::from("events/x.txt")]
            );
        } else {
            panic!("expected Check command");
        }
    }

    #[test]
    fn check_requires_paths() {
        assert!(Cli::try_parse_from(["cwscript", "check"]).is_err());
    }

    #[test]
    fn parse_fmt_flags() {
        let cli = Cli::try_parse_from(["cwscript", "fmt", "--check", "a.txt"]).unwrap();
        if let Commands::Fmt(args) = cli.command {
            assert!(args.check);
            assert!(!args.stdout);
        } else {
            panic!("expected Fmt command");
        }
    }

    #[test]
    fn fmt_check_and_stdout_conflict() {
        let result = Cli::try_parse_from(["cwscript", "fmt", "--check", "--stdout", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_init_command() {
        let cli = Cli::try_parse_from([
            "cwscript",
            "init",
            "My Mod",
            "--mods-dir",
            "/tmp/mods",
            "--supported-version",
            "3.12.*",
            "-t",
            "Gameplay",
            "--tag",
            "Balance",
        ])
        .unwrap();
        if let Commands::Init(args) = cli.command {
            assert_eq!(args.name, "My Mod");
            assert_eq!(args.mods_dir, Some(PathBuf::from("/tmp/mods")));
            assert_eq!(args.mod_version, "1.0.0");
            assert_eq!(args.supported_version.as_deref(), Some("3.12.*"));
            assert_eq!(args.tags, vec!["Gameplay", "Balance"]);
            assert!(!args.force);
        } else {
            panic!("expected Init command");
        }
    }

    #[test]
    fn parse_tokens_command() {
        let cli = Cli::try_parse_from(["cwscript", "tokens", "-a", "x.txt"]).unwrap();
        if let Commands::Tokens(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("x.txt"));
            assert!(args.all);
        } else {
            panic!("expected Tokens command");
        }
    }

    #[test]
    fn parse_global_options() {
        let cli = Cli::try_parse_from([
            "cwscript",
            "--format",
            "json",
            "-vv",
            "--no-color",
            "roundtrip",
            "x.txt",
        ])
        .unwrap();
        assert_eq!(cli.global.format, "json");
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
        assert!(matches!(cli.command, Commands::Roundtrip(_)));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["cwscript", "-v", "-q", "completions", "bash"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_format_rejected() {
        let result = Cli::try_parse_from(["cwscript", "--format", "xml", "completions", "bash"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_shell_rejected() {
        let result = Cli::try_parse_from(["cwscript", "completions", "tcsh"]);
        assert!(result.is_err());
    }
}
