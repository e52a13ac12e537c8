mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod output;

use clap::Parser;
use log::LevelFilter;

/// Log level from `-q` / `-v` count; `RUST_LOG` refines it per target.
fn log_level(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

fn main() {
    miette::set_panic_hook();

    let cli = cli::Cli::parse();
    let output = output::OutputContext::from_global(&cli.global);

    env_logger::Builder::new()
        .filter_level(log_level(output.quiet, output.verbose))
        .parse_env(env_logger::Env::default())
        .init();
    log::debug!("output mode {:?}", output.mode);

    let result = match cli.command {
        cli::Commands::Check(args) => commands::check::run(args, &cli.global, &output),
        cli::Commands::Fmt(args) => commands::fmt::run(args, &cli.global, &output),
        cli::Commands::Roundtrip(args) => commands::roundtrip::run(args, &cli.global, &output),
        cli::Commands::Tokens(args) => commands::tokens::run(args, &cli.global, &output),
        cli::Commands::Init(args) => commands::init::run(args, &cli.global, &output),
        cli::Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}
