//! Cartwright CLI entry point
//!
//! ## Usage
//!
//! ```bash
//! cartwright run                      # Every scenario, real browser
//! cartwright run --simulate -v        # In-memory storefront, info logs
//! cartwright check-fixture <path>     # Validate fixture records
//! ```

use cartwright_cli::{
    execute_check_fixture, execute_config, execute_run, logging, Cli, CliConfig, CliResult,
    ColorChoice, Commands, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config);

    match cli.command {
        Commands::Run(args) => execute_run(&config, &args),
        Commands::CheckFixture(args) => execute_check_fixture(&config, &args.path).map(|_| ()),
        Commands::Config(args) => {
            print!("{}", execute_config(&args.suite)?);
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_json_logs(cli.json_logs)
}
