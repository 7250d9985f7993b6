//! Cartwright CLI: run storefront suites from the command line
//!
//! ## Usage
//!
//! ```bash
//! cartwright run --simulate                        # In-memory storefront
//! cartwright run --scenario order-history-check    # Pulls in purchase-flow
//! cartwright run --report target/cartwright/report.json
//! cartwright check-fixture data/purchase_order.json
//! cartwright config --base-url http://localhost:4200/client
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{
    CheckFixtureArgs, Cli, ColorArg, Commands, ConfigArgs, RunArgs, ScenarioArg, SuiteArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{
    build_plan, build_suite_config, execute_check_fixture, execute_config, execute_run, run_suite,
};
