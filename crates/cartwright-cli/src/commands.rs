//! CLI command definitions using clap

use cartwright::scenario::Scenario;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cartwright: end-to-end storefront test suites
#[derive(Parser, Debug)]
#[command(name = "cartwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (failures only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run storefront scenarios
    Run(RunArgs),

    /// Validate a purchase fixture without running anything
    CheckFixture(CheckFixtureArgs),

    /// Print the effective suite configuration as YAML
    Config(ConfigArgs),
}

/// Suite settings shared by `run` and `config`
#[derive(Parser, Debug, Default)]
pub struct SuiteArgs {
    /// YAML suite configuration file
    #[arg(short, long, env = "CARTWRIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Purchase fixture (JSON array of records)
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Storefront root URL
    #[arg(long, env = "CARTWRIGHT_BASE_URL")]
    pub base_url: Option<String>,

    /// Account used by the order-history check
    #[arg(long, env = "CARTWRIGHT_HISTORY_EMAIL")]
    pub history_email: Option<String>,

    /// Password for the order-history account
    #[arg(long, env = "CARTWRIGHT_HISTORY_PASSWORD", hide_env_values = true)]
    pub history_password: Option<String>,

    /// Run only the first N fixture records
    #[arg(long)]
    pub limit: Option<usize>,

    /// Element wait timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the Chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Suite settings
    #[command(flatten)]
    pub suite: SuiteArgs,

    /// Scenario to run; repeat for several (dependencies are added)
    #[arg(short, long = "scenario", value_enum)]
    pub scenarios: Vec<ScenarioArg>,

    /// Skip remaining runs after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Run against the in-memory storefront instead of a browser
    #[arg(long)]
    pub simulate: bool,

    /// Write the JSON suite report here
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the check-fixture command
#[derive(Parser, Debug)]
pub struct CheckFixtureArgs {
    /// Fixture file to validate
    pub path: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Suite settings
    #[command(flatten)]
    pub suite: SuiteArgs,
}

/// Scenario selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioArg {
    /// Register, buy and confirm for every fixture record
    PurchaseFlow,
    /// Find the purchased product in the account's order history
    OrderHistoryCheck,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::PurchaseFlow => Self::PurchaseFlow,
            ScenarioArg::OrderHistoryCheck => Self::OrderHistoryCheck,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
