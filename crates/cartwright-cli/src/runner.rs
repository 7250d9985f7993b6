//! Command execution

use crate::commands::{RunArgs, SuiteArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use cartwright::data::load_purchase_records;
use cartwright::driver::SessionLauncher;
use cartwright::runner::{ScenarioPlan, ScenarioRunner, SuiteReport};
use cartwright::scenario::Scenario;
use cartwright::simulator::StorefrontSimulator;
use cartwright::SuiteConfig;
use std::path::Path;
use tracing::info;

/// Merge the YAML file (if any) with command-line overrides
pub fn build_suite_config(args: &SuiteArgs) -> CliResult<SuiteConfig> {
    let mut config = match args.config {
        Some(ref path) => SuiteConfig::from_file(path)?,
        None => SuiteConfig::default(),
    };

    if let Some(ref fixture) = args.fixture {
        config.fixture_path.clone_from(fixture);
    }
    if let Some(ref url) = args.base_url {
        config.base_url.clone_from(url);
    }
    match (&args.history_email, &args.history_password) {
        (Some(email), Some(password)) => {
            config = config.with_history_credentials(email, password);
        }
        (None, None) => {}
        _ => {
            return Err(CliError::invalid_argument(
                "--history-email and --history-password must be given together",
            ))
        }
    }
    if args.limit.is_some() {
        config.record_limit = args.limit;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.wait.timeout_ms = timeout_ms;
    }
    if args.headed {
        config.browser.headless = false;
    }
    if args.no_sandbox {
        config.browser.sandbox = false;
    }

    config.validate()?;
    Ok(config)
}

/// Plan for the requested scenarios, or every scenario when none is named
#[must_use]
pub fn build_plan(args: &RunArgs) -> ScenarioPlan {
    if args.scenarios.is_empty() {
        ScenarioPlan::full()
    } else {
        let requested: Vec<Scenario> = args.scenarios.iter().map(|&s| s.into()).collect();
        ScenarioPlan::resolve(&requested)
    }
}

/// Execute `run`: build the config, pick a driver, run, report
pub fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let suite = build_suite_config(&args.suite)?;
    let plan = build_plan(args);
    let mut reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());

    let runtime = tokio::runtime::Runtime::new()?;
    let report = if args.simulate {
        reporter.info("Running against the in-memory storefront");
        runtime.block_on(run_suite(
            StorefrontSimulator::new(),
            suite,
            &plan,
            args.fail_fast,
            &mut reporter,
        ))?
    } else {
        runtime.block_on(run_in_browser(suite, &plan, args.fail_fast, &mut reporter))?
    };

    if config.verbosity.is_verbose() {
        reporter.info(&format!("Run id {}", report.run_id));
    }
    if let Some(path) = &args.report {
        report.write_json(path)?;
        reporter.info(&format!("Report written to {}", path.display()));
    }

    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::SuiteFailed {
            failed: report.failed(),
            skipped: report.skipped(),
        })
    }
}

#[cfg(feature = "browser")]
async fn run_in_browser(
    suite: SuiteConfig,
    plan: &ScenarioPlan,
    fail_fast: bool,
    reporter: &mut ProgressReporter,
) -> CliResult<SuiteReport> {
    let launcher = cartwright::browser::ChromiumLauncher::new(suite.browser.clone());
    run_suite(launcher, suite, plan, fail_fast, reporter).await
}

#[cfg(not(feature = "browser"))]
#[allow(clippy::unused_async)]
async fn run_in_browser(
    _suite: SuiteConfig,
    _plan: &ScenarioPlan,
    _fail_fast: bool,
    _reporter: &mut ProgressReporter,
) -> CliResult<SuiteReport> {
    Err(CliError::invalid_argument(
        "built without the `browser` feature; pass --simulate or rebuild with --features browser",
    ))
}

/// Run `plan` with sessions from `launcher`, reporting each run as it ends
pub async fn run_suite<L: SessionLauncher>(
    launcher: L,
    suite: SuiteConfig,
    plan: &ScenarioPlan,
    fail_fast: bool,
    reporter: &mut ProgressReporter,
) -> CliResult<SuiteReport> {
    let runner = ScenarioRunner::new(launcher, suite).with_fail_fast(fail_fast);
    let records = if plan.contains(Scenario::PurchaseFlow) {
        runner.load_records()?
    } else {
        Vec::new()
    };

    let total = plan
        .scenarios()
        .iter()
        .map(|scenario| match scenario {
            Scenario::PurchaseFlow => records.len(),
            Scenario::OrderHistoryCheck => 1,
        })
        .sum::<usize>();
    info!(runs = total, base_url = %runner.config().base_url, "starting suite");

    reporter.header(&format!("Cartwright suite against {}", runner.config().base_url));
    reporter.start_progress(u64::try_from(total).unwrap_or(u64::MAX), "running scenarios");
    let report = runner
        .run_plan(plan, &records, |outcome| reporter.outcome(outcome))
        .await;
    reporter.finish();
    reporter.summary(&report);
    Ok(report)
}

/// Execute `check-fixture`: load every record and report the count
pub fn execute_check_fixture(config: &CliConfig, path: &Path) -> CliResult<usize> {
    let reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let records = load_purchase_records(path)?;
    for record in &records {
        reporter.success(&record.label());
    }
    reporter.info(&format!("{} valid records in {}", records.len(), path.display()));
    Ok(records.len())
}

/// Execute `config`: render the effective suite configuration
pub fn execute_config(args: &SuiteArgs) -> CliResult<String> {
    let mut suite = build_suite_config(args)?;
    if suite.order_history.has_credentials() {
        suite.order_history.password = "********".to_string();
    }
    Ok(suite.to_yaml()?)
}
