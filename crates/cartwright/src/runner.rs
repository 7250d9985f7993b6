//! Scenario execution.
//!
//! [`ScenarioPlan`] turns a request into an ordered list where every scenario
//! follows the scenarios it depends on. [`ScenarioRunner`] executes the plan:
//! one fresh browser session per run, closed exactly once whatever happens
//! inside the run, and a [`SuiteReport`] collecting one [`ScenarioOutcome`] per
//! run.

use crate::config::SuiteConfig;
use crate::data::{load_purchase_records, PurchaseRecord};
use crate::driver::SessionLauncher;
use crate::result::{CartwrightError, CartwrightResult};
use crate::scenario::{order_history_check, purchase_flow, PurchaseExpectations, Scenario};
use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Ordered list of scenarios to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPlan {
    scenarios: Vec<Scenario>,
}

impl ScenarioPlan {
    /// Plan for `requested` plus everything it depends on, dependencies first.
    /// Duplicates are dropped.
    #[must_use]
    pub fn resolve(requested: &[Scenario]) -> Self {
        fn visit(scenario: Scenario, ordered: &mut Vec<Scenario>) {
            if ordered.contains(&scenario) {
                return;
            }
            for dependency in scenario.depends_on() {
                visit(*dependency, ordered);
            }
            ordered.push(scenario);
        }

        let mut scenarios = Vec::new();
        for scenario in requested {
            visit(*scenario, &mut scenarios);
        }
        Self { scenarios }
    }

    /// Plan with every scenario
    #[must_use]
    pub fn full() -> Self {
        Self::resolve(&Scenario::ALL)
    }

    /// Scenarios in execution order
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Whether the plan runs `scenario`
    #[must_use]
    pub fn contains(&self, scenario: Scenario) -> bool {
        self.scenarios.contains(&scenario)
    }
}

/// Status of a single scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Run completed and every expectation held
    Passed,
    /// Run aborted on an error or unmet expectation
    Failed,
    /// Run never started
    Skipped,
}

/// Result of one scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario that ran
    pub scenario: Scenario,
    /// Fixture record label, for per-record runs
    pub label: Option<String>,
    /// Status
    pub status: OutcomeStatus,
    /// What the run observed when it passed
    pub detail: Option<String>,
    /// Failure or skip reason
    pub error: Option<String>,
    /// Wall time including session launch and close
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    fn new(scenario: Scenario, label: Option<String>, status: OutcomeStatus) -> Self {
        Self {
            scenario,
            label,
            status,
            detail: None,
            error: None,
            duration_ms: 0,
        }
    }

    /// Skipped run with the reason
    #[must_use]
    pub fn skipped(scenario: Scenario, label: Option<String>, reason: impl Into<String>) -> Self {
        let mut outcome = Self::new(scenario, label, OutcomeStatus::Skipped);
        outcome.error = Some(reason.into());
        outcome
    }

    /// Whether the run passed
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }

    /// Whether the run failed
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == OutcomeStatus::Failed
    }

    /// Scenario name plus record label
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{} [{label}]", self.scenario),
            None => self.scenario.to_string(),
        }
    }
}

/// Outcomes of one suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// Application root the run targeted
    pub base_url: String,
    /// Total wall time
    pub duration_ms: u64,
    /// One entry per run, in execution order
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Empty report for a run starting now
    #[must_use]
    pub fn start(base_url: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            base_url: base_url.into(),
            duration_ms: 0,
            outcomes: Vec::new(),
        }
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Passed runs
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(OutcomeStatus::Passed)
    }

    /// Failed runs
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    /// Skipped runs
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(OutcomeStatus::Skipped)
    }

    /// Whether every run passed and nothing was skipped
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed() == self.outcomes.len()
    }

    /// Failed runs
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> CartwrightResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON rendering to `path`, creating parent directories
    pub fn write_json(&self, path: impl AsRef<Path>) -> CartwrightResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Job<'a> {
    Purchase(&'a PurchaseRecord),
    OrderHistory,
}

impl Job<'_> {
    const fn scenario(&self) -> Scenario {
        match self {
            Self::Purchase(_) => Scenario::PurchaseFlow,
            Self::OrderHistory => Scenario::OrderHistoryCheck,
        }
    }

    fn label(&self) -> Option<String> {
        match self {
            Self::Purchase(record) => Some(record.label()),
            Self::OrderHistory => None,
        }
    }
}

/// Executes scenario plans with sessions from a [`SessionLauncher`]
#[derive(Debug)]
pub struct ScenarioRunner<L: SessionLauncher> {
    launcher: L,
    config: SuiteConfig,
    expectations: PurchaseExpectations,
    fail_fast: bool,
}

impl<L: SessionLauncher> ScenarioRunner<L> {
    /// Create a runner
    pub fn new(launcher: L, config: SuiteConfig) -> Self {
        let expectations = PurchaseExpectations::from_config(&config);
        Self {
            launcher,
            config,
            expectations,
            fail_fast: false,
        }
    }

    /// Skip every remaining run after the first failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Suite configuration
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Load the configured fixture, capped at `record_limit`
    pub fn load_records(&self) -> CartwrightResult<Vec<PurchaseRecord>> {
        let mut records = load_purchase_records(&self.config.fixture_path)?;
        if let Some(limit) = self.config.record_limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    /// Load the fixture (when the plan needs it) and run the plan
    pub async fn run(&self, plan: &ScenarioPlan) -> CartwrightResult<SuiteReport> {
        let records = if plan.contains(Scenario::PurchaseFlow) {
            self.load_records()?
        } else {
            Vec::new()
        };
        Ok(self.run_plan(plan, &records, |_| {}).await)
    }

    /// Run `plan`, calling `on_outcome` after every run.
    ///
    /// A scenario whose dependency has no passing run in this report is
    /// skipped with [`CartwrightError::DependencyNotMet`].
    pub async fn run_plan<F>(
        &self,
        plan: &ScenarioPlan,
        records: &[PurchaseRecord],
        mut on_outcome: F,
    ) -> SuiteReport
    where
        F: FnMut(&ScenarioOutcome),
    {
        let started = Instant::now();
        let mut report = SuiteReport::start(&self.config.base_url);
        let mut halted = false;

        for &scenario in plan.scenarios() {
            let unmet = scenario
                .depends_on()
                .iter()
                .find(|dep| !report.outcomes.iter().any(|o| o.scenario == **dep && o.is_passed()))
                .copied();

            let jobs: Vec<Job<'_>> = match scenario {
                Scenario::PurchaseFlow => records.iter().map(Job::Purchase).collect(),
                Scenario::OrderHistoryCheck => vec![Job::OrderHistory],
            };
            if jobs.is_empty() {
                warn!(%scenario, "no fixture records, nothing to run");
            }

            for job in jobs {
                let outcome = if halted {
                    ScenarioOutcome::skipped(scenario, job.label(), "earlier run failed (fail-fast)")
                } else if let Some(dependency) = unmet {
                    let reason = CartwrightError::DependencyNotMet {
                        scenario: scenario.to_string(),
                        dependency: dependency.to_string(),
                    };
                    warn!(%scenario, %dependency, "skipping scenario");
                    ScenarioOutcome::skipped(scenario, job.label(), reason.to_string())
                } else {
                    self.run_job(job).await
                };

                if outcome.is_failed() && self.fail_fast {
                    halted = true;
                }
                on_outcome(&outcome);
                report.outcomes.push(outcome);
            }
        }

        report.duration_ms = elapsed_ms(started);
        info!(
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            "suite finished"
        );
        report
    }

    /// Run one purchase flow in its own session
    pub async fn run_purchase(&self, record: &PurchaseRecord) -> ScenarioOutcome {
        self.run_job(Job::Purchase(record)).await
    }

    /// Run the order-history check in its own session, ignoring dependencies
    pub async fn run_order_history(&self) -> ScenarioOutcome {
        self.run_job(Job::OrderHistory).await
    }

    async fn run_job(&self, job: Job<'_>) -> ScenarioOutcome {
        let started = Instant::now();
        let mut outcome = ScenarioOutcome::new(job.scenario(), job.label(), OutcomeStatus::Passed);
        match self.execute(job).await {
            Ok(detail) => outcome.detail = Some(detail),
            Err(e) => {
                warn!(scenario = %outcome.display_name(), error = %e, "scenario failed");
                outcome.status = OutcomeStatus::Failed;
                outcome.error = Some(e.to_string());
            }
        }
        outcome.duration_ms = elapsed_ms(started);
        outcome
    }

    async fn execute(&self, job: Job<'_>) -> CartwrightResult<String> {
        let driver = self.launcher.launch().await?;
        let mut session = Session::new(driver, self.config.base_url.as_str(), self.config.wait);

        let result = match job {
            Job::Purchase(record) => purchase_flow(&mut session, record, &self.expectations)
                .await
                .map(|outcome| outcome.to_string()),
            Job::OrderHistory => order_history_check(&mut session, &self.config.order_history)
                .await
                .map(|()| format!("'{}' found in order history", self.config.order_history.product)),
        };

        match (result, session.close().await) {
            (Ok(detail), Ok(())) => Ok(detail),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "closing session after a failed run also failed");
                Err(e)
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
