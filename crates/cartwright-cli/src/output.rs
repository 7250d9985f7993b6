//! Progress and result output on stderr

use cartwright::runner::{OutcomeStatus, ScenarioOutcome, SuiteReport};
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for suite execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` runs
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Print one finished run and advance the bar
    pub fn outcome(&self, outcome: &ScenarioOutcome) {
        let name = outcome.display_name();
        match outcome.status {
            OutcomeStatus::Passed => {
                let detail = outcome.detail.as_deref().unwrap_or_default();
                self.success(&format!("{name} ({}ms) {detail}", outcome.duration_ms));
            }
            OutcomeStatus::Failed => {
                let error = outcome.error.as_deref().unwrap_or("unknown error");
                self.failure(&format!("{name}: {error}"));
            }
            OutcomeStatus::Skipped => {
                let reason = outcome.error.as_deref().unwrap_or_default();
                self.warning(&format!("{name} skipped: {reason}"));
            }
        }
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a line, routed through the bar when one is active
    fn line(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.println(line),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }

    fn prefixed(&self, symbol: &str, plain: &str, color: Style, message: &str) -> String {
        let prefix = if self.use_color {
            color.bold().apply_to(symbol).to_string()
        } else {
            plain.to_string()
        };
        format!("{prefix} {message}")
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefixed("✓", "PASS", Style::new().green(), message));
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        self.line(&self.prefixed("✗", "FAIL", Style::new().red(), message));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefixed("⚠", "SKIP", Style::new().yellow(), message));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefixed("ℹ", "INFO", Style::new().blue(), message));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Print the suite summary line
    pub fn summary(&self, report: &SuiteReport) {
        let failed = report.failed();
        if self.quiet && failed == 0 {
            return;
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&self.summary_line(report));
    }

    fn summary_line(&self, report: &SuiteReport) -> String {
        let (passed, failed, skipped) = (report.passed(), report.failed(), report.skipped());
        let total = report.outcomes.len();
        #[allow(clippy::cast_precision_loss)]
        let secs = report.duration_ms as f64 / 1000.0;
        let verdict = if report.all_passed() { "PASSED" } else { "FAILED" };

        if self.use_color {
            let verdict = if report.all_passed() {
                style(verdict).green().bold()
            } else {
                style(verdict).red().bold()
            };
            format!(
                "{verdict} {total} runs in {secs:.2}s ({} passed, {} failed, {} skipped)",
                style(passed).green(),
                style(failed).red(),
                style(skipped).yellow()
            )
        } else {
            format!(
                "{verdict} {total} runs in {secs:.2}s ({passed} passed, {failed} failed, {skipped} skipped)"
            )
        }
    }
}
