//! Bounded waits.
//!
//! A wait polls the driver until an element reaches the expected state or the
//! configured timeout elapses, then fails with
//! [`CartwrightError::ElementTimeout`]. Waiting suspends on a tokio timer, so a
//! scenario blocks cooperatively. There is no adaptive backoff.

use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::result::{CartwrightError, CartwrightResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Element state a wait targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitState {
    /// Element exists and is displayed
    Visible,
    /// Element is absent or not displayed
    Hidden,
}

impl WaitState {
    /// Name used in error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for WaitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a wait operation
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of times the driver was polled
    pub polls: u32,
}

/// Poll `driver` until `selector` reaches `state`.
///
/// The condition is checked at least once, even with a zero timeout.
pub async fn wait_for_state<D>(
    driver: &D,
    selector: &Selector,
    state: WaitState,
    options: &WaitOptions,
) -> CartwrightResult<WaitResult>
where
    D: StoreDriver + ?Sized,
{
    let start = Instant::now();
    let timeout = options.timeout();
    let mut polls = 0;

    loop {
        polls += 1;
        let visible = driver.is_visible(selector).await?;
        let reached = match state {
            WaitState::Visible => visible,
            WaitState::Hidden => !visible,
        };
        if reached {
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                polls,
            });
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(CartwrightError::ElementTimeout {
                selector: selector.to_string(),
                state: state.to_string(),
                timeout_ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval().min(timeout - elapsed)).await;
    }
}

/// Poll `driver` until any of `selectors` is visible; returns its index.
///
/// Selectors are checked in order on every poll, so the first visible one wins.
pub async fn wait_for_any_visible<D>(
    driver: &D,
    selectors: &[Selector],
    options: &WaitOptions,
) -> CartwrightResult<usize>
where
    D: StoreDriver + ?Sized,
{
    let start = Instant::now();
    let timeout = options.timeout();

    loop {
        for (index, selector) in selectors.iter().enumerate() {
            if driver.is_visible(selector).await? {
                return Ok(index);
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            let rendered: Vec<String> = selectors.iter().map(ToString::to_string).collect();
            return Err(CartwrightError::ElementTimeout {
                selector: rendered.join(" | "),
                state: WaitState::Visible.to_string(),
                timeout_ms: options.timeout_ms,
            });
        }
        tokio::time::sleep(options.poll_interval().min(timeout - elapsed)).await;
    }
}

/// Wait helpers shared by every page object.
///
/// Implemented by [`crate::session::Session`]; pages reach it through the
/// session they borrow rather than through a base type.
#[async_trait]
pub trait ElementWaiter {
    /// Options every wait of this waiter uses
    fn wait_options(&self) -> WaitOptions;

    /// Wait until the element is displayed
    async fn wait_for_visible(&self, selector: &Selector) -> CartwrightResult<()>;

    /// Wait until the element is absent or hidden
    async fn wait_for_hidden(&self, selector: &Selector) -> CartwrightResult<()>;

    /// Wait until one of `selectors` is displayed; returns its index
    async fn wait_for_any(&self, selectors: &[Selector]) -> CartwrightResult<usize>;
}
