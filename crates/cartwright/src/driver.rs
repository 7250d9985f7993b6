//! StoreDriver - the browser automation capability page objects depend on.
//!
//! Page objects never talk to a concrete browser library. They go through the
//! [`StoreDriver`] trait, which is the minimal surface the storefront flow needs:
//! navigate, locate, read text, read visibility, fill, click, select, close.
//!
//! # Implementations
//!
//! - `ChromiumDriver` - CDP via chromiumoxide (feature `browser`)
//! - `SimulatedBrowser` - in-memory storefront used by tests and `--simulate`

use crate::locator::Selector;
use crate::result::CartwrightResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser configuration for a driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Timeout for a single navigation in milliseconds
    pub navigation_timeout_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
            navigation_timeout_ms: 30_000,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Navigation timeout as Duration
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

/// Abstract driver trait for browser automation
///
/// Every query method observes the current view without waiting; bounded waits
/// are layered on top by [`crate::wait::ElementWaiter`].
#[async_trait]
pub trait StoreDriver: Send + Sync + 'static {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> CartwrightResult<()>;

    /// Get current URL
    async fn current_url(&self) -> CartwrightResult<String>;

    /// Number of elements matching the selector
    async fn count(&self, selector: &Selector) -> CartwrightResult<usize>;

    /// Whether the first matching element exists and is displayed
    async fn is_visible(&self, selector: &Selector) -> CartwrightResult<bool>;

    /// Trimmed text content of every matching element, in document order
    async fn texts(&self, selector: &Selector) -> CartwrightResult<Vec<String>>;

    /// Click the `index`-th matching element
    async fn click_nth(&mut self, selector: &Selector, index: usize) -> CartwrightResult<()>;

    /// Replace the value of a form field
    async fn fill(&mut self, selector: &Selector, value: &str) -> CartwrightResult<()>;

    /// Whether a checkbox or radio control is checked
    async fn is_selected(&self, selector: &Selector) -> CartwrightResult<bool>;

    /// Pick the option of a `<select>` whose visible text equals `text`
    async fn select_by_visible_text(
        &mut self,
        selector: &Selector,
        text: &str,
    ) -> CartwrightResult<()>;

    /// Close the browser session
    async fn close(&mut self) -> CartwrightResult<()>;

    /// Click the first matching element
    async fn click(&mut self, selector: &Selector) -> CartwrightResult<()> {
        self.click_nth(selector, 0).await
    }

    /// Text of the first matching element
    async fn text(&self, selector: &Selector) -> CartwrightResult<Option<String>> {
        Ok(self.texts(selector).await?.into_iter().next())
    }
}

/// Creates one fresh driver per scenario run
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Driver type produced by this launcher
    type Driver: StoreDriver;

    /// Launch a new browser session
    async fn launch(&self) -> CartwrightResult<Self::Driver>;
}
