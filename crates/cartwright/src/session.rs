//! One browser session and the wait configuration it was built with.

use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::result::CartwrightResult;
use crate::wait::{wait_for_any_visible, wait_for_state, ElementWaiter, WaitOptions, WaitState};
use async_trait::async_trait;
use tracing::debug;

/// A live browser session owned by exactly one scenario run.
///
/// Page objects borrow the session mutably; the runner keeps ownership so it
/// can close the session whatever the scenario outcome.
#[derive(Debug)]
pub struct Session<D: StoreDriver> {
    driver: D,
    base_url: String,
    wait: WaitOptions,
    closed: bool,
}

impl<D: StoreDriver> Session<D> {
    /// Wrap a launched driver
    pub fn new(driver: D, base_url: impl Into<String>, wait: WaitOptions) -> Self {
        Self {
            driver,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            wait,
            closed: false,
        }
    }

    /// Application root URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a route below the application root
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether [`Session::close`] already ran
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Navigate to an absolute URL
    pub async fn navigate(&mut self, url: &str) -> CartwrightResult<()> {
        debug!(url, "navigate");
        self.driver.navigate(url).await
    }

    /// Clear a field and type `value` into it
    pub async fn fill(&mut self, selector: &Selector, value: &str) -> CartwrightResult<()> {
        debug!(%selector, "fill");
        self.driver.fill(selector, value).await
    }

    /// Click the first element matching `selector`
    pub async fn click(&mut self, selector: &Selector) -> CartwrightResult<()> {
        debug!(%selector, "click");
        self.driver.click(selector).await
    }

    /// Click the `index`-th element matching `selector`
    pub async fn click_nth(&mut self, selector: &Selector, index: usize) -> CartwrightResult<()> {
        debug!(%selector, index, "click");
        self.driver.click_nth(selector, index).await
    }

    /// Texts of all elements matching `selector`
    pub async fn texts(&self, selector: &Selector) -> CartwrightResult<Vec<String>> {
        self.driver.texts(selector).await
    }

    /// Text of the first element matching `selector`, empty if absent
    pub async fn text(&self, selector: &Selector) -> CartwrightResult<String> {
        Ok(self.driver.text(selector).await?.unwrap_or_default())
    }

    /// Choose the drop-down option whose visible text is `text`
    pub async fn select_by_visible_text(&mut self, selector: &Selector, text: &str) -> CartwrightResult<()> {
        debug!(%selector, text, "select");
        self.driver.select_by_visible_text(selector, text).await
    }

    /// Set a checkbox or radio to `checked`, clicking only when the state differs
    pub async fn set_checked(&mut self, selector: &Selector, checked: bool) -> CartwrightResult<()> {
        if self.driver.is_selected(selector).await? != checked {
            self.click(selector).await?;
        }
        Ok(())
    }

    /// Close the browser. Later calls are no-ops.
    pub async fn close(&mut self) -> CartwrightResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!("closing browser session");
        self.driver.close().await
    }
}

#[async_trait]
impl<D: StoreDriver> ElementWaiter for Session<D> {
    fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    async fn wait_for_visible(&self, selector: &Selector) -> CartwrightResult<()> {
        wait_for_state(&self.driver, selector, WaitState::Visible, &self.wait).await?;
        Ok(())
    }

    async fn wait_for_hidden(&self, selector: &Selector) -> CartwrightResult<()> {
        wait_for_state(&self.driver, selector, WaitState::Hidden, &self.wait).await?;
        Ok(())
    }

    async fn wait_for_any(&self, selectors: &[Selector]) -> CartwrightResult<usize> {
        wait_for_any_visible(&self.driver, selectors, &self.wait).await
    }
}
