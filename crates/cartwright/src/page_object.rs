//! Page Object Model support.
//!
//! Each storefront page is a type that mutably borrows the [`Session`] for as
//! long as it is the active page. Navigation methods consume the current page
//! and return the next one, so a stale page cannot be used after a transition
//! and exactly one page owns the session at any time.

use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::wait::ElementWaiter;
use async_trait::async_trait;
use tracing::debug;

/// A page (or persistent component) of the storefront.
///
/// # Example
///
/// ```ignore
/// let landing = LandingPage::new(&mut session);
/// landing.wait_until_loaded().await?;
/// let catalog = landing.login("buyer@example.com", "secret").await?;
/// ```
#[async_trait]
pub trait PageObject<D: StoreDriver>: Send + Sync {
    /// Page name for logging
    fn page_name(&self) -> &'static str;

    /// Element whose visibility means the page is ready for interaction
    fn ready_selector(&self) -> Selector;

    /// Session the page is bound to
    fn session(&self) -> &Session<D>;

    /// Wait until [`PageObject::ready_selector`] is visible
    async fn wait_until_loaded(&self) -> CartwrightResult<()> {
        let selector = self.ready_selector();
        debug!(page = self.page_name(), %selector, "waiting for page");
        self.session().wait_for_visible(&selector).await
    }
}

/// Case-insensitive product name comparison, ignoring surrounding whitespace
#[must_use]
pub fn same_product(displayed: &str, wanted: &str) -> bool {
    displayed.trim().to_lowercase() == wanted.trim().to_lowercase()
}
