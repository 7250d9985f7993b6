//! Past orders of the signed-in account.

use super::header::Header;
use super::landing::LandingPage;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::{same_product, PageObject};
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::wait::ElementWaiter;
use tracing::debug;

/// Order history page
#[derive(Debug)]
pub struct OrderHistoryPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
}

impl<'s, D: StoreDriver> OrderHistoryPage<'s, D> {
    /// Bind to a session showing the order history
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self { session }
    }

    fn product_cells() -> Selector {
        Selector::css("tr td:nth-child(3)")
    }

    fn no_orders_notice() -> Selector {
        Selector::css_with_text(".mt-4", "No Orders")
    }

    /// Product names of past orders, newest first. Empty when the account
    /// has never ordered.
    pub async fn ordered_products(&self) -> CartwrightResult<Vec<String>> {
        let shown = self
            .session
            .wait_for_any(&[Self::product_cells(), Self::no_orders_notice()])
            .await?;
        if shown == 0 {
            self.session.texts(&Self::product_cells()).await
        } else {
            debug!("account has no orders");
            Ok(Vec::new())
        }
    }

    /// Whether any past order is for `name` (any case)
    pub async fn verify_product_on_order_history(&self, name: &str) -> CartwrightResult<bool> {
        Ok(self
            .ordered_products()
            .await?
            .iter()
            .any(|product| same_product(product, name)))
    }

    /// Sign out and return to the landing page
    pub async fn sign_out_app(self) -> CartwrightResult<LandingPage<'s, D>> {
        Header::sign_out(self.session).await?;
        let landing = LandingPage::new(self.session);
        landing.wait_until_loaded().await?;
        Ok(landing)
    }
}

impl<D: StoreDriver> PageObject<D> for OrderHistoryPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "order history"
    }

    fn ready_selector(&self) -> Selector {
        Header::orders_link()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}
