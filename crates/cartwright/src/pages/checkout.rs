//! Checkout: shipping country and order submission.

use super::confirmation::ConfirmationPage;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use crate::wait::ElementWaiter;
use tracing::info;

/// Checkout page
#[derive(Debug)]
pub struct CheckOutPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
}

impl<'s, D: StoreDriver> CheckOutPage<'s, D> {
    /// Bind to a session showing the checkout form
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self { session }
    }

    fn country_input() -> Selector {
        Selector::css("[placeholder='Select Country']")
    }

    fn results() -> Selector {
        Selector::css(".ta-results")
    }

    fn result_options() -> Selector {
        Selector::css(".ta-results button")
    }

    fn submit_button() -> Selector {
        Selector::css(".action__submit")
    }

    /// Type `partial` into the country search and pick the first offered
    /// country whose name contains it. Returns the chosen country.
    ///
    /// Retyping resets the search, so repeating the call selects the same
    /// country again.
    pub async fn select_country(&mut self, partial: &str) -> CartwrightResult<String> {
        self.session.fill(&Self::country_input(), partial).await?;
        self.session.wait_for_visible(&Self::results()).await?;

        let offered = self.session.texts(&Self::result_options()).await?;
        let (index, country) = offered
            .into_iter()
            .enumerate()
            .find(|(_, name)| name.contains(partial))
            .ok_or_else(|| CartwrightError::CountryNotFound {
                partial: partial.to_string(),
            })?;

        self.session.click_nth(&Self::result_options(), index).await?;
        info!(%country, "shipping country selected");
        Ok(country)
    }

    /// Place the order
    pub async fn submit_order(self) -> CartwrightResult<ConfirmationPage<'s, D>> {
        self.session.click(&Self::submit_button()).await?;
        let page = ConfirmationPage::new(self.session);
        page.wait_until_loaded().await?;
        Ok(page)
    }
}

impl<D: StoreDriver> PageObject<D> for CheckOutPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "checkout"
    }

    fn ready_selector(&self) -> Selector {
        Self::country_input()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}
