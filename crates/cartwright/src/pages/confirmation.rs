//! Order confirmation ("thank you") page.

use super::header::Header;
use super::landing::LandingPage;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::wait::ElementWaiter;

/// Confirmation page shown after an order is placed
#[derive(Debug)]
pub struct ConfirmationPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
}

impl<'s, D: StoreDriver> ConfirmationPage<'s, D> {
    /// Bind to a session showing the confirmation
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self { session }
    }

    fn message() -> Selector {
        Selector::css(".hero-primary")
    }

    /// Displayed confirmation message, as rendered
    pub async fn verify_message(&self) -> CartwrightResult<String> {
        self.session.wait_for_visible(&Self::message()).await?;
        self.session.text(&Self::message()).await
    }

    /// Sign out and return to the landing page
    pub async fn sign_out_app(self) -> CartwrightResult<LandingPage<'s, D>> {
        Header::sign_out(self.session).await?;
        let landing = LandingPage::new(self.session);
        landing.wait_until_loaded().await?;
        Ok(landing)
    }
}

impl<D: StoreDriver> PageObject<D> for ConfirmationPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "confirmation"
    }

    fn ready_selector(&self) -> Selector {
        Self::message()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}
