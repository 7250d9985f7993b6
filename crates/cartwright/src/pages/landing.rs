//! Login page at the application root.

use super::catalog::ProductCatalogPage;
use super::registration::RegistrationPage;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::wait::ElementWaiter;
use tracing::info;

/// Landing page: login form plus the link to registration
#[derive(Debug)]
pub struct LandingPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
}

impl<'s, D: StoreDriver> LandingPage<'s, D> {
    /// Bind the landing page to a session. Does not navigate.
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self { session }
    }

    fn email_input() -> Selector {
        Selector::id("userEmail")
    }

    fn password_input() -> Selector {
        Selector::id("userPassword")
    }

    fn login_button() -> Selector {
        Selector::id("login")
    }

    fn error_toast() -> Selector {
        Selector::css("[class*='flyInOut']")
    }

    fn register_link() -> Selector {
        Selector::css("a.text-reset")
    }

    /// Open the application root and wait for the login form.
    ///
    /// Fails with a navigation error if the root is unreachable.
    pub async fn go_to(&mut self) -> CartwrightResult<()> {
        let url = self.session.url("");
        info!(%url, "opening storefront");
        self.session.navigate(&url).await?;
        self.wait_until_loaded().await
    }

    /// Submit credentials and hand the session to the catalog page.
    ///
    /// Rejected credentials are not detected here; the catalog's first wait
    /// times out instead. Use [`LandingPage::error_message`] before calling
    /// this to test a rejection.
    pub async fn login(mut self, email: &str, password: &str) -> CartwrightResult<ProductCatalogPage<'s, D>> {
        self.submit_credentials(email, password).await?;
        info!(email, "logged in");
        Ok(ProductCatalogPage::new(self.session))
    }

    /// Fill and submit the login form without leaving the page
    pub async fn submit_credentials(&mut self, email: &str, password: &str) -> CartwrightResult<()> {
        self.session.fill(&Self::email_input(), email).await?;
        self.session.fill(&Self::password_input(), password).await?;
        self.session.click(&Self::login_button()).await
    }

    /// Text of the login error toast
    pub async fn error_message(&self) -> CartwrightResult<String> {
        self.session.wait_for_visible(&Self::error_toast()).await?;
        self.session.text(&Self::error_toast()).await
    }

    /// Follow the registration link
    pub async fn go_to_registration(self) -> CartwrightResult<RegistrationPage<'s, D>> {
        self.session.click(&Self::register_link()).await?;
        let page = RegistrationPage::new(self.session);
        page.wait_until_loaded().await?;
        Ok(page)
    }
}

impl<D: StoreDriver> PageObject<D> for LandingPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "landing"
    }

    fn ready_selector(&self) -> Selector {
        Self::email_input()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}
