//! Account registration form.

use super::landing::LandingPage;
use crate::data::PurchaseRecord;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use crate::wait::ElementWaiter;
use tracing::{debug, info, warn};

/// Gender radio choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// "Male" radio
    Male,
    /// "Female" radio
    Female,
}

impl Gender {
    /// Parse a fixture label, case-insensitively. Unknown labels yield `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("male") {
            Some(Self::Male)
        } else if label.eq_ignore_ascii_case("female") {
            Some(Self::Female)
        } else {
            None
        }
    }

    /// Radio button value attribute
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// How a form field that the storefront may not offer is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldPolicy {
    /// A missing option fails the registration
    #[default]
    Required,
    /// A missing option is logged and skipped
    Optional,
}

/// Values typed into the registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email, also the login
    pub email: String,
    /// Mobile number
    pub phone: String,
    /// Occupation drop-down text
    pub occupation: String,
    /// Handling of an occupation the drop-down does not offer
    pub occupation_policy: FieldPolicy,
    /// Gender radio, left untouched when `None`
    pub gender: Option<Gender>,
    /// Password
    pub password: String,
    /// Confirmation password
    pub confirm_password: String,
    /// Desired state of the terms checkbox
    pub accept_terms: bool,
}

impl RegistrationForm {
    /// Form for a fixture record, terms accepted
    #[must_use]
    pub fn from_record(record: &PurchaseRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            occupation: record.occupation.clone(),
            occupation_policy: FieldPolicy::Required,
            gender: Gender::from_label(&record.gender),
            password: record.password.clone(),
            confirm_password: record.password.clone(),
            accept_terms: true,
        }
    }

    /// Set the occupation policy
    #[must_use]
    pub const fn with_occupation_policy(mut self, policy: FieldPolicy) -> Self {
        self.occupation_policy = policy;
        self
    }
}

/// Registration page
#[derive(Debug)]
pub struct RegistrationPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
}

impl<'s, D: StoreDriver> RegistrationPage<'s, D> {
    /// Bind to a session already showing the registration form
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self { session }
    }

    fn first_name() -> Selector {
        Selector::id("firstName")
    }

    fn last_name() -> Selector {
        Selector::id("lastName")
    }

    fn email() -> Selector {
        Selector::id("userEmail")
    }

    fn mobile() -> Selector {
        Selector::id("userMobile")
    }

    fn occupation() -> Selector {
        Selector::css("select[formcontrolname='occupation']")
    }

    fn gender_radio(gender: Gender) -> Selector {
        Selector::css(format!("input[type='radio'][value='{}']", gender.value()))
    }

    fn password() -> Selector {
        Selector::id("userPassword")
    }

    fn confirm_password() -> Selector {
        Selector::id("confirmPassword")
    }

    /// Terms checkbox
    #[must_use]
    pub fn terms_checkbox() -> Selector {
        Selector::css("input[formcontrolname='required'][type='checkbox']")
    }

    fn submit_button() -> Selector {
        Selector::id("login")
    }

    fn toast() -> Selector {
        Selector::css("[class*='toast-message']")
    }

    /// Type the form values. Radio and checkbox are clicked only when their
    /// state differs from the requested one.
    pub async fn fill_form(&mut self, form: &RegistrationForm) -> CartwrightResult<()> {
        self.session.fill(&Self::first_name(), &form.first_name).await?;
        self.session.fill(&Self::last_name(), &form.last_name).await?;
        self.session.fill(&Self::email(), &form.email).await?;
        self.session.fill(&Self::mobile(), &form.phone).await?;
        if form.occupation.trim().is_empty() {
            debug!("no occupation given, leaving the drop-down untouched");
        } else {
            self.select_occupation(&form.occupation, form.occupation_policy)
                .await?;
        }

        if let Some(gender) = form.gender {
            self.session
                .set_checked(&Self::gender_radio(gender), true)
                .await?;
        }

        self.session.fill(&Self::password(), &form.password).await?;
        self.session
            .fill(&Self::confirm_password(), &form.confirm_password)
            .await?;
        self.session
            .set_checked(&Self::terms_checkbox(), form.accept_terms)
            .await
    }

    async fn select_occupation(&mut self, occupation: &str, policy: FieldPolicy) -> CartwrightResult<()> {
        match self
            .session
            .select_by_visible_text(&Self::occupation(), occupation)
            .await
        {
            Ok(()) => Ok(()),
            Err(CartwrightError::OptionNotFound { option, .. })
                if policy == FieldPolicy::Optional =>
            {
                warn!(occupation = %option, "occupation not offered, leaving it unset");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Fill and submit the form, then wait for the confirmation toast
    pub async fn submit_registration(&mut self, form: &RegistrationForm) -> CartwrightResult<()> {
        self.fill_form(form).await?;
        self.session.click(&Self::submit_button()).await?;
        self.session.wait_for_visible(&Self::toast()).await
    }

    /// Text of the toast shown after submission
    pub async fn get_toast_message(&self) -> CartwrightResult<String> {
        self.session.wait_for_visible(&Self::toast()).await?;
        self.session.text(&Self::toast()).await
    }

    /// Register an account and return to the landing page.
    ///
    /// The toast text is logged but not judged, so an already registered
    /// email does not fail the flow.
    pub async fn complete_registration(
        mut self,
        form: &RegistrationForm,
    ) -> CartwrightResult<LandingPage<'s, D>> {
        self.submit_registration(form).await?;
        let message = self.get_toast_message().await?;
        info!(email = %form.email, %message, "registration submitted");

        let root = self.session.url("");
        debug!(%root, "returning to landing page");
        self.session.navigate(&root).await?;
        let landing = LandingPage::new(self.session);
        landing.wait_until_loaded().await?;
        Ok(landing)
    }
}

impl<D: StoreDriver> PageObject<D> for RegistrationPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "registration"
    }

    fn ready_selector(&self) -> Selector {
        Self::first_name()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}
