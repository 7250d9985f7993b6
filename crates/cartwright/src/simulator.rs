//! In-memory storefront.
//!
//! [`StorefrontSimulator`] stands in for the target application: it keeps the
//! server-side state (accounts, carts, orders) shared by every session it
//! launches, and each [`SimulatedBrowser`] renders the current screen as a flat
//! list of elements carrying the same identifiers the real storefront uses.
//! Selectors resolve by exact CSS string plus optional text filter.

use crate::driver::{SessionLauncher, StoreDriver};
use crate::locator::Selector;
use crate::result::{CartwrightError, CartwrightResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Products listed when no catalog is supplied
pub const DEFAULT_CATALOG: [&str; 3] = ["ZARA COAT 3", "ADIDAS ORIGINAL", "IPHONE 13 PRO"];

/// Countries offered by the checkout search, in display order
pub const DEFAULT_COUNTRIES: [&str; 6] = [
    "British Indian Ocean Territory",
    "India",
    "Indonesia",
    "Germany",
    "Ghana",
    "Greece",
];

/// Occupations in the registration drop-down
pub const DEFAULT_OCCUPATIONS: [&str; 4] = ["Doctor", "Student", "Engineer", "Scientist"];

const CONFIRMATION_TEXT: &str = "THANKYOU FOR THE ORDER.";
const NO_ORDERS_TEXT: &str = "You have No Orders to show at this time.";

/// Registered account as stored server-side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Mobile number
    pub phone: String,
    /// Selected occupation, empty when none
    pub occupation: String,
    /// Selected gender, empty when none
    pub gender: String,
    /// Password
    pub password: String,
}

#[derive(Debug, Default)]
struct Backend {
    catalog: Vec<String>,
    countries: Vec<String>,
    occupations: Vec<String>,
    accounts: HashMap<String, Account>,
    carts: HashMap<String, Vec<String>>,
    orders: HashMap<String, Vec<String>>,
    offline: bool,
    launched: usize,
    closed: usize,
}

fn lock(backend: &Mutex<Backend>) -> MutexGuard<'_, Backend> {
    backend.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared in-memory storefront; launches one [`SimulatedBrowser`] per session
#[derive(Debug, Clone)]
pub struct StorefrontSimulator {
    backend: Arc<Mutex<Backend>>,
}

impl Default for StorefrontSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StorefrontSimulator {
    /// Storefront with the default catalog and no accounts
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(DEFAULT_CATALOG)
    }

    /// Storefront listing the given products
    #[must_use]
    pub fn with_catalog<S: Into<String>>(products: impl IntoIterator<Item = S>) -> Self {
        let backend = Backend {
            catalog: products.into_iter().map(Into::into).collect(),
            countries: DEFAULT_COUNTRIES.iter().map(ToString::to_string).collect(),
            occupations: DEFAULT_OCCUPATIONS.iter().map(ToString::to_string).collect(),
            ..Backend::default()
        };
        Self {
            backend: Arc::new(Mutex::new(backend)),
        }
    }

    /// Make every navigation fail and drop every form submission, as if the
    /// host were unreachable
    pub fn set_offline(&self, offline: bool) {
        lock(&self.backend).offline = offline;
    }

    /// Create an account directly, bypassing the registration form
    pub fn seed_account(&self, email: &str, password: &str) {
        let _ = lock(&self.backend).accounts.insert(
            email.to_string(),
            Account {
                first_name: String::new(),
                last_name: String::new(),
                phone: String::new(),
                occupation: String::new(),
                gender: String::new(),
                password: password.to_string(),
            },
        );
    }

    /// Stored account for `email`
    #[must_use]
    pub fn account(&self, email: &str) -> Option<Account> {
        lock(&self.backend).accounts.get(email).cloned()
    }

    /// Products ordered by `email`, oldest first
    #[must_use]
    pub fn orders_for(&self, email: &str) -> Vec<String> {
        lock(&self.backend)
            .orders
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Products currently in the cart of `email`
    #[must_use]
    pub fn cart_for(&self, email: &str) -> Vec<String> {
        lock(&self.backend)
            .carts
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of sessions launched so far
    #[must_use]
    pub fn launched_sessions(&self) -> usize {
        lock(&self.backend).launched
    }

    /// Number of sessions closed so far
    #[must_use]
    pub fn closed_sessions(&self) -> usize {
        lock(&self.backend).closed
    }

    /// Sessions launched but not yet closed
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        let backend = lock(&self.backend);
        backend.launched - backend.closed
    }

    /// Open a new browser session synchronously
    #[must_use]
    pub fn open(&self) -> SimulatedBrowser {
        lock(&self.backend).launched += 1;
        SimulatedBrowser {
            backend: Arc::clone(&self.backend),
            url: "about:blank".to_string(),
            screen: Screen::Blank,
            user: None,
            fields: HashMap::new(),
            checked: BTreeSet::new(),
            toast: None,
            picked_country: None,
            closed: false,
        }
    }
}

#[async_trait]
impl SessionLauncher for StorefrontSimulator {
    type Driver = SimulatedBrowser;

    async fn launch(&self) -> CartwrightResult<SimulatedBrowser> {
        Ok(self.open())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Blank,
    Landing,
    Registration,
    Catalog,
    Cart,
    Checkout,
    Confirmation,
    Orders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    None,
    Input,
    Select(Vec<String>),
    Toggle,
    Radio(&'static str),
    Login,
    OpenRegistration,
    Register,
    AddToCart(usize),
    OpenCart,
    OpenOrders,
    Checkout,
    PickCountry(String),
    PlaceOrder,
    SignOut,
}

#[derive(Debug, Clone)]
struct Element {
    css: &'static str,
    text: String,
    action: Action,
}

impl Element {
    fn new(css: &'static str, text: impl Into<String>, action: Action) -> Self {
        Self {
            css,
            text: text.into(),
            action,
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        self.css == selector.css_str()
            && selector
                .text_filter()
                .map_or(true, |t| self.text.contains(t))
    }
}

/// One simulated browser session
#[derive(Debug)]
pub struct SimulatedBrowser {
    backend: Arc<Mutex<Backend>>,
    url: String,
    screen: Screen,
    user: Option<String>,
    fields: HashMap<&'static str, String>,
    checked: BTreeSet<&'static str>,
    toast: Option<String>,
    picked_country: Option<String>,
    closed: bool,
}

const EMAIL: &str = "#userEmail";
const PASSWORD: &str = "#userPassword";
const CONFIRM_PASSWORD: &str = "#confirmPassword";
const FIRST_NAME: &str = "#firstName";
const LAST_NAME: &str = "#lastName";
const MOBILE: &str = "#userMobile";
const OCCUPATION: &str = "select[formcontrolname='occupation']";
const MALE: &str = "input[type='radio'][value='Male']";
const FEMALE: &str = "input[type='radio'][value='Female']";
const TERMS: &str = "input[formcontrolname='required'][type='checkbox']";
const COUNTRY: &str = "[placeholder='Select Country']";

impl SimulatedBrowser {
    fn ensure_open(&self) -> CartwrightResult<()> {
        if self.closed {
            Err(CartwrightError::driver("session is closed"))
        } else {
            Ok(())
        }
    }

    fn field(&self, css: &str) -> &str {
        self.fields.get(css).map_or("", String::as_str)
    }

    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.toast = None;
        self.fields.clear();
        self.checked.clear();
        self.picked_country = None;
    }

    fn render(&self) -> Vec<Element> {
        let backend = lock(&self.backend);
        let mut elements = Vec::new();

        if let Some(toast) = &self.toast {
            for css in ["#toast-container", "[class*='toast-message']", "[class*='flyInOut']"] {
                elements.push(Element::new(css, toast.clone(), Action::None));
            }
        }

        let header = matches!(
            self.screen,
            Screen::Catalog | Screen::Cart | Screen::Checkout | Screen::Confirmation | Screen::Orders
        );
        if header {
            elements.push(Element::new("[routerlink*='cart']", "Cart", Action::OpenCart));
            elements.push(Element::new("[routerlink*='myorders']", "ORDERS", Action::OpenOrders));
            elements.push(Element::new("button", "Sign Out", Action::SignOut));
        }

        match self.screen {
            Screen::Blank => {}
            Screen::Landing => {
                elements.push(Element::new(EMAIL, "", Action::Input));
                elements.push(Element::new(PASSWORD, "", Action::Input));
                elements.push(Element::new("#login", "Login", Action::Login));
                elements.push(Element::new("a.text-reset", "Register here", Action::OpenRegistration));
            }
            Screen::Registration => {
                for css in [FIRST_NAME, LAST_NAME, EMAIL, MOBILE, PASSWORD, CONFIRM_PASSWORD] {
                    elements.push(Element::new(css, "", Action::Input));
                }
                elements.push(Element::new(
                    OCCUPATION,
                    "",
                    Action::Select(backend.occupations.clone()),
                ));
                elements.push(Element::new(MALE, "", Action::Radio(MALE)));
                elements.push(Element::new(FEMALE, "", Action::Radio(FEMALE)));
                elements.push(Element::new(TERMS, "", Action::Toggle));
                elements.push(Element::new("#login", "Register", Action::Register));
            }
            Screen::Catalog => {
                for (i, product) in backend.catalog.iter().enumerate() {
                    elements.push(Element::new(".mb-3", product.clone(), Action::None));
                    elements.push(Element::new(".mb-3 b", product.clone(), Action::None));
                    elements.push(Element::new(
                        ".mb-3 .card-body button:last-of-type",
                        "Add To Cart",
                        Action::AddToCart(i),
                    ));
                }
            }
            Screen::Cart => {
                let cart = self
                    .user
                    .as_ref()
                    .and_then(|u| backend.carts.get(u))
                    .cloned()
                    .unwrap_or_default();
                for product in &cart {
                    elements.push(Element::new(".cartSection h3", product.clone(), Action::None));
                }
                if !cart.is_empty() {
                    elements.push(Element::new(".totalRow button", "Checkout", Action::Checkout));
                }
            }
            Screen::Checkout => {
                elements.push(Element::new(COUNTRY, "", Action::Input));
                let typed = self.field(COUNTRY).to_lowercase();
                if !typed.is_empty() && self.picked_country.is_none() {
                    elements.push(Element::new(".ta-results", "", Action::None));
                    for country in &backend.countries {
                        if country.to_lowercase().contains(&typed) {
                            elements.push(Element::new(
                                ".ta-results button",
                                country.clone(),
                                Action::PickCountry(country.clone()),
                            ));
                        }
                    }
                }
                elements.push(Element::new(".action__submit", "Place Order", Action::PlaceOrder));
            }
            Screen::Confirmation => {
                elements.push(Element::new(".hero-primary", CONFIRMATION_TEXT, Action::None));
            }
            Screen::Orders => {
                let orders = self
                    .user
                    .as_ref()
                    .and_then(|u| backend.orders.get(u))
                    .cloned()
                    .unwrap_or_default();
                if orders.is_empty() {
                    elements.push(Element::new(".mt-4", NO_ORDERS_TEXT, Action::None));
                } else {
                    elements.push(Element::new(".table", "", Action::None));
                    for product in orders.iter().rev() {
                        elements.push(Element::new("tr td:nth-child(3)", product.clone(), Action::None));
                    }
                }
            }
        }

        elements
    }

    fn matching(&self, selector: &Selector) -> Vec<Element> {
        self.render()
            .into_iter()
            .filter(|e| e.matches(selector))
            .collect()
    }

    fn perform(&mut self, action: Action) {
        trace!(?action, screen = ?self.screen, "simulated click");
        let request = matches!(
            action,
            Action::Login | Action::Register | Action::AddToCart(_) | Action::PlaceOrder
        );
        if request && lock(&self.backend).offline {
            trace!("storefront offline, request dropped");
            return;
        }
        match action {
            Action::None | Action::Input | Action::Select(_) => {}
            Action::Toggle => {
                if !self.checked.remove(TERMS) {
                    let _ = self.checked.insert(TERMS);
                }
            }
            Action::Radio(css) => {
                let _ = self.checked.remove(MALE);
                let _ = self.checked.remove(FEMALE);
                let _ = self.checked.insert(css);
            }
            Action::Login => self.login(),
            Action::OpenRegistration => self.show(Screen::Registration),
            Action::Register => self.register(),
            Action::AddToCart(index) => {
                let Some(user) = self.user.clone() else {
                    return;
                };
                let mut backend = lock(&self.backend);
                let Some(product) = backend.catalog.get(index).cloned() else {
                    return;
                };
                backend.carts.entry(user).or_default().push(product);
                drop(backend);
                self.toast = Some("Product Added To Cart".to_string());
            }
            Action::OpenCart => self.show(Screen::Cart),
            Action::OpenOrders => self.show(Screen::Orders),
            Action::Checkout => self.show(Screen::Checkout),
            Action::PickCountry(country) => {
                let _ = self.fields.insert(COUNTRY, country.clone());
                self.picked_country = Some(country);
            }
            Action::PlaceOrder => self.place_order(),
            Action::SignOut => {
                self.user = None;
                self.show(Screen::Landing);
                self.toast = Some("Logout Successfully".to_string());
            }
        }
    }

    fn login(&mut self) {
        let email = self.field(EMAIL).to_string();
        let password = self.field(PASSWORD).to_string();
        let valid = lock(&self.backend)
            .accounts
            .get(&email)
            .is_some_and(|a| a.password == password);

        if valid {
            self.user = Some(email);
            self.show(Screen::Catalog);
            self.toast = Some("Login Successfully".to_string());
        } else {
            self.toast = Some("Incorrect email or password.".to_string());
        }
    }

    fn register(&mut self) {
        let email = self.field(EMAIL).to_string();
        let password = self.field(PASSWORD).to_string();
        let complete = [FIRST_NAME, EMAIL, MOBILE, PASSWORD]
            .iter()
            .all(|css| !self.field(css).is_empty());
        if !complete || password != self.field(CONFIRM_PASSWORD) || !self.checked.contains(TERMS) {
            // The submit button stays disabled while the form is invalid
            return;
        }

        let gender = if self.checked.contains(MALE) {
            "Male"
        } else if self.checked.contains(FEMALE) {
            "Female"
        } else {
            ""
        };
        let account = Account {
            first_name: self.field(FIRST_NAME).to_string(),
            last_name: self.field(LAST_NAME).to_string(),
            phone: self.field(MOBILE).to_string(),
            occupation: self.field(OCCUPATION).to_string(),
            gender: gender.to_string(),
            password,
        };

        let mut backend = lock(&self.backend);
        let message = if backend.accounts.contains_key(&email) {
            "User already exisits with this Email Id!"
        } else {
            let _ = backend.accounts.insert(email, account);
            "Registered Successfully"
        };
        drop(backend);
        self.toast = Some(message.to_string());
    }

    fn place_order(&mut self) {
        let Some(user) = self.user.clone() else {
            return;
        };
        if self.picked_country.is_none() {
            self.toast = Some("Please Enter Full Shipping Information".to_string());
            return;
        }
        let mut backend = lock(&self.backend);
        let items = backend.carts.remove(&user).unwrap_or_default();
        if items.is_empty() {
            return;
        }
        backend.orders.entry(user).or_default().extend(items);
        drop(backend);
        self.show(Screen::Confirmation);
        self.toast = Some("Order Placed Successfully".to_string());
    }
}

#[async_trait]
impl StoreDriver for SimulatedBrowser {
    async fn navigate(&mut self, url: &str) -> CartwrightResult<()> {
        self.ensure_open()?;
        if lock(&self.backend).offline {
            return Err(CartwrightError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        let route = url.trim_end_matches('/');
        let screen = if route.ends_with("/auth/register") {
            Screen::Registration
        } else if self.user.is_some() {
            Screen::Catalog
        } else {
            Screen::Landing
        };
        self.url = url.to_string();
        self.show(screen);
        Ok(())
    }

    async fn current_url(&self) -> CartwrightResult<String> {
        self.ensure_open()?;
        Ok(self.url.clone())
    }

    async fn count(&self, selector: &Selector) -> CartwrightResult<usize> {
        self.ensure_open()?;
        Ok(self.matching(selector).len())
    }

    async fn is_visible(&self, selector: &Selector) -> CartwrightResult<bool> {
        self.ensure_open()?;
        Ok(!self.matching(selector).is_empty())
    }

    async fn texts(&self, selector: &Selector) -> CartwrightResult<Vec<String>> {
        self.ensure_open()?;
        Ok(self
            .matching(selector)
            .into_iter()
            .map(|e| e.text.trim().to_string())
            .collect())
    }

    async fn click_nth(&mut self, selector: &Selector, index: usize) -> CartwrightResult<()> {
        self.ensure_open()?;
        let element = self
            .matching(selector)
            .into_iter()
            .nth(index)
            .ok_or_else(|| CartwrightError::ElementNotFound {
                selector: format!("{selector} [{index}]"),
            })?;
        self.perform(element.action);
        Ok(())
    }

    async fn fill(&mut self, selector: &Selector, value: &str) -> CartwrightResult<()> {
        self.ensure_open()?;
        let element = self
            .matching(selector)
            .into_iter()
            .find(|e| e.action == Action::Input)
            .ok_or_else(|| CartwrightError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        if element.css == COUNTRY {
            self.picked_country = None;
        }
        let _ = self.fields.insert(element.css, value.to_string());
        Ok(())
    }

    async fn is_selected(&self, selector: &Selector) -> CartwrightResult<bool> {
        self.ensure_open()?;
        let element = self
            .matching(selector)
            .into_iter()
            .next()
            .ok_or_else(|| CartwrightError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        Ok(self.checked.contains(element.css))
    }

    async fn select_by_visible_text(
        &mut self,
        selector: &Selector,
        text: &str,
    ) -> CartwrightResult<()> {
        self.ensure_open()?;
        let element = self
            .matching(selector)
            .into_iter()
            .next()
            .ok_or_else(|| CartwrightError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        match element.action {
            Action::Select(options) if options.iter().any(|o| o == text) => {
                let _ = self.fields.insert(element.css, text.to_string());
                Ok(())
            }
            _ => Err(CartwrightError::OptionNotFound {
                selector: selector.to_string(),
                option: text.to_string(),
            }),
        }
    }

    async fn close(&mut self) -> CartwrightResult<()> {
        self.ensure_open()?;
        self.closed = true;
        lock(&self.backend).closed += 1;
        Ok(())
    }
}
