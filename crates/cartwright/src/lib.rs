//! Cartwright: end-to-end storefront tests in Rust
//!
//! Cartwright drives a web storefront through a browser the way a shopper
//! would: register, log in, add a product to the cart, check out, confirm,
//! and later find the order in the account's history.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CARTWRIGHT Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Fixture    │    │ Scenario   │    │ Page       │            │
//! │   │ (JSON)     │───►│ Runner     │───►│ Objects    │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │ StoreDriver       │
//! │                          ┌──────────────────┴───────┐           │
//! │                          ▼                          ▼           │
//! │                   ┌────────────┐            ┌────────────┐      │
//! │                   │ Chromium   │            │ Storefront │      │
//! │                   │ (CDP)      │            │ Simulator  │      │
//! │                   └────────────┘            └────────────┘      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Chromium driver (feature `browser`)
#[cfg(feature = "browser")]
pub mod browser;

/// Suite configuration
pub mod config;

/// Fixture loading
pub mod data;

/// Browser automation capability
pub mod driver;

/// Element selectors
pub mod locator;

/// Page Object Model support
pub mod page_object;

/// Storefront page objects
pub mod pages;

/// Result and error types
pub mod result;

/// Scenario execution and reports
pub mod runner;

/// End-to-end scenarios
pub mod scenario;

/// Browser sessions
pub mod session;

/// In-memory storefront
pub mod simulator;

/// Bounded waits
pub mod wait;

pub use config::SuiteConfig;
pub use result::{CartwrightError, CartwrightResult};

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "browser")]
    pub use super::browser::{ChromiumDriver, ChromiumLauncher};
    pub use super::config::{OrderHistoryConfig, SuiteConfig};
    pub use super::data::{load_purchase_records, load_records, PurchaseRecord, TestRecord};
    pub use super::driver::{DriverConfig, SessionLauncher, StoreDriver};
    pub use super::locator::Selector;
    pub use super::page_object::PageObject;
    pub use super::pages::{
        CartPage, CheckOutPage, ConfirmationPage, FieldPolicy, Gender, LandingPage,
        OrderHistoryPage, ProductCatalogPage, RegistrationForm, RegistrationPage,
    };
    pub use super::result::{CartwrightError, CartwrightResult};
    pub use super::runner::{OutcomeStatus, ScenarioOutcome, ScenarioPlan, ScenarioRunner, SuiteReport};
    pub use super::scenario::{
        order_history_check, purchase_flow, PurchaseExpectations, PurchaseOutcome, Scenario,
    };
    pub use super::session::Session;
    pub use super::simulator::{SimulatedBrowser, StorefrontSimulator};
    pub use super::wait::{ElementWaiter, WaitOptions};
}
