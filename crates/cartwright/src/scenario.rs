//! End-to-end scenarios composed from page-object transitions.
//!
//! A scenario drives one [`Session`] it does not own: the runner launches the
//! session before and closes it after, whatever the outcome.

use crate::config::{OrderHistoryConfig, SuiteConfig};
use crate::data::PurchaseRecord;
use crate::driver::StoreDriver;
use crate::page_object::same_product;
use crate::pages::{FieldPolicy, LandingPage, RegistrationForm};
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Named end-to-end flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Register, buy one product, confirm, sign out. Runs once per fixture record.
    PurchaseFlow,
    /// Log in with the configured account and find the configured product in
    /// its order history
    OrderHistoryCheck,
}

impl Scenario {
    /// Every scenario, in declaration order
    pub const ALL: [Self; 2] = [Self::PurchaseFlow, Self::OrderHistoryCheck];

    /// Stable name used on the command line and in reports
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PurchaseFlow => "purchase-flow",
            Self::OrderHistoryCheck => "order-history-check",
        }
    }

    /// Scenarios that must have passed earlier in the same run
    #[must_use]
    pub const fn depends_on(&self) -> &'static [Self] {
        match self {
            Self::PurchaseFlow => &[],
            Self::OrderHistoryCheck => &[Self::PurchaseFlow],
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = CartwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CartwrightError::Config {
                message: format!(
                    "unknown scenario '{s}' (expected one of: {})",
                    Self::ALL.map(|sc| sc.name()).join(", ")
                ),
            })
    }
}

/// Settings a purchase flow asserts against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseExpectations {
    /// Partial country name typed at checkout
    pub checkout_country: String,
    /// Confirmation text, compared case-insensitively
    pub confirmation: String,
    /// Occupation handling during registration
    pub occupation_policy: FieldPolicy,
}

impl PurchaseExpectations {
    /// Expectations for a suite configuration
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self {
            checkout_country: config.checkout_country.clone(),
            confirmation: config.expected_confirmation.clone(),
            occupation_policy: if config.occupation_optional {
                FieldPolicy::Optional
            } else {
                FieldPolicy::Required
            },
        }
    }
}

impl Default for PurchaseExpectations {
    fn default() -> Self {
        Self::from_config(&SuiteConfig::default())
    }
}

/// What a passing purchase flow observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOutcome {
    /// Product bought
    pub product: String,
    /// Cart contents right before checkout
    pub cart: Vec<String>,
    /// Country chosen at checkout
    pub country: String,
    /// Confirmation text as displayed
    pub confirmation: String,
}

impl fmt::Display for PurchaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ordered '{}' shipping to {} ({})",
            self.product, self.country, self.confirmation
        )
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> CartwrightResult<()> {
    if condition {
        Ok(())
    } else {
        Err(CartwrightError::assertion(message()))
    }
}

/// Register the record's account, buy its product and sign out.
///
/// Fails on the first error or unmet expectation; the session is left as is.
pub async fn purchase_flow<D: StoreDriver>(
    session: &mut Session<D>,
    record: &PurchaseRecord,
    expect: &PurchaseExpectations,
) -> CartwrightResult<PurchaseOutcome> {
    info!(record = %record.label(), "purchase flow started");

    let mut landing = LandingPage::new(session);
    landing.go_to().await?;

    let form = RegistrationForm::from_record(record).with_occupation_policy(expect.occupation_policy);
    let landing = landing
        .go_to_registration()
        .await?
        .complete_registration(&form)
        .await?;

    let mut catalog = landing.login(&record.email, &record.password).await?;
    let _ = catalog.get_products_list().await?;
    catalog.add_product_to_cart(&record.product).await?;

    let cart_page = catalog.go_to_cart_page().await?;
    let cart = cart_page.cart_products().await?;
    ensure(cart_page.get_cart_products_list(&record.product).await?, || {
        format!("'{}' missing from cart {cart:?}", record.product)
    })?;
    let extras: Vec<&String> = cart
        .iter()
        .filter(|item| !same_product(item, &record.product))
        .collect();
    if !extras.is_empty() {
        warn!(product = %record.product, ?extras, "cart holds other items");
    }

    let mut checkout = cart_page.go_to_checkout().await?;
    let country = checkout.select_country(&expect.checkout_country).await?;
    let confirmation_page = checkout.submit_order().await?;

    let confirmation = confirmation_page.verify_message().await?;
    ensure(
        confirmation.trim().to_lowercase() == expect.confirmation.trim().to_lowercase(),
        || {
            format!(
                "confirmation '{confirmation}' does not match '{}'",
                expect.confirmation
            )
        },
    )?;
    let _ = confirmation_page.sign_out_app().await?;

    info!(product = %record.product, %country, "purchase flow passed");
    Ok(PurchaseOutcome {
        product: record.product.clone(),
        cart,
        country,
        confirmation,
    })
}

/// Log in with the configured account and require the configured product in
/// its order history.
pub async fn order_history_check<D: StoreDriver>(
    session: &mut Session<D>,
    history: &OrderHistoryConfig,
) -> CartwrightResult<()> {
    if !history.has_credentials() {
        return Err(CartwrightError::Config {
            message: "order history check needs order_history.email and order_history.password"
                .to_string(),
        });
    }
    info!(email = %history.email, product = %history.product, "order history check started");

    let mut landing = LandingPage::new(session);
    landing.go_to().await?;
    let catalog = landing.login(&history.email, &history.password).await?;
    let orders = catalog.go_to_order_history_page().await?;

    let found = orders
        .verify_product_on_order_history(&history.product)
        .await?;
    ensure(found, || {
        format!("'{}' not in order history of {}", history.product, history.email)
    })?;
    let _ = orders.sign_out_app().await?;

    info!(product = %history.product, "order history check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{buyer_record, fast_session, signed_in, BUYER_EMAIL, BUYER_PASSWORD};
    use crate::pages::ProductCatalogPage;
    use crate::simulator::StorefrontSimulator;

    mod scenario_enum_tests {
        use super::*;

        #[test]
        fn test_names_round_trip() {
            for scenario in Scenario::ALL {
                assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
            }
            assert_eq!(
                "Order-History-Check".parse::<Scenario>().unwrap(),
                Scenario::OrderHistoryCheck
            );
        }

        #[test]
        fn test_unknown_name_lists_choices() {
            let err = "checkout".parse::<Scenario>().unwrap_err();
            assert!(err.to_string().contains("purchase-flow"));
        }

        #[test]
        fn test_history_depends_on_purchase() {
            assert_eq!(
                Scenario::OrderHistoryCheck.depends_on(),
                &[Scenario::PurchaseFlow]
            );
            assert!(Scenario::PurchaseFlow.depends_on().is_empty());
        }

        #[test]
        fn test_expectations_follow_config() {
            let mut config = SuiteConfig::default();
            assert_eq!(
                PurchaseExpectations::from_config(&config).occupation_policy,
                FieldPolicy::Optional
            );
            config.occupation_optional = false;
            assert_eq!(
                PurchaseExpectations::from_config(&config).occupation_policy,
                FieldPolicy::Required
            );
        }
    }

    mod flow_tests {
        use super::*;

        #[tokio::test]
        async fn test_purchase_flow_passes() {
            let sim = StorefrontSimulator::new();
            let mut session = fast_session(&sim);
            let outcome = purchase_flow(
                &mut session,
                &buyer_record("ADIDAS ORIGINAL"),
                &PurchaseExpectations::default(),
            )
            .await
            .unwrap();

            assert_eq!(outcome.cart, ["ADIDAS ORIGINAL"]);
            assert_eq!(outcome.country, "British Indian Ocean Territory");
            assert_eq!(sim.orders_for(BUYER_EMAIL), ["ADIDAS ORIGINAL"]);
        }

        #[tokio::test]
        async fn test_leftover_cart_items_do_not_fail_the_flow() {
            let sim = StorefrontSimulator::new();
            let mut earlier = signed_in(&sim).await;
            ProductCatalogPage::new(&mut earlier)
                .add_product_to_cart("ZARA COAT 3")
                .await
                .unwrap();

            let mut session = fast_session(&sim);
            let outcome = purchase_flow(
                &mut session,
                &buyer_record("ADIDAS ORIGINAL"),
                &PurchaseExpectations::default(),
            )
            .await
            .unwrap();

            assert_eq!(outcome.cart, ["ZARA COAT 3", "ADIDAS ORIGINAL"]);
            assert_eq!(sim.orders_for(BUYER_EMAIL), ["ZARA COAT 3", "ADIDAS ORIGINAL"]);
        }

        #[tokio::test]
        async fn test_wrong_confirmation_is_assertion_failure() {
            let sim = StorefrontSimulator::new();
            let mut session = fast_session(&sim);
            let expect = PurchaseExpectations {
                confirmation: "Order received".to_string(),
                ..PurchaseExpectations::default()
            };
            let err = purchase_flow(&mut session, &buyer_record("ZARA COAT 3"), &expect)
                .await
                .unwrap_err();
            assert!(err.is_assertion());
        }

        #[tokio::test]
        async fn test_history_without_credentials_is_config_error() {
            let sim = StorefrontSimulator::new();
            let mut session = fast_session(&sim);
            let err = order_history_check(&mut session, &OrderHistoryConfig::default())
                .await
                .unwrap_err();
            assert!(matches!(err, CartwrightError::Config { .. }));
        }

        #[tokio::test]
        async fn test_history_on_fresh_store_fails() {
            let sim = StorefrontSimulator::new();
            sim.seed_account(BUYER_EMAIL, BUYER_PASSWORD);
            let mut session = fast_session(&sim);
            let history = OrderHistoryConfig {
                email: BUYER_EMAIL.to_string(),
                password: BUYER_PASSWORD.to_string(),
                ..OrderHistoryConfig::default()
            };
            let err = order_history_check(&mut session, &history).await.unwrap_err();
            assert!(err.is_assertion(), "{err}");
        }
    }
}
