//! Property tests for idempotent form interactions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use cartwright::prelude::*;
use cartwright::simulator::DEFAULT_COUNTRIES;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

fn session(sim: &StorefrontSimulator) -> Session<SimulatedBrowser> {
    Session::new(
        sim.open(),
        "https://shop.test/client",
        WaitOptions::new().with_timeout(200).with_poll_interval(1),
    )
}

/// Session showing the checkout form with one item in the cart
async fn at_checkout(sim: &StorefrontSimulator) -> Session<SimulatedBrowser> {
    sim.seed_account("buyer@example.com", "pw");
    let mut session = session(sim);
    let mut landing = LandingPage::new(&mut session);
    landing.go_to().await.unwrap();
    let mut catalog = landing.login("buyer@example.com", "pw").await.unwrap();
    catalog.add_product_to_cart("ZARA COAT 3").await.unwrap();
    let _ = catalog
        .go_to_cart_page()
        .await
        .unwrap()
        .go_to_checkout()
        .await
        .unwrap();
    session
}

fn country_fragment() -> impl Strategy<Value = String> {
    (0..DEFAULT_COUNTRIES.len(), any::<prop::sample::Index>(), 1usize..8).prop_map(
        |(country, start, len)| {
            let chars: Vec<char> = DEFAULT_COUNTRIES[country].chars().collect();
            let start = start.index(chars.len());
            let end = (start + len).min(chars.len());
            chars[start..end].iter().collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_terms_checkbox_ends_in_requested_state(initial in any::<bool>(), requested in any::<bool>(), repeats in 1usize..4) {
        let checked = runtime().block_on(async {
            let sim = StorefrontSimulator::new();
            let mut session = session(&sim);
            session.navigate("https://shop.test/client/auth/register").await.unwrap();
            let terms = RegistrationPage::<SimulatedBrowser>::terms_checkbox();
            if initial {
                session.click(&terms).await.unwrap();
            }
            for _ in 0..repeats {
                session.set_checked(&terms, requested).await.unwrap();
            }
            session.driver().is_selected(&terms).await.unwrap()
        });
        prop_assert_eq!(checked, requested);
    }

    #[test]
    fn prop_select_country_contains_fragment_and_repeats(fragment in country_fragment()) {
        prop_assume!(!fragment.trim().is_empty());
        let (first, second) = runtime().block_on(async {
            let sim = StorefrontSimulator::new();
            let mut session = at_checkout(&sim).await;
            let mut checkout = CheckOutPage::new(&mut session);
            let first = checkout.select_country(&fragment).await.unwrap();
            let second = checkout.select_country(&fragment).await.unwrap();
            (first, second)
        });
        prop_assert!(first.contains(&fragment), "{} does not contain {}", first, fragment);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_unknown_product_never_reaches_cart(suffix in "[A-Z0-9]{4,12}") {
        let name = format!("NONEXISTENT-{suffix}");
        let (err, cart) = runtime().block_on(async {
            let sim = StorefrontSimulator::new();
            sim.seed_account("buyer@example.com", "pw");
            let mut session = session(&sim);
            let mut landing = LandingPage::new(&mut session);
            landing.go_to().await.unwrap();
            let mut catalog = landing.login("buyer@example.com", "pw").await.unwrap();
            let err = catalog.add_product_to_cart(&name).await.unwrap_err();
            (err, sim.cart_for("buyer@example.com"))
        });
        let is_not_found = matches!(err, CartwrightError::ProductNotFound { .. });
        prop_assert!(is_not_found);
        prop_assert!(cart.is_empty());
    }
}
