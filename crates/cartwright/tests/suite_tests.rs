//! Full suite runs against the in-memory storefront.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use cartwright::prelude::*;
use std::io::Write;
use std::path::PathBuf;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/purchase_order.json");

fn config() -> SuiteConfig {
    SuiteConfig::default()
        .with_base_url("https://shop.test/client")
        .with_fixture_path(FIXTURE)
        .with_history_credentials("asha.rao@example.com", "Secret#123")
        .with_wait(WaitOptions::new().with_timeout(200).with_poll_interval(1))
}

fn record(email: &str, product: &str) -> PurchaseRecord {
    PurchaseRecord {
        first_name: "Test".to_string(),
        last_name: "Buyer".to_string(),
        email: email.to_string(),
        phone: "9000000000".to_string(),
        occupation: "Student".to_string(),
        gender: "Male".to_string(),
        password: "pw".to_string(),
        product: product.to_string(),
    }
}

fn assert_no_leaked_sessions(sim: &StorefrontSimulator) {
    assert_eq!(sim.open_sessions(), 0);
    assert_eq!(sim.launched_sessions(), sim.closed_sessions());
}

mod full_suite {
    use super::*;

    #[tokio::test]
    async fn test_every_scenario_passes() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config());
        let report = runner.run(&ScenarioPlan::full()).await.unwrap();

        assert_eq!(report.outcomes.len(), 4, "{report:#?}");
        assert!(report.all_passed(), "{report:#?}");
        assert_eq!(
            report.outcomes.last().unwrap().scenario,
            Scenario::OrderHistoryCheck
        );
        assert_eq!(sim.launched_sessions(), 4);
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_runs_follow_fixture_order() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim, config());
        let report = runner.run(&ScenarioPlan::full()).await.unwrap();
        let labels: Vec<_> = report
            .outcomes
            .iter()
            .filter_map(|o| o.label.clone())
            .collect();
        assert_eq!(
            labels,
            [
                "asha.rao@example.com / ADIDAS ORIGINAL",
                "vikram.nair@example.com / ZARA COAT 3",
                "lena.ortiz@example.com / IPHONE 13 PRO",
            ]
        );
    }

    #[tokio::test]
    async fn test_orders_survive_sign_out() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config());
        let _ = runner.run(&ScenarioPlan::full()).await.unwrap();
        assert_eq!(sim.orders_for("asha.rao@example.com"), ["ADIDAS ORIGINAL"]);
        assert_eq!(sim.orders_for("vikram.nair@example.com"), ["ZARA COAT 3"]);
        assert!(sim.cart_for("asha.rao@example.com").is_empty());
    }

    #[tokio::test]
    async fn test_optional_occupation_and_unknown_gender() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config());
        let _ = runner.run(&ScenarioPlan::full()).await.unwrap();
        let account = sim.account("lena.ortiz@example.com").unwrap();
        assert_eq!(account.occupation, "");
        assert_eq!(account.gender, "");
    }

    #[tokio::test]
    async fn test_required_occupation_fails_that_record_only() {
        let sim = StorefrontSimulator::new();
        let mut config = config();
        config.occupation_optional = false;
        let report = ScenarioRunner::new(sim.clone(), config)
            .run(&ScenarioPlan::full())
            .await
            .unwrap();
        assert_eq!(report.failed(), 1);
        let failure = report.failures().next().unwrap();
        assert!(failure.error.as_deref().unwrap().contains("Astronaut"));
        assert!(report.outcomes.last().unwrap().is_passed());
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_blank_occupation_passes_when_required() {
        let sim = StorefrontSimulator::new();
        let mut config = config();
        config.occupation_optional = false;
        let mut buyer = record("no.job@example.com", "ZARA COAT 3");
        buyer.occupation = String::new();
        let report = ScenarioRunner::new(sim.clone(), config)
            .run_plan(&ScenarioPlan::resolve(&[Scenario::PurchaseFlow]), &[buyer], |_| {})
            .await;
        assert!(report.all_passed(), "{:?}", report.outcomes);
        assert_eq!(sim.account("no.job@example.com").unwrap().occupation, "");
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_record_limit() {
        let sim = StorefrontSimulator::new();
        let mut config = config();
        config.record_limit = Some(1);
        let runner = ScenarioRunner::new(sim, config);
        assert_eq!(runner.load_records().unwrap().len(), 1);
    }
}

mod ordering {
    use super::*;

    #[tokio::test]
    async fn test_history_alone_on_fresh_store_fails() {
        let sim = StorefrontSimulator::new();
        sim.seed_account("asha.rao@example.com", "Secret#123");
        let runner = ScenarioRunner::new(sim.clone(), config());
        let outcome = runner.run_order_history().await;
        assert!(outcome.is_failed());
        assert!(outcome.error.unwrap().contains("not in order history"));
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_history_skipped_when_no_purchase_passed() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config());
        let records = [record("x@example.com", "NONEXISTENT-ITEM-XYZ")];
        let plan = ScenarioPlan::resolve(&[Scenario::OrderHistoryCheck]);
        let report = runner.run_plan(&plan, &records, |_| {}).await;

        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        let history = report.outcomes.last().unwrap();
        assert_eq!(history.status, OutcomeStatus::Skipped);
        assert!(history.error.as_deref().unwrap().contains("requires 'purchase-flow'"));
        assert_eq!(sim.launched_sessions(), 1);
    }

    #[tokio::test]
    async fn test_history_skipped_without_records() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config());
        let report = runner.run_plan(&ScenarioPlan::full(), &[], |_| {}).await;
        assert_eq!(report.skipped(), 1);
        assert_eq!(sim.launched_sessions(), 0);
    }

    #[tokio::test]
    async fn test_fail_fast_skips_remaining_runs() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config()).with_fail_fast(true);
        let records = [
            record("a@example.com", "NONEXISTENT-ITEM-XYZ"),
            record("b@example.com", "ZARA COAT 3"),
        ];
        let mut seen = Vec::new();
        let report = runner
            .run_plan(&ScenarioPlan::full(), &records, |o| seen.push(o.status))
            .await;

        assert_eq!(
            seen,
            [OutcomeStatus::Failed, OutcomeStatus::Skipped, OutcomeStatus::Skipped]
        );
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(sim.launched_sessions(), 1);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_unknown_product_reported() {
        let sim = StorefrontSimulator::new();
        let runner = ScenarioRunner::new(sim.clone(), config());
        let outcome = runner
            .run_purchase(&record("x@example.com", "NONEXISTENT-ITEM-XYZ"))
            .await;
        assert!(outcome.is_failed());
        let error = outcome.error.unwrap();
        assert!(error.contains("NONEXISTENT-ITEM-XYZ"), "{error}");
        assert!(error.contains("not found in catalog"), "{error}");
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_assertion_failure_still_closes_session() {
        let sim = StorefrontSimulator::new();
        let mut config = config();
        config.expected_confirmation = "Order received".to_string();
        let runner = ScenarioRunner::new(sim.clone(), config);
        let outcome = runner.run_purchase(&record("x@example.com", "ZARA COAT 3")).await;
        assert!(outcome.error.unwrap().starts_with("Assertion failed"));
        assert_eq!(sim.closed_sessions(), 1);
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let sim = StorefrontSimulator::new();
        sim.set_offline(true);
        let runner = ScenarioRunner::new(sim.clone(), config());
        let report = runner.run(&ScenarioPlan::full()).await.unwrap();
        assert_eq!(report.failed(), 3);
        assert_eq!(report.skipped(), 1);
        for failure in report.failures() {
            assert!(failure.error.as_deref().unwrap().contains("Navigation"));
        }
        assert_no_leaked_sessions(&sim);
    }

    #[tokio::test]
    async fn test_malformed_fixture_aborts_run() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Product": "ZARA COAT 3"}}"#).unwrap();
        let config = config().with_fixture_path(PathBuf::from(file.path()));
        let runner = ScenarioRunner::new(StorefrontSimulator::new(), config);
        let err = runner.run(&ScenarioPlan::full()).await.unwrap_err();
        assert!(matches!(err, CartwrightError::Format { .. }));
    }

    #[tokio::test]
    async fn test_record_missing_field_aborts_run() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"email": "a@b.c"}}]"#).unwrap();
        let config = config().with_fixture_path(PathBuf::from(file.path()));
        let runner = ScenarioRunner::new(StorefrontSimulator::new(), config);
        let err = runner.run(&ScenarioPlan::full()).await.unwrap_err();
        assert!(matches!(err, CartwrightError::MissingField { index: 0, .. }));
    }
}
