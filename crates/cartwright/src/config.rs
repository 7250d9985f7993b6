//! Suite configuration.
//!
//! Every field has a default, so an empty YAML document is a valid config.

use crate::driver::DriverConfig;
use crate::result::{CartwrightError, CartwrightResult};
use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default application root
pub const DEFAULT_BASE_URL: &str = "https://rahulshettyacademy.com/client";

/// Default fixture location, relative to the working directory
pub const DEFAULT_FIXTURE_PATH: &str = "data/purchase_order.json";

/// Country fragment typed into the checkout search
pub const DEFAULT_CHECKOUT_COUNTRY: &str = "Indi";

/// Text the confirmation page shows after a successful order
pub const DEFAULT_CONFIRMATION: &str = "Thankyou for the order.";

/// Product the order-history check looks for
pub const DEFAULT_HISTORY_PRODUCT: &str = "ADIDAS ORIGINAL";

/// Account and product used by the order-history check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderHistoryConfig {
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Product expected in the history
    pub product: String,
}

impl Default for OrderHistoryConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            product: DEFAULT_HISTORY_PRODUCT.to_string(),
        }
    }
}

impl OrderHistoryConfig {
    /// Whether credentials were supplied
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Application root URL
    pub base_url: String,
    /// Fixture file with purchase records
    pub fixture_path: PathBuf,
    /// Replay at most this many records
    pub record_limit: Option<usize>,
    /// Partial country name for checkout
    pub checkout_country: String,
    /// Expected confirmation text, compared case-insensitively
    pub expected_confirmation: String,
    /// Order-history check settings
    pub order_history: OrderHistoryConfig,
    /// Treat occupation as optional: a missing drop-down option is logged and skipped
    pub occupation_optional: bool,
    /// Browser settings
    pub browser: DriverConfig,
    /// Bounded wait settings, handed to every session
    pub wait: WaitOptions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fixture_path: PathBuf::from(DEFAULT_FIXTURE_PATH),
            record_limit: None,
            checkout_country: DEFAULT_CHECKOUT_COUNTRY.to_string(),
            expected_confirmation: DEFAULT_CONFIRMATION.to_string(),
            order_history: OrderHistoryConfig::default(),
            occupation_optional: true,
            browser: DriverConfig::default(),
            wait: WaitOptions::default(),
        }
    }
}

impl SuiteConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> CartwrightResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> CartwrightResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> CartwrightResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the application root
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the fixture path
    #[must_use]
    pub fn with_fixture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixture_path = path.into();
        self
    }

    /// Set order-history credentials
    #[must_use]
    pub fn with_history_credentials(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.order_history.email = email.into();
        self.order_history.password = password.into();
        self
    }

    /// Set wait options
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Reject values no run could succeed with
    pub fn validate(&self) -> CartwrightResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CartwrightError::Config {
                message: format!("base_url must be an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.checkout_country.trim().is_empty() {
            return Err(CartwrightError::Config {
                message: "checkout_country must not be empty".to_string(),
            });
        }
        if self.wait.poll_interval_ms == 0 {
            return Err(CartwrightError::Config {
                message: "wait.poll_interval_ms must be positive".to_string(),
            });
        }
        if self.record_limit == Some(0) {
            return Err(CartwrightError::Config {
                message: "record_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.checkout_country, "Indi");
        assert_eq!(config.expected_confirmation, "Thankyou for the order.");
        assert_eq!(config.order_history.product, "ADIDAS ORIGINAL");
        assert_eq!(config.wait.timeout_ms, 10_000);
        assert!(config.occupation_optional);
        assert!(!config.order_history.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_file_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../cartwright.yaml");
        let config = SuiteConfig::from_file(path).unwrap();
        assert_eq!(config, SuiteConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = SuiteConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SuiteConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r"
base_url: http://localhost:4200/client
record_limit: 2
order_history:
  email: buyer@example.com
  password: pw
wait:
  timeout_ms: 2500
";
        let config = SuiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.base_url, "http://localhost:4200/client");
        assert_eq!(config.record_limit, Some(2));
        assert!(config.order_history.has_credentials());
        assert_eq!(config.order_history.product, "ADIDAS ORIGINAL");
        assert_eq!(config.wait.timeout_ms, 2500);
        assert_eq!(config.wait.poll_interval_ms, 50);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = SuiteConfig::from_yaml("base_url: ftp://shop").unwrap_err();
        assert!(matches!(err, CartwrightError::Config { .. }));
    }

    #[test]
    fn test_rejects_zero_record_limit() {
        assert!(SuiteConfig::from_yaml("record_limit: 0").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SuiteConfig::default().with_history_credentials("a@b.c", "pw");
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SuiteConfig::from_yaml(&yaml).unwrap(), config);
    }
}
