//! Result and error types for Cartwright.

use thiserror::Error;

/// Result type for Cartwright operations
pub type CartwrightResult<T> = Result<T, CartwrightError>;

/// Errors that can occur while loading fixtures or driving the storefront
#[derive(Debug, Error)]
pub enum CartwrightError {
    /// Fixture content is not a JSON array of flat string maps
    #[error("Fixture {path} is malformed: {message}")]
    Format {
        /// Fixture path
        path: String,
        /// Parser message
        message: String,
    },

    /// A fixture record lacks a required key
    #[error("Fixture record {index} is missing required field '{field}'")]
    MissingField {
        /// Position of the record in the fixture
        index: usize,
        /// Missing key
        field: String,
    },

    /// Suite configuration is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Bounded wait elapsed before the element reached the expected state
    #[error("Timed out after {timeout_ms}ms waiting for {selector} to become {state}")]
    ElementTimeout {
        /// Rendered selector
        selector: String,
        /// Expected state ("visible" or "hidden")
        state: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// Catalog has no product with the requested name
    #[error("Product '{name}' not found in catalog (loaded: {available:?})")]
    ProductNotFound {
        /// Requested product name
        name: String,
        /// Names that were loaded at lookup time
        available: Vec<String>,
    },

    /// Checkout country search returned no entry containing the text
    #[error("No country containing '{partial}' offered at checkout")]
    CountryNotFound {
        /// Partial country name typed into the search
        partial: String,
    },

    /// Select control has no option with the given visible text
    #[error("Select {selector} has no option '{option}'")]
    OptionNotFound {
        /// Rendered selector of the select control
        selector: String,
        /// Visible text that was requested
        option: String,
    },

    /// Interaction target is absent from the current view
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Rendered selector
        selector: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Driver-level failure not covered by a more specific variant
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Scenario expectation mismatch
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Scenario prerequisite has not passed in this suite run
    #[error("Scenario '{scenario}' requires '{dependency}' to pass first")]
    DependencyNotMet {
        /// Scenario that was skipped
        scenario: String,
        /// Prerequisite scenario
        dependency: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CartwrightError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Whether this error came from a scenario expectation rather than the UI plumbing
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_selector() {
        let err = CartwrightError::ElementTimeout {
            selector: "#toast-container".to_string(),
            state: "visible".to_string(),
            timeout_ms: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("#toast-container"));
        assert!(msg.contains("10000ms"));
    }

    #[test]
    fn test_product_not_found_lists_catalog() {
        let err = CartwrightError::ProductNotFound {
            name: "NONEXISTENT-ITEM-XYZ".to_string(),
            available: vec!["ZARA COAT 3".to_string()],
        };
        assert!(err.to_string().contains("ZARA COAT 3"));
    }

    #[test]
    fn test_assertion_helper() {
        let err = CartwrightError::assertion("cart is empty");
        assert!(err.is_assertion());
        assert!(!CartwrightError::driver("boom").is_assertion());
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CartwrightError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
