//! Element selectors used by page objects.
//!
//! A [`Selector`] names a DOM element the way the storefront exposes it: by id,
//! by CSS, or by CSS narrowed to elements whose text contains a fragment.
//! Drivers render selectors to DOM query expressions with [`Selector::to_query_all`].

use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Element id (rendered as `#id`)
    Id(String),
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// CSS selector filtered by text content
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
}

impl Selector {
    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a CSS selector narrowed to elements containing `text`
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// CSS part of the selector
    #[must_use]
    pub fn css_str(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Css(css) | Self::CssWithText { css, .. } => css.clone(),
        }
    }

    /// Text filter, if any
    #[must_use]
    pub fn text_filter(&self) -> Option<&str> {
        match self {
            Self::CssWithText { text, .. } => Some(text),
            _ => None,
        }
    }

    /// JavaScript expression evaluating to an array of all matching elements
    #[must_use]
    pub fn to_query_all(&self) -> String {
        let css = js_string(&self.css_str());
        match self.text_filter() {
            None => format!("Array.from(document.querySelectorAll({css}))"),
            Some(text) => format!(
                "Array.from(document.querySelectorAll({css})).filter(el => el.textContent.includes({}))",
                js_string(text)
            ),
        }
    }

    /// JavaScript expression evaluating to the first matching element or `undefined`
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{}[0]", self.to_query_all())
    }
}

/// Quote `value` as a JavaScript string literal
pub(crate) fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CssWithText { css, text } => write!(f, "{css} >> text={text:?}"),
            other => write!(f, "{}", other.css_str()),
        }
    }
}
