//! Chromium implementation of [`StoreDriver`] over the DevTools protocol.
//!
//! Every element operation is a single DOM expression built from
//! [`Selector::to_query_all`] and evaluated in the page.

use crate::driver::{DriverConfig, SessionLauncher, StoreDriver};
use crate::locator::{js_string, Selector};
use crate::result::{CartwrightError, CartwrightResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Launches one headless (by default) Chromium per session
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    config: DriverConfig,
}

impl ChromiumLauncher {
    /// Launcher with the given browser settings
    #[must_use]
    pub const fn new(config: DriverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    type Driver = ChromiumDriver;

    async fn launch(&self) -> CartwrightResult<ChromiumDriver> {
        ChromiumDriver::launch(self.config.clone()).await
    }
}

/// A Chromium process with a single page
#[derive(Debug)]
pub struct ChromiumDriver {
    config: DriverConfig,
    browser: Arc<Mutex<CdpBrowser>>,
    page: CdpPage,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    pub async fn launch(config: DriverConfig) -> CartwrightResult<Self> {
        let mut builder = CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder
            .build()
            .map_err(|message| CartwrightError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| CartwrightError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CartwrightError::BrowserLaunch {
                message: e.to_string(),
            })?;
        debug!(headless = config.headless, "chromium launched");

        Ok(Self {
            config,
            browser: Arc::new(Mutex::new(browser)),
            page,
            handle,
        })
    }

    async fn eval<T: DeserializeOwned>(&self, expr: &str) -> CartwrightResult<T> {
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| CartwrightError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| CartwrightError::driver(e.to_string()))
    }

    fn not_found(selector: &Selector) -> CartwrightError {
        CartwrightError::ElementNotFound {
            selector: selector.to_string(),
        }
    }
}

fn count_expr(selector: &Selector) -> String {
    format!("{}.length", selector.to_query_all())
}

fn visible_expr(selector: &Selector) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return false; \
         const s = window.getComputedStyle(el); \
         return s.display !== 'none' && s.visibility !== 'hidden' && el.getClientRects().length > 0; }})()",
        selector.to_query()
    )
}

fn texts_expr(selector: &Selector) -> String {
    format!(
        "{}.map(el => (el.innerText ?? el.textContent ?? '').trim())",
        selector.to_query_all()
    )
}

/// Evaluates to `false` when there is no `index`-th match
fn click_expr(selector: &Selector, index: usize) -> String {
    format!(
        "(() => {{ const el = {}[{index}]; if (!el) return false; \
         el.scrollIntoView({{block: 'center'}}); el.click(); return true; }})()",
        selector.to_query_all()
    )
}

fn fill_expr(selector: &Selector, value: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return false; el.focus(); el.value = {}; \
         for (const type of ['input', 'change']) el.dispatchEvent(new Event(type, {{bubbles: true}})); \
         el.dispatchEvent(new KeyboardEvent('keyup', {{bubbles: true}})); return true; }})()",
        selector.to_query(),
        js_string(value)
    )
}

/// Evaluates to `'yes'`, `'no'` or `'missing'`
fn selected_expr(selector: &Selector) -> String {
    format!(
        "(() => {{ const el = {}; return el ? (el.checked ? 'yes' : 'no') : 'missing'; }})()",
        selector.to_query()
    )
}

/// Evaluates to `'ok'`, `'no-option'` or `'missing'`
fn select_option_expr(selector: &Selector, text: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return 'missing'; \
         const opt = Array.from(el.options).find(o => o.text.trim() === {}); \
         if (!opt) return 'no-option'; el.value = opt.value; \
         el.dispatchEvent(new Event('change', {{bubbles: true}})); return 'ok'; }})()",
        selector.to_query(),
        js_string(text)
    )
}

#[async_trait]
impl StoreDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str) -> CartwrightResult<()> {
        let navigation = tokio::time::timeout(self.config.navigation_timeout(), self.page.goto(url));
        match navigation.await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(CartwrightError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(CartwrightError::Navigation {
                url: url.to_string(),
                message: format!("no response within {}ms", self.config.navigation_timeout_ms),
            }),
        }
    }

    async fn current_url(&self) -> CartwrightResult<String> {
        self.eval("window.location.href").await
    }

    async fn count(&self, selector: &Selector) -> CartwrightResult<usize> {
        self.eval(&count_expr(selector)).await
    }

    async fn is_visible(&self, selector: &Selector) -> CartwrightResult<bool> {
        self.eval(&visible_expr(selector)).await
    }

    async fn texts(&self, selector: &Selector) -> CartwrightResult<Vec<String>> {
        self.eval(&texts_expr(selector)).await
    }

    async fn click_nth(&mut self, selector: &Selector, index: usize) -> CartwrightResult<()> {
        if self.eval::<bool>(&click_expr(selector, index)).await? {
            Ok(())
        } else {
            Err(CartwrightError::ElementNotFound {
                selector: format!("{selector} [{index}]"),
            })
        }
    }

    async fn fill(&mut self, selector: &Selector, value: &str) -> CartwrightResult<()> {
        if self.eval::<bool>(&fill_expr(selector, value)).await? {
            Ok(())
        } else {
            Err(Self::not_found(selector))
        }
    }

    async fn is_selected(&self, selector: &Selector) -> CartwrightResult<bool> {
        match self.eval::<String>(&selected_expr(selector)).await?.as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(Self::not_found(selector)),
        }
    }

    async fn select_by_visible_text(
        &mut self,
        selector: &Selector,
        text: &str,
    ) -> CartwrightResult<()> {
        match self
            .eval::<String>(&select_option_expr(selector, text))
            .await?
            .as_str()
        {
            "ok" => Ok(()),
            "no-option" => Err(CartwrightError::OptionNotFound {
                selector: selector.to_string(),
                option: text.to_string(),
            }),
            _ => Err(Self::not_found(selector)),
        }
    }

    async fn close(&mut self) -> CartwrightResult<()> {
        let mut browser = self.browser.lock().await;
        let closed = browser.close().await;
        let _ = browser.wait().await;
        self.handle.abort();
        closed
            .map(|_| ())
            .map_err(|e| CartwrightError::driver(e.to_string()))
    }
}
