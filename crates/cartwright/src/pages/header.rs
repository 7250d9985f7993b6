//! Navigation bar shown on every page after login.

use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::wait::ElementWaiter;
use tracing::info;

/// Header links shared by the catalog, cart, checkout, confirmation and
/// order-history pages
#[derive(Debug, Clone, Copy)]
pub struct Header;

impl Header {
    /// Cart link
    #[must_use]
    pub fn cart_link() -> Selector {
        Selector::css("[routerlink*='cart']")
    }

    /// Orders link
    #[must_use]
    pub fn orders_link() -> Selector {
        Selector::css("[routerlink*='myorders']")
    }

    /// Sign-out button
    #[must_use]
    pub fn sign_out_button() -> Selector {
        Selector::css_with_text("button", "Sign Out")
    }

    pub(crate) async fn open_cart<D: StoreDriver>(session: &mut Session<D>) -> CartwrightResult<()> {
        session.wait_for_visible(&Self::cart_link()).await?;
        session.click(&Self::cart_link()).await
    }

    pub(crate) async fn open_orders<D: StoreDriver>(session: &mut Session<D>) -> CartwrightResult<()> {
        session.wait_for_visible(&Self::orders_link()).await?;
        session.click(&Self::orders_link()).await
    }

    pub(crate) async fn sign_out<D: StoreDriver>(session: &mut Session<D>) -> CartwrightResult<()> {
        session.wait_for_visible(&Self::sign_out_button()).await?;
        session.click(&Self::sign_out_button()).await?;
        info!("signed out");
        Ok(())
    }
}
