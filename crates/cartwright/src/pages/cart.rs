//! Shopping cart.

use super::checkout::CheckOutPage;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::{same_product, PageObject};
use crate::result::CartwrightResult;
use crate::session::Session;
use crate::wait::ElementWaiter;

/// Cart page
#[derive(Debug)]
pub struct CartPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
}

impl<'s, D: StoreDriver> CartPage<'s, D> {
    /// Bind to a session showing the cart
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self { session }
    }

    fn item_names() -> Selector {
        Selector::css(".cartSection h3")
    }

    fn checkout_button() -> Selector {
        Selector::css(".totalRow button")
    }

    /// Names of the items in the cart. Waits for at least one item.
    pub async fn cart_products(&self) -> CartwrightResult<Vec<String>> {
        self.session.wait_for_visible(&Self::item_names()).await?;
        self.session.texts(&Self::item_names()).await
    }

    /// Whether an item named `name` (any case) is in the cart
    pub async fn get_cart_products_list(&self, name: &str) -> CartwrightResult<bool> {
        Ok(self
            .cart_products()
            .await?
            .iter()
            .any(|item| same_product(item, name)))
    }

    /// Proceed to checkout
    pub async fn go_to_checkout(self) -> CartwrightResult<CheckOutPage<'s, D>> {
        self.session.click(&Self::checkout_button()).await?;
        let page = CheckOutPage::new(self.session);
        page.wait_until_loaded().await?;
        Ok(page)
    }
}

impl<D: StoreDriver> PageObject<D> for CartPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "cart"
    }

    fn ready_selector(&self) -> Selector {
        Self::item_names()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}
