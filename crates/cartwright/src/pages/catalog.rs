//! Product catalog shown after login.

use super::cart::CartPage;
use super::header::Header;
use super::order_history::OrderHistoryPage;
use crate::driver::StoreDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use crate::wait::ElementWaiter;
use tracing::{debug, info};

/// Product catalog
#[derive(Debug)]
pub struct ProductCatalogPage<'s, D: StoreDriver> {
    session: &'s mut Session<D>,
    products: Vec<String>,
}

impl<'s, D: StoreDriver> ProductCatalogPage<'s, D> {
    /// Bind to a session that just logged in
    pub fn new(session: &'s mut Session<D>) -> Self {
        Self {
            session,
            products: Vec::new(),
        }
    }

    fn product_cards() -> Selector {
        Selector::css(".mb-3")
    }

    fn product_names() -> Selector {
        Selector::css(".mb-3 b")
    }

    fn add_to_cart_buttons() -> Selector {
        Selector::css(".mb-3 .card-body button:last-of-type")
    }

    /// Toast confirming the add; the login toast may still be on screen
    fn added_toast() -> Selector {
        Selector::css_with_text("#toast-container", "Product Added To Cart")
    }

    fn spinner() -> Selector {
        Selector::css(".ng-animating")
    }

    /// Wait for the product cards and return their names in display order.
    ///
    /// The list is kept for [`ProductCatalogPage::add_product_to_cart`].
    pub async fn get_products_list(&mut self) -> CartwrightResult<Vec<String>> {
        self.session.wait_for_visible(&Self::product_cards()).await?;
        self.products = self.session.texts(&Self::product_names()).await?;
        debug!(count = self.products.len(), "catalog loaded");
        Ok(self.products.clone())
    }

    /// Names loaded by the last [`ProductCatalogPage::get_products_list`]
    #[must_use]
    pub fn loaded_products(&self) -> &[String] {
        &self.products
    }

    /// Add the product whose name equals `name` exactly.
    ///
    /// Loads the list first if needed, then waits for the confirmation toast
    /// to appear and the loading animation to disappear.
    pub async fn add_product_to_cart(&mut self, name: &str) -> CartwrightResult<()> {
        if self.products.is_empty() {
            let _ = self.get_products_list().await?;
        }
        let index = self
            .products
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| CartwrightError::ProductNotFound {
                name: name.to_string(),
                available: self.products.clone(),
            })?;

        self.session
            .click_nth(&Self::add_to_cart_buttons(), index)
            .await?;
        self.session.wait_for_visible(&Self::added_toast()).await?;
        self.session.wait_for_hidden(&Self::spinner()).await?;
        info!(product = name, "added to cart");
        Ok(())
    }

    /// Open the cart
    pub async fn go_to_cart_page(self) -> CartwrightResult<CartPage<'s, D>> {
        Header::open_cart(self.session).await?;
        Ok(CartPage::new(self.session))
    }

    /// Open the order history
    pub async fn go_to_order_history_page(self) -> CartwrightResult<OrderHistoryPage<'s, D>> {
        Header::open_orders(self.session).await?;
        Ok(OrderHistoryPage::new(self.session))
    }
}

impl<D: StoreDriver> PageObject<D> for ProductCatalogPage<'_, D> {
    fn page_name(&self) -> &'static str {
        "catalog"
    }

    fn ready_selector(&self) -> Selector {
        Self::product_cards()
    }

    fn session(&self) -> &Session<D> {
        &*self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{fast_session, signed_in, BUYER_EMAIL};
    use crate::simulator::StorefrontSimulator;

    #[tokio::test]
    async fn test_products_in_display_order() {
        let sim = StorefrontSimulator::new();
        let mut session = signed_in(&sim).await;
        let mut catalog = ProductCatalogPage::new(&mut session);
        let products = catalog.get_products_list().await.unwrap();
        assert_eq!(products, ["ZARA COAT 3", "ADIDAS ORIGINAL", "IPHONE 13 PRO"]);
        assert_eq!(catalog.loaded_products(), products.as_slice());
    }

    #[tokio::test]
    async fn test_add_loads_list_when_empty() {
        let sim = StorefrontSimulator::new();
        let mut session = signed_in(&sim).await;
        let mut catalog = ProductCatalogPage::new(&mut session);
        catalog.add_product_to_cart("IPHONE 13 PRO").await.unwrap();
        assert_eq!(sim.cart_for(BUYER_EMAIL), ["IPHONE 13 PRO"]);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let sim = StorefrontSimulator::new();
        let mut session = signed_in(&sim).await;
        let mut catalog = ProductCatalogPage::new(&mut session);
        let err = catalog
            .add_product_to_cart("NONEXISTENT-ITEM-XYZ")
            .await
            .unwrap_err();
        match err {
            CartwrightError::ProductNotFound { name, available } => {
                assert_eq!(name, "NONEXISTENT-ITEM-XYZ");
                assert_eq!(available.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sim.cart_for(BUYER_EMAIL).is_empty());
    }

    #[tokio::test]
    async fn test_match_is_exact() {
        let sim = StorefrontSimulator::new();
        let mut session = signed_in(&sim).await;
        let mut catalog = ProductCatalogPage::new(&mut session);
        assert!(catalog.add_product_to_cart("zara coat 3").await.is_err());
        assert!(catalog.add_product_to_cart("ZARA COAT").await.is_err());
    }

    #[tokio::test]
    async fn test_dropped_add_times_out_despite_login_toast() {
        let sim = StorefrontSimulator::new();
        let mut session = signed_in(&sim).await;
        let mut catalog = ProductCatalogPage::new(&mut session);
        let _ = catalog.get_products_list().await.unwrap();
        assert_eq!(
            catalog.session().text(&Selector::css("#toast-container")).await.unwrap(),
            "Login Successfully"
        );

        sim.set_offline(true);
        let err = catalog.add_product_to_cart("ZARA COAT 3").await.unwrap_err();
        match err {
            CartwrightError::ElementTimeout { selector, .. } => {
                assert!(selector.contains("Product Added To Cart"), "{selector}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sim.cart_for(BUYER_EMAIL).is_empty());
    }

    #[tokio::test]
    async fn test_catalog_without_login_times_out() {
        let sim = StorefrontSimulator::new();
        let mut session = fast_session(&sim);
        session.navigate("https://shop.test/client").await.unwrap();
        let mut catalog = ProductCatalogPage::new(&mut session);
        let err = catalog.get_products_list().await.unwrap_err();
        assert!(matches!(err, CartwrightError::ElementTimeout { .. }));
    }
}
