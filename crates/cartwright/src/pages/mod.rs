//! Storefront page objects.
//!
//! ```text
//! LandingPage ──go_to_registration──▶ RegistrationPage ──complete_registration──┐
//!     ▲  │                                                                       │
//!     │  └──login──▶ ProductCatalogPage ──go_to_cart_page──▶ CartPage            │
//!     │                   │                                     │ go_to_checkout │
//!     │                   │ go_to_order_history_page            ▼                │
//!     │                   ▼                               CheckOutPage           │
//!     │             OrderHistoryPage                            │ submit_order   │
//!     │                   │                                     ▼                │
//!     ├───sign_out_app────┘                            ConfirmationPage          │
//!     ├───sign_out_app──────────────────────────────────────────┘                │
//!     └──────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod confirmation;
pub mod header;
pub mod landing;
pub mod order_history;
pub mod registration;

pub use cart::CartPage;
pub use catalog::ProductCatalogPage;
pub use checkout::CheckOutPage;
pub use confirmation::ConfirmationPage;
pub use header::Header;
pub use landing::LandingPage;
pub use order_history::OrderHistoryPage;
pub use registration::{FieldPolicy, Gender, RegistrationForm, RegistrationPage};
