//! Storefront services.
//!
//! # Services
//!
//! - `auth` - Username/password login against the store's user list
//! - `cart` - Cart manager keeping memory, local cache and store in sync
//! - `checkout` - Order placement
//! - `orders` - Order history

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;

pub use auth::{AuthError, AuthService};
pub use cart::CartManager;
pub use checkout::{CardDetails, CheckoutError, CheckoutRequest, CheckoutService, Payment, ShippingDetails};
pub use orders::OrderHistory;
