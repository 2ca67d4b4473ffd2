//! Core types for GrocerEase.
//!
//! This module provides type-safe wrappers and domain records shared by the
//! storefront client and the CLI.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use cart::{Cart, CartLine};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, ShippingAddress};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::*;
pub use user::{UserProfile, UserRecord};
