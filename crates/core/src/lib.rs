//! GrocerEase Core - Shared domain types.
//!
//! This crate provides the types used across all GrocerEase components:
//! - `storefront` - REST client, local cache, cart manager and checkout
//! - `cli` - Command-line front end and mock store seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no HTTP
//! clients, no local storage. Cart arithmetic lives here so it can be
//! tested without any collaborator.
//!
//! # Modules
//!
//! - [`types`] - IDs, money, emails, statuses, products, carts, orders and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
