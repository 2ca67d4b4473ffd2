//! GrocerEase storefront library.
//!
//! Everything the storefront does apart from drawing it: catalog reads,
//! login, the synchronized cart, checkout and order history, against a
//! json-server style REST store with a local file cache.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;

#[cfg(test)]
mod testing;

pub use error::{AppError, Result};
pub use session::Session;
pub use state::AppState;
