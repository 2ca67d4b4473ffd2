//! Durable local key-value slots.
//!
//! Two slots are used: [`keys::CART`] holds the serialized line list (guest
//! storage and fallback cache) and [`keys::USER`] holds the logged-in
//! profile. Both are removed together on logout.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Slot names.
pub mod keys {
    /// Serialized cart lines.
    pub const CART: &str = "grocerease_cart";

    /// Serialized [`grocerease_core::UserProfile`].
    pub const USER: &str = "grocerease_user";
}

/// Errors from the local store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A slot held something that is not the expected JSON.
    #[error("storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The slot name cannot be used as a file name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String-valued key-value storage that survives the process.
pub trait LocalStore {
    /// Raw value of `key`, or `None` if the slot is empty.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite `key` with `value`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empty the slot. Removing an empty slot is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and deserialize a slot.
///
/// # Errors
///
/// Returns an error if the slot cannot be read or does not hold valid JSON
/// for `T`.
pub async fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: LocalStore + ?Sized,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize a value into a slot.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: LocalStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
