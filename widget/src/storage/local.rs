//! `localStorage` tier.

use consent::{Expiry, StorageError, StorageTier};

const TIER: &str = "localStorage";

/// Fallback tier. Entries never expire; `Expiry` is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTier;

#[cfg(feature = "csr")]
fn storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable(TIER))
}

#[cfg(feature = "csr")]
fn rejected(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Rejected { tier: TIER, reason: format!("{err:?}") }
}

impl StorageTier for LocalStorageTier {
    fn name(&self) -> &'static str {
        TIER
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            storage()?.get_item(key).map_err(|e| rejected(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable(TIER))
        }
    }

    fn set(&self, key: &str, value: &str, _expiry: Expiry) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            storage()?.set_item(key, value).map_err(|e| rejected(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable(TIER))
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            storage()?.remove_item(key).map_err(|e| rejected(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable(TIER))
        }
    }
}
