//! Two-tier persistence: an expiring primary store mirrored into a
//! non-expiring fallback.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser the primary tier is a cookie and the fallback tier is
//! `localStorage`; either can be disabled, full, or blocked by privacy
//! settings. [`TwoTierStorage`] never returns an error to its caller. Every
//! failure is logged and the other tier carries the value.
//!
//! TRADE-OFFS
//! ==========
//! The two writes are independent and not atomic. A crash between them leaves
//! the tiers divergent until the next successful primary read, which mirrors
//! the value back into the fallback.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error raised by a single storage tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The tier does not exist in this environment (no window, storage disabled).
    #[error("{0} storage is unavailable")]
    Unavailable(&'static str),
    /// The tier exists but refused the operation (quota, security policy).
    #[error("{tier} storage rejected the operation: {reason}")]
    Rejected { tier: &'static str, reason: String },
}

/// How long a written value should live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expiry {
    /// Value persists until explicitly removed.
    Never,
    /// Value expires after the given number of days.
    Days(u32),
}

/// One physical key/value store.
pub trait StorageTier {
    /// Short label used in log lines and errors.
    fn name(&self) -> &'static str;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the tier cannot be read at all.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the tier refuses the write.
    fn set(&self, key: &str, value: &str, expiry: Expiry) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the tier cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Primary/fallback storage pair with repair-on-read.
#[derive(Clone, Debug)]
pub struct TwoTierStorage<P, F> {
    primary: P,
    fallback: F,
}

impl<P: StorageTier, F: StorageTier> TwoTierStorage<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Serialize `value` and write it to both tiers. Best effort.
    ///
    /// When the primary rejects the value, its previous copy is removed so
    /// reads fall through to the fallback.
    pub fn write<T: Serialize>(&self, key: &str, value: &T, expiry_days: u32) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("storage: failed to serialize {key}: {e}");
                return;
            }
        };

        if let Err(e) = self.primary.set(key, &raw, Expiry::Days(expiry_days)) {
            log::warn!("storage: {} write failed for {key}: {e}", self.primary.name());
            // An older primary value would shadow the fallback and be repaired over it.
            if let Err(e) = self.primary.remove(key) {
                log::warn!("storage: {} still holds a stale {key}: {e}", self.primary.name());
            }
        }
        if let Err(e) = self.fallback.set(key, &raw, Expiry::Never) {
            log::warn!("storage: {} write failed for {key}: {e}", self.fallback.name());
        }
    }

    /// Read `key`, preferring the primary tier.
    ///
    /// A successful primary read is mirrored into the fallback tier. Missing,
    /// unreadable, or malformed values fall through to the fallback; a bad
    /// fallback value yields `None`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if let Some(raw) = read_tier(&self.primary, key) {
            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    if let Err(e) = self.fallback.set(key, &raw, Expiry::Never) {
                        log::warn!("storage: {} repair failed for {key}: {e}", self.fallback.name());
                    }
                    return Some(value);
                }
                Err(e) => {
                    log::warn!("storage: ignoring malformed {} value for {key}: {e}", self.primary.name());
                }
            }
        }

        let raw = read_tier(&self.fallback, key)?;
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("storage: ignoring malformed {} value for {key}: {e}", self.fallback.name());
                None
            }
        }
    }

    /// Remove `key` from both tiers.
    pub fn erase(&self, key: &str) {
        if let Err(e) = self.primary.remove(key) {
            log::warn!("storage: {} erase failed for {key}: {e}", self.primary.name());
        }
        if let Err(e) = self.fallback.remove(key) {
            log::warn!("storage: {} erase failed for {key}: {e}", self.fallback.name());
        }
    }
}

fn read_tier<S: StorageTier>(tier: &S, key: &str) -> Option<String> {
    match tier.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("storage: {} read failed for {key}: {e}", tier.name());
            None
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, (String, Expiry)>,
    fail_reads: bool,
    fail_writes: bool,
    reject_sets: bool,
}

/// In-process storage tier.
///
/// Clones share the same entries, so a test can keep a handle to inspect what
/// the adapter wrote. Failure switches simulate disabled or full storage.
#[derive(Clone, Debug)]
pub struct MemoryTier {
    name: &'static str,
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryTier {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, state: Rc::new(RefCell::new(MemoryState::default())) }
    }

    /// Make every subsequent `get` fail.
    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    /// Make every subsequent `set` and `remove` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Make every subsequent `set` fail while `remove` keeps working, like a
    /// browser dropping an oversized cookie.
    pub fn reject_sets(&self, reject: bool) {
        self.state.borrow_mut().reject_sets = reject;
    }

    /// Raw stored value, bypassing failure switches.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.borrow().entries.get(key).map(|(value, _)| value.clone())
    }

    /// Expiry recorded with the last write of `key`.
    #[must_use]
    pub fn expiry(&self, key: &str) -> Option<Expiry> {
        self.state.borrow().entries.get(key).map(|(_, expiry)| *expiry)
    }

    /// Store a raw value directly, bypassing failure switches.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .entries
            .insert(key.to_owned(), (value.to_owned(), Expiry::Never));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }
}

impl StorageTier for MemoryTier {
    fn name(&self) -> &'static str {
        self.name
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(StorageError::Unavailable(self.name));
        }
        Ok(state.entries.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: &str, expiry: Expiry) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes || state.reject_sets {
            return Err(StorageError::Rejected { tier: self.name, reason: "quota exceeded".to_owned() });
        }
        state.entries.insert(key.to_owned(), (value.to_owned(), expiry));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StorageError::Rejected { tier: self.name, reason: "read-only".to_owned() });
        }
        state.entries.remove(key);
        Ok(())
    }
}
