//! Consent policy configuration.
//!
//! Defaults match the shipped policy. Pages can override any subset of keys
//! with a JSON object; see [`ConsentConfig::from_json`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_STORAGE_KEY: &str = "cookie_consent";
pub const DEFAULT_EXPIRY_DAYS: u32 = 365;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 1;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 100;
pub const DEFAULT_RECHECK_DELAY_MS: u64 = 100;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 10;

/// Error returned by [`ConsentConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid consent config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid consent config: {0}")]
    Invalid(&'static str),
}

/// How often and how patiently a save is re-attempted after verification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryPolicy {
    /// Extra write attempts after the first one fails verification.
    pub attempts: u32,
    /// Pause before each extra attempt.
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: DEFAULT_RETRY_ATTEMPTS, delay_ms: DEFAULT_RETRY_DELAY_MS }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsentConfig {
    /// Policy version. Changing it invalidates every stored record.
    pub version: String,
    /// Key under which the record is stored in both tiers.
    pub storage_key: String,
    /// Lifetime of the primary (cookie) copy.
    pub expiry_days: u32,
    pub retry: RetryPolicy,
    /// Pause before the boot-time second look at storage.
    pub recheck_delay_ms: u64,
    /// Pause between inserting the banner/modal and marking it visible.
    pub reveal_delay_ms: u64,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            expiry_days: DEFAULT_EXPIRY_DAYS,
            retry: RetryPolicy::default(),
            recheck_delay_ms: DEFAULT_RECHECK_DELAY_MS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }
}

impl ConsentConfig {
    /// Parse a JSON override. Every key is optional and camelCase, e.g.
    /// `{"version":"2.0","expiryDays":180,"retry":{"attempts":2}}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for values that cannot work.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::Invalid("version must not be empty"));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storageKey must not be empty"));
        }
        if self.expiry_days == 0 {
            return Err(ConfigError::Invalid("expiryDays must be positive"));
        }
        Ok(())
    }

    #[must_use]
    pub fn recheck_delay(&self) -> Duration {
        Duration::from_millis(self.recheck_delay_ms)
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
