//! Consent store: owns interpretation of the persisted record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the only place that knows what a valid decision looks like.
//! [`TwoTierStorage`] hands back raw structure; the store checks it against
//! the configured version and answers category questions. No method here
//! returns an error: every failure degrades to "no consent recorded".

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use time::OffsetDateTime;

use crate::config::ConsentConfig;
use crate::record::{Category, ConsentChoice, ConsentRecord, StoredConsent};
use crate::storage::{StorageTier, TwoTierStorage};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock for native hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl<F: Fn() -> OffsetDateTime> Clock for F {
    fn now(&self) -> OffsetDateTime {
        self()
    }
}

/// Non-blocking pause used between save attempts.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Delay that completes immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
        std::future::ready(())
    }
}

/// Result of [`ConsentStore::save_consent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The record that was written.
    pub record: ConsentRecord,
    /// Whether reading storage back returned exactly this record.
    pub persisted: bool,
}

pub struct ConsentStore<P, F> {
    storage: TwoTierStorage<P, F>,
    config: ConsentConfig,
    clock: Rc<dyn Clock>,
}

impl<P: Clone, F: Clone> Clone for ConsentStore<P, F> {
    fn clone(&self) -> Self {
        Self { storage: self.storage.clone(), config: self.config.clone(), clock: Rc::clone(&self.clock) }
    }
}

impl<P: StorageTier, F: StorageTier> ConsentStore<P, F> {
    pub fn new(storage: TwoTierStorage<P, F>, config: ConsentConfig) -> Self {
        Self { storage, config, clock: Rc::new(SystemClock) }
    }

    /// Replace the clock used to stamp new records.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    pub fn config(&self) -> &ConsentConfig {
        &self.config
    }

    /// The current valid decision, if any.
    pub fn get_consent(&self) -> Option<ConsentRecord> {
        let stored: StoredConsent = self.storage.read(&self.config.storage_key)?;
        stored.validate(&self.config.version)
    }

    /// Whether a valid, timestamped decision exists.
    pub fn has_consent(&self) -> bool {
        self.get_consent().is_some_and(|record| record.timestamp.is_some())
    }

    pub fn is_allowed(&self, category: Category) -> bool {
        !category.is_optional() || self.get_consent().is_some_and(|record| record.allows(category))
    }

    /// String form of [`Self::is_allowed`]. Unknown names are never allowed.
    pub fn is_category_allowed(&self, category: &str) -> bool {
        Category::parse(category).is_some_and(|category| self.is_allowed(category))
    }

    /// Build a record for `choice` under the current version and time.
    pub fn build_record(&self, choice: ConsentChoice) -> ConsentRecord {
        ConsentRecord::new(&self.config.version, self.clock.now(), choice)
    }

    /// Write a decision and confirm it can be read back.
    ///
    /// When the read-back does not match, the write is repeated up to
    /// `retry.attempts` more times, pausing `retry.delay` before each. A save
    /// that never verifies is logged and reported with `persisted == false`.
    pub async fn save_consent<D: Delay>(&self, choice: ConsentChoice, delay: &D) -> SaveOutcome {
        let record = self.build_record(choice);
        let retry = self.config.retry;

        self.write(&record);
        if self.verify(&record) {
            log::info!("consent: saved analytics={} marketing={}", record.analytics, record.marketing);
            return SaveOutcome { record, persisted: true };
        }

        for attempt in 1..=retry.attempts {
            log::warn!("consent: save not visible in storage, retry {attempt}/{}", retry.attempts);
            delay.sleep(retry.delay()).await;
            self.write(&record);
            if self.verify(&record) {
                log::info!("consent: saved on retry {attempt}");
                return SaveOutcome { record, persisted: true };
            }
        }

        log::error!("consent: save could not be verified after {} retries", retry.attempts);
        SaveOutcome { record, persisted: false }
    }

    /// Erase the stored decision from every tier.
    pub fn reset(&self) {
        self.storage.erase(&self.config.storage_key);
        log::info!("consent: reset");
    }

    fn write(&self, record: &ConsentRecord) {
        self.storage.write(&self.config.storage_key, record, self.config.expiry_days);
    }

    fn verify(&self, record: &ConsentRecord) -> bool {
        self.get_consent().is_some_and(|stored| stored == *record)
    }
}
