//! Cookie-consent core: record model, two-tier persistence, broadcast, and the
//! banner/modal state machine.
//!
//! This crate owns every consent decision rule and is deliberately free of any
//! UI framework or browser binding. The `widget` crate supplies concrete
//! storage tiers, a clock, a delay source, and renders [`controller::ConsentView`]
//! snapshots.
//!
//! SYSTEM CONTEXT
//! ==============
//! `service::ConsentService::boot` reads the stored record once. A valid record
//! is replayed through the [`broadcast::Broadcaster`]; otherwise the host waits
//! the configured recheck delay and calls `recheck`, which shows the banner if
//! there is still no decision. User decisions flow through
//! [`store::ConsentStore::save_consent`] and come back via
//! `ConsentService::complete_save`.

pub mod broadcast;
pub mod config;
pub mod controller;
pub mod record;
pub mod service;
pub mod storage;
pub mod store;

pub use broadcast::{Broadcaster, ConsentSignal, SubscriptionId};
pub use config::{ConfigError, ConsentConfig, RetryPolicy};
pub use controller::{ConsentView, FocusTarget, Key, KeyInput, Phase, PresentationController, Reaction, UiEvent};
pub use record::{Category, ConsentChoice, ConsentRecord, StoredConsent};
pub use service::{Boot, ConsentService};
pub use storage::{Expiry, MemoryTier, StorageError, StorageTier, TwoTierStorage};
pub use store::{Clock, ConsentStore, Delay, NoDelay, SaveOutcome, SystemClock};
