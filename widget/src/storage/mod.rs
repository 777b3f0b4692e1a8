//! Browser storage tiers backing the consent record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The cookie is the primary tier because it expires on its own and is sent to
//! the server; `localStorage` is the non-expiring fallback for browsers that
//! block or strip first-party cookies. Outside a `csr` build both tiers report
//! themselves unavailable, which the core treats as "no consent".

pub mod cookie;
pub mod local;

pub use cookie::CookieTier;
pub use local::LocalStorageTier;
