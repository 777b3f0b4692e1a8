//! Site theme preference.
//!
//! The preference lives in the same `localStorage` tier as the consent
//! fallback and is applied as `data-theme` on `<html>`. A stored choice wins
//! over `prefers-color-scheme`.
//!
//! TRADE-OFFS
//! ==========
//! Theme persistence is a functional preference, not tracking, so it is kept
//! regardless of consent state.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use consent::{Expiry, StorageTier};

use crate::storage::LocalStorageTier;

pub const STORAGE_KEY: &str = "site_dark_mode";

/// Theme name written to `data-theme`.
pub fn theme_name(enabled: bool) -> &'static str {
    if enabled { "dark" } else { "light" }
}

/// Value persisted for a preference.
pub fn stored_value(enabled: bool) -> &'static str {
    if enabled { "true" } else { "false" }
}

/// Parse a stored preference. Anything but `"true"`/`"false"` is unset.
pub fn parse_stored(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Stored preference if valid, else the system setting.
pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> bool {
    stored.and_then(parse_stored).unwrap_or(system_prefers_dark)
}

/// Preference from `localStorage`, falling back to `prefers-color-scheme`.
pub fn read_preference() -> bool {
    read_preference_from(&LocalStorageTier)
}

pub fn read_preference_from(tier: &impl StorageTier) -> bool {
    let stored = tier.get(STORAGE_KEY).unwrap_or_else(|e| {
        log::debug!("theme: {e}");
        None
    });
    resolve(stored.as_deref(), system_prefers_dark())
}

/// Flip the theme, apply it, and persist it to `localStorage`.
pub fn toggle(current: bool) -> bool {
    toggle_in(&LocalStorageTier, current)
}

pub fn toggle_in(tier: &impl StorageTier, current: bool) -> bool {
    let next = !current;
    apply(next);
    if let Err(e) = tier.set(STORAGE_KEY, stored_value(next), Expiry::Never) {
        log::debug!("theme: preference not saved: {e}");
    }
    next
}

/// Set `data-theme` on the document element. No-op outside the browser.
pub fn apply(enabled: bool) {
    let theme = theme_name(enabled);
    #[cfg(feature = "csr")]
    {
        let root = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element());
        if let Some(root) = root {
            let _ = root.set_attribute("data-theme", theme);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}
