//! Read consent configuration embedded in the host page.
//!
//! Pages may ship
//! `<script id="cookie-consent-config" type="application/json">{...}</script>`
//! to override the policy version, storage key, expiry, or timings.

#[cfg(test)]
#[path = "page_config_test.rs"]
mod page_config_test;

use consent::ConsentConfig;

pub const CONFIG_ELEMENT_ID: &str = "cookie-consent-config";

/// Parse embedded config text, falling back to defaults on any problem.
pub fn parse_or_default(raw: Option<&str>) -> ConsentConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return ConsentConfig::default();
    };
    ConsentConfig::from_json(raw).unwrap_or_else(|e| {
        log::warn!("consent: {e}; using default config");
        ConsentConfig::default()
    })
}

/// Load config from the page's config element.
pub fn load() -> ConsentConfig {
    #[cfg(feature = "csr")]
    {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        parse_or_default(raw.as_deref())
    }
    #[cfg(not(feature = "csr"))]
    {
        parse_or_default(None)
    }
}
