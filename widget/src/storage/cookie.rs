//! `document.cookie` tier.
//!
//! Values are URI-encoded so the JSON record survives the cookie grammar.
//! Cookies are scoped to `path=/` with `SameSite=Lax` and expire through
//! `max-age`.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use consent::{Expiry, StorageError, StorageTier};

const TIER: &str = "cookie";
const SECONDS_PER_DAY: u64 = 86_400;

/// Primary tier.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieTier;

/// Build the `document.cookie` assignment for `key=value`.
pub fn format_cookie(key: &str, value: &str, expiry: Expiry) -> String {
    let mut cookie = format!("{}={}; path=/; SameSite=Lax", urlencoding::encode(key), urlencoding::encode(value));
    if let Expiry::Days(days) = expiry {
        cookie.push_str(&format!("; max-age={}", u64::from(days) * SECONDS_PER_DAY));
    }
    cookie
}

/// Build the assignment that deletes `key`.
pub fn expire_cookie(key: &str) -> String {
    format!("{}=; path=/; max-age=0; SameSite=Lax", urlencoding::encode(key))
}

/// Find `key` in a `document.cookie` string and return its decoded value.
///
/// Pairs that fail to decode are skipped.
pub fn find_cookie(cookies: &str, key: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        let name = urlencoding::decode(name).ok()?;
        if name != key {
            return None;
        }
        urlencoding::decode(value).ok().map(std::borrow::Cow::into_owned)
    })
}

#[cfg(feature = "csr")]
fn document() -> Result<web_sys::HtmlDocument, StorageError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or(StorageError::Unavailable(TIER))
}

#[cfg(feature = "csr")]
fn assign(cookie: &str) -> Result<(), StorageError> {
    document()?
        .set_cookie(cookie)
        .map_err(|e| StorageError::Rejected { tier: TIER, reason: format!("{e:?}") })
}

impl StorageTier for CookieTier {
    fn name(&self) -> &'static str {
        TIER
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            let cookies = document()?
                .cookie()
                .map_err(|e| StorageError::Rejected { tier: TIER, reason: format!("{e:?}") })?;
            Ok(find_cookie(&cookies, key))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable(TIER))
        }
    }

    fn set(&self, key: &str, value: &str, expiry: Expiry) -> Result<(), StorageError> {
        let cookie = format_cookie(key, value, expiry);
        #[cfg(feature = "csr")]
        {
            assign(&cookie)?;
            // Browsers silently drop oversized or blocked cookies.
            match self.get(key)? {
                Some(stored) if stored == value => Ok(()),
                _ => Err(StorageError::Rejected { tier: TIER, reason: "cookie was not stored".to_owned() }),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = cookie;
            Err(StorageError::Unavailable(TIER))
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let cookie = expire_cookie(key);
        #[cfg(feature = "csr")]
        {
            assign(&cookie)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = cookie;
            Err(StorageError::Unavailable(TIER))
        }
    }
}
