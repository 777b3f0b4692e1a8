//! Consent record model and its validation rules.
//!
//! DESIGN
//! ======
//! Storage returns a [`StoredConsent`] whose fields are all optional, because
//! whatever sits under the storage key may be old, partial, or foreign. Only
//! [`StoredConsent::validate`] turns it into a [`ConsentRecord`], so nothing
//! downstream ever sees a half-formed decision.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Cookie category a user can grant or refuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Strictly necessary cookies. Always allowed.
    Necessary,
    /// Measurement and analytics scripts.
    Analytics,
    /// Advertising pixels and remarketing.
    Marketing,
}

impl Category {
    /// Every category, in broadcast order.
    pub const ALL: [Category; 3] = [Self::Necessary, Self::Analytics, Self::Marketing];

    /// Lowercase category name as used in storage and signal names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Necessary => "necessary",
            Self::Analytics => "analytics",
            Self::Marketing => "marketing",
        }
    }

    /// Parse a category name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "necessary" => Some(Self::Necessary),
            "analytics" => Some(Self::Analytics),
            "marketing" => Some(Self::Marketing),
            _ => None,
        }
    }

    /// Name of the signal fired for this category, e.g. `cookieConsent:analytics`.
    #[must_use]
    pub fn signal_name(self) -> &'static str {
        match self {
            Self::Necessary => "cookieConsent:necessary",
            Self::Analytics => "cookieConsent:analytics",
            Self::Marketing => "cookieConsent:marketing",
        }
    }

    /// Whether the user may toggle this category.
    #[must_use]
    pub fn is_optional(self) -> bool {
        !matches!(self, Self::Necessary)
    }
}

/// The user-settable part of a decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentChoice {
    pub analytics: bool,
    pub marketing: bool,
}

impl ConsentChoice {
    #[must_use]
    pub fn accept_all() -> Self {
        Self { analytics: true, marketing: true }
    }

    #[must_use]
    pub fn reject_all() -> Self {
        Self::default()
    }

    /// Whether this choice grants `category`. Necessary is always granted.
    #[must_use]
    pub fn allows(self, category: Category) -> bool {
        match category {
            Category::Necessary => true,
            Category::Analytics => self.analytics,
            Category::Marketing => self.marketing,
        }
    }

    /// Flip an optional category. Toggling necessary is a no-op.
    pub fn toggle(&mut self, category: Category) {
        match category {
            Category::Necessary => {}
            Category::Analytics => self.analytics = !self.analytics,
            Category::Marketing => self.marketing = !self.marketing,
        }
    }
}

/// A validated consent decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Policy version the decision was made under. `None` for legacy records
    /// written before versioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// RFC 3339 instant of the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl ConsentRecord {
    /// Build a fresh record for `choice` under `version`, stamped at `now`.
    #[must_use]
    pub fn new(version: &str, now: OffsetDateTime, choice: ConsentChoice) -> Self {
        Self {
            version: Some(version.to_owned()),
            timestamp: now.format(&Rfc3339).ok(),
            necessary: true,
            analytics: choice.analytics,
            marketing: choice.marketing,
        }
    }

    /// Whether this record grants `category`.
    #[must_use]
    pub fn allows(&self, category: Category) -> bool {
        self.choice().allows(category)
    }

    #[must_use]
    pub fn choice(&self) -> ConsentChoice {
        ConsentChoice { analytics: self.analytics, marketing: self.marketing }
    }

    /// Parsed decision instant, if the timestamp is present and well formed.
    #[must_use]
    pub fn recorded_at(&self) -> Option<OffsetDateTime> {
        let raw = self.timestamp.as_deref()?;
        OffsetDateTime::parse(raw, &Rfc3339).ok()
    }

    /// Whether the decision was made more than `max_age` before `now`.
    ///
    /// Records without a parseable timestamp are treated as stale so that an
    /// age-based re-prompt policy errs toward asking again.
    #[must_use]
    pub fn is_older_than(&self, now: OffsetDateTime, max_age: Duration) -> bool {
        self.recorded_at().map_or(true, |at| now - at > max_age)
    }
}

/// Structural form of whatever is found under the storage key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConsent {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub necessary: Option<bool>,
    #[serde(default)]
    pub analytics: Option<bool>,
    #[serde(default)]
    pub marketing: Option<bool>,
}

impl StoredConsent {
    /// Interpret the stored value against the running policy version.
    ///
    /// A missing version is accepted for backward compatibility; a present but
    /// different version is not. All three category flags must be present.
    #[must_use]
    pub fn validate(self, expected_version: &str) -> Option<ConsentRecord> {
        if let Some(version) = self.version.as_deref() {
            if version != expected_version {
                log::debug!("consent: stored version {version} superseded by {expected_version}");
                return None;
            }
        }
        // `necessary` must be present but is never user-settable.
        self.necessary?;
        Some(ConsentRecord {
            version: self.version,
            timestamp: self.timestamp,
            necessary: true,
            analytics: self.analytics?,
            marketing: self.marketing?,
        })
    }
}

impl From<&ConsentRecord> for StoredConsent {
    fn from(record: &ConsentRecord) -> Self {
        Self {
            version: record.version.clone(),
            timestamp: record.timestamp.clone(),
            necessary: Some(record.necessary),
            analytics: Some(record.analytics),
            marketing: Some(record.marketing),
        }
    }
}
