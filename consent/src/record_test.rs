use super::*;

fn stored(version: Option<&str>) -> StoredConsent {
    StoredConsent {
        version: version.map(str::to_owned),
        timestamp: Some("2026-01-02T03:04:05Z".to_owned()),
        necessary: Some(true),
        analytics: Some(true),
        marketing: Some(false),
    }
}

// =============================================================
// Category
// =============================================================

#[test]
fn category_parse_accepts_known_names() {
    for category in Category::ALL {
        assert_eq!(Category::parse(category.as_str()), Some(category));
    }
}

#[test]
fn category_parse_rejects_unknown_and_miscased() {
    assert_eq!(Category::parse("preferences"), None);
    assert_eq!(Category::parse("Analytics"), None);
    assert_eq!(Category::parse(""), None);
}

#[test]
fn category_signal_names_are_namespaced() {
    assert_eq!(Category::Necessary.signal_name(), "cookieConsent:necessary");
    assert_eq!(Category::Analytics.signal_name(), "cookieConsent:analytics");
    assert_eq!(Category::Marketing.signal_name(), "cookieConsent:marketing");
}

#[test]
fn only_necessary_is_mandatory() {
    assert!(!Category::Necessary.is_optional());
    assert!(Category::Analytics.is_optional());
    assert!(Category::Marketing.is_optional());
}

// =============================================================
// ConsentChoice
// =============================================================

#[test]
fn choice_default_rejects_everything_optional() {
    let choice = ConsentChoice::default();
    assert!(choice.allows(Category::Necessary));
    assert!(!choice.allows(Category::Analytics));
    assert!(!choice.allows(Category::Marketing));
    assert_eq!(choice, ConsentChoice::reject_all());
}

#[test]
fn choice_toggle_ignores_necessary() {
    let mut choice = ConsentChoice::default();
    choice.toggle(Category::Necessary);
    assert_eq!(choice, ConsentChoice::default());
    choice.toggle(Category::Marketing);
    assert!(choice.marketing);
    assert!(!choice.analytics);
}

// =============================================================
// ConsentRecord
// =============================================================

#[test]
fn new_record_forces_necessary_and_stamps_time() {
    let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp");
    let record = ConsentRecord::new("2.0", now, ConsentChoice { analytics: true, marketing: false });
    assert!(record.necessary);
    assert!(record.analytics);
    assert!(!record.marketing);
    assert_eq!(record.version.as_deref(), Some("2.0"));
    assert_eq!(record.recorded_at(), Some(now));
}

#[test]
fn record_serializes_with_wire_field_names() {
    let record = stored(Some("1.0")).validate("1.0").expect("valid");
    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "version": "1.0",
            "timestamp": "2026-01-02T03:04:05Z",
            "necessary": true,
            "analytics": true,
            "marketing": false
        })
    );
}

#[test]
fn age_check_uses_timestamp() {
    let record = stored(Some("1.0")).validate("1.0").expect("valid");
    let at = record.recorded_at().expect("timestamp");
    assert!(!record.is_older_than(at + Duration::days(10), Duration::days(30)));
    assert!(record.is_older_than(at + Duration::days(31), Duration::days(30)));
}

#[test]
fn record_without_timestamp_counts_as_stale() {
    let mut record = stored(Some("1.0")).validate("1.0").expect("valid");
    record.timestamp = None;
    assert!(record.is_older_than(OffsetDateTime::UNIX_EPOCH, Duration::days(365)));
}

// =============================================================
// StoredConsent::validate
// =============================================================

#[test]
fn validate_accepts_matching_version() {
    let record = stored(Some("1.0")).validate("1.0").expect("valid");
    assert!(record.analytics);
    assert!(!record.marketing);
}

#[test]
fn validate_rejects_other_version() {
    assert!(stored(Some("0.9")).validate("1.0").is_none());
}

#[test]
fn validate_accepts_missing_version() {
    let record = stored(None).validate("1.0").expect("legacy record is valid");
    assert_eq!(record.version, None);
}

#[test]
fn validate_requires_all_flags() {
    let mut missing_marketing = stored(Some("1.0"));
    missing_marketing.marketing = None;
    assert!(missing_marketing.validate("1.0").is_none());

    let mut missing_necessary = stored(Some("1.0"));
    missing_necessary.necessary = None;
    assert!(missing_necessary.validate("1.0").is_none());
}

#[test]
fn validate_normalizes_necessary_to_true() {
    let mut value = stored(Some("1.0"));
    value.necessary = Some(false);
    let record = value.validate("1.0").expect("valid");
    assert!(record.necessary);
}

#[test]
fn stored_consent_parses_partial_json() {
    let parsed: StoredConsent = serde_json::from_str(r#"{"analytics":true}"#).expect("parse");
    assert_eq!(parsed.analytics, Some(true));
    assert_eq!(parsed.version, None);
    assert!(parsed.validate("1.0").is_none());
}
