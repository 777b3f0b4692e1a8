use super::*;

#[test]
fn defaults_match_shipped_policy() {
    let config = ConsentConfig::default();
    assert_eq!(config.version, "1.0");
    assert_eq!(config.storage_key, "cookie_consent");
    assert_eq!(config.expiry_days, 365);
    assert_eq!(config.retry.attempts, 1);
    assert_eq!(config.retry.delay(), Duration::from_millis(100));
    assert_eq!(config.recheck_delay(), Duration::from_millis(100));
    assert_eq!(config.reveal_delay(), Duration::from_millis(10));
}

#[test]
fn from_json_empty_object_is_default() {
    let config = ConsentConfig::from_json("{}").expect("config");
    assert_eq!(config, ConsentConfig::default());
}

#[test]
fn from_json_overrides_subset() {
    let config = ConsentConfig::from_json(r#"{"version":"2.0","expiryDays":180,"retry":{"attempts":3}}"#)
        .expect("config");
    assert_eq!(config.version, "2.0");
    assert_eq!(config.expiry_days, 180);
    assert_eq!(config.retry.attempts, 3);
    assert_eq!(config.retry.delay_ms, DEFAULT_RETRY_DELAY_MS);
    assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = ConsentConfig::from_json("{").expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_json_rejects_empty_version() {
    let err = ConsentConfig::from_json(r#"{"version":"  "}"#).expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn from_json_rejects_zero_expiry() {
    let err = ConsentConfig::from_json(r#"{"expiryDays":0}"#).expect_err("should fail");
    assert_eq!(err.to_string(), "invalid consent config: expiryDays must be positive");
}

#[test]
fn from_json_rejects_empty_storage_key() {
    let err = ConsentConfig::from_json(r#"{"storageKey":""}"#).expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid(_)));
}
