#![cfg(not(feature = "csr"))]

use consent::MemoryTier;

use super::*;

#[test]
fn read_preference_is_false_outside_browser() {
    assert!(!read_preference());
}

#[test]
fn toggle_flips_boolean_value() {
    assert!(toggle(false));
    assert!(!toggle(true));
}

#[test]
fn theme_names_match_css_hooks() {
    assert_eq!(theme_name(true), "dark");
    assert_eq!(theme_name(false), "light");
}

#[test]
fn stored_preference_parsing_is_strict() {
    assert_eq!(parse_stored("true"), Some(true));
    assert_eq!(parse_stored("false"), Some(false));
    assert_eq!(parse_stored("1"), None);
    assert_eq!(parse_stored(""), None);
}

#[test]
fn stored_choice_overrides_system_setting() {
    assert!(!resolve(Some("false"), true));
    assert!(resolve(Some("true"), false));
    assert!(resolve(None, true));
    assert!(resolve(Some("garbage"), true));
}

#[test]
fn toggle_persists_and_reads_back() {
    let tier = MemoryTier::new("local");
    assert!(!read_preference_from(&tier));

    assert!(toggle_in(&tier, false));
    assert_eq!(tier.raw(STORAGE_KEY).as_deref(), Some("true"));
    assert!(read_preference_from(&tier));

    assert!(!toggle_in(&tier, true));
    assert!(!read_preference_from(&tier));
}

#[test]
fn unreadable_storage_falls_back_to_system_setting() {
    let tier = MemoryTier::new("local");
    tier.insert_raw(STORAGE_KEY, "true");
    tier.fail_reads(true);
    assert!(!read_preference_from(&tier));
}
