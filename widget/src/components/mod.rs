//! UI components for the consent widget and page chrome.

pub mod consent_banner;
pub mod consent_modal;
pub mod cookie_settings_link;
pub mod theme_toggle;
