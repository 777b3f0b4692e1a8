//! Utility helpers shared across widget modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component logic
//! to improve reuse and testability.

pub mod dark_mode;
pub mod dom_events;
pub mod page_config;
pub mod sections;
pub mod timing;
