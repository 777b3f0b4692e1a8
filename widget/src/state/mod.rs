//! Reactive state shared by widget components.

pub mod consent;
