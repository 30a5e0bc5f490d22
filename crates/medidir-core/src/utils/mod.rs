//! Utils module - Shared utilities and helpers

pub mod error_helpers;
pub mod text;
pub mod validation;
