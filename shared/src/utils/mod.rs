//! Utility functions shared across crates

pub mod phone;
pub mod validation;
