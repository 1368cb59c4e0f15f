//! Shared helpers used across modules.

pub mod validation;
