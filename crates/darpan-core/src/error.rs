//! Validation errors for region identifiers.

use thiserror::Error;

/// Errors from constructing validated region names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The name was empty, or cleaning removed every character.
    #[error("region name is empty after cleaning")]
    EmptyName,

    /// The raw name contained digits — a sign of a malformed export row.
    #[error("region name contains digits: {0:?}")]
    DigitsInName(String),

    /// The cleaned name resolved to no official state or union territory.
    #[error("unknown state or union territory: {0:?}")]
    UnknownState(String),
}
