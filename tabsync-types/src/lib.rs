//! Core type definitions for tabsync.
//!
//! This crate defines the small, dependency-light types shared by every
//! other tabsync crate:
//! - [`UpdatedAt`] logical timestamps and the [`Clock`] they are read from
//! - [`TabId`] identifiers for browsing contexts (UUID v7)
//! - [`FeatureKind`] and [`ScopeMode`] enums
//! - the [`validate`] module of defensive per-field JSON validators
//!
//! Feature state, codecs and sync logic live in their own crates.

mod clock;
mod feature;
mod ids;
mod scope;
pub mod validate;

pub use clock::{Clock, ManualClock, SystemClock, UpdatedAt};
pub use feature::FeatureKind;
pub use ids::TabId;
pub use scope::ScopeMode;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("unknown scope mode: {0}")]
    UnknownScopeMode(String),
}
