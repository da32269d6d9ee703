//! Core type definitions for AppForge.
//!
//! This crate defines the fundamental, application-agnostic types used
//! throughout the entity layer and the access-control core:
//! - [`ResourceId`] — 64-bit resource identifiers with an "unset" sentinel
//! - [`cast`] — coercion of loosely-typed JSON input into typed attributes
//! - [`Circular`] — a fixed-capacity ring buffer for last-N tracking
//!
//! Domain-specific entity shapes (workflows, module fields, records)
//! belong in `appforge-model`, not here.

pub mod cast;
mod circular;
mod ids;

pub use circular::Circular;
pub use ids::ResourceId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
