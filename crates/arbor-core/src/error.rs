//! Error types for the core.
//!
//! Decoding ambiguity, unrecognized input, and out-of-range navigation are
//! not errors: they resolve locally by degrading or clamping. `Error` covers
//! API misuse surfaces such as handing a window a node it does not contain.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A focus operation referenced an invalid target.
    #[error("focus: {0}")]
    Focus(String),
    /// A render operation failed.
    #[error("render: {0}")]
    Render(String),
    /// A geometry computation was invalid.
    #[error("geometry: {0}")]
    Geometry(String),
    /// A node ID was not present in the window's tree.
    #[error("unknown node")]
    NodeNotFound,
    /// A structural mutation was rejected.
    #[error("invalid: {0}")]
    Invalid(String),
    /// An internal invariant was violated.
    #[error("internal: {0}")]
    Internal(String),
}
