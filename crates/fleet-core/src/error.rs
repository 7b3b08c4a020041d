//! Base error type.
//!
//! Sub-crates define their own error enums (`SpatialError`, `EngineError`)
//! and either convert `CoreError` via `From` or wrap it as one variant.

use thiserror::Error;

/// Errors produced by `fleet-core` itself — configuration problems, mostly.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fleet-core`.
pub type CoreResult<T> = Result<T, CoreError>;
