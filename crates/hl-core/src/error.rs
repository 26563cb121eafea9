//! Errors raised by the scalar guards in [`crate::numeric`].
//!
//! Higher crates map these into their own error types at the call site.

use thiserror::Error;

pub type HlResult<T> = Result<T, HlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HlError {
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
}
