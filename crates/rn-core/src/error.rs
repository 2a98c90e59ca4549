//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `RnError` where a core
//! failure (bad configuration, unparsable coordinate text) can surface through them.

use thiserror::Error;

/// The top-level error type for `rn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RnError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `rn-*` crates.
pub type RnResult<T> = Result<T, RnError>;
