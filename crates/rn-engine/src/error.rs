//! Engine error types.

use thiserror::Error;

use rn_core::RnError;

/// Boxed error from a [`RoadSource`](crate::RoadSource) implementation.
pub type BoxedSourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("routing configuration error: {0}")]
    Config(#[from] RnError),

    #[error("road source failed: {0}")]
    Source(#[source] BoxedSourceError),
}

pub type EngineResult<T> = Result<T, EngineError>;
