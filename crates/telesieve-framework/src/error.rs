//! Error types for the telesieve framework.
//!
//! Filters never return errors. These types only describe failures around
//! them: decoding incoming payloads and rejecting requests at a tower gate.

use thiserror::Error;

use telesieve_core::ModelError;

/// Returned by a [`FilterPredicate`](crate::service::FilterPredicate) when a
/// message does **not** pass its filters.
///
/// Callers can downcast the `BoxError` to tell a rejection apart from a
/// failure of the inner service.
#[derive(Debug, Clone, Error)]
#[error("message rejected by filter")]
pub struct FilterRejected;

/// Errors that can occur while dispatching a raw payload.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The update payload could not be decoded.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
