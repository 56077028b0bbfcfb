//! Runtime error types.

use thiserror::Error;

use telesieve_framework::DispatchError;

use crate::config::ConfigError;

/// Errors that can occur while building or driving the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A route names a handler that was never registered.
    #[error("Route '{route}' refers to unknown handler '{handler}'")]
    HandlerNotFound { route: String, handler: String },

    /// A handler name was registered twice.
    #[error("Handler already registered: {0}")]
    HandlerExists(String),

    /// An incoming payload could not be dispatched.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
