//! Telesieve Runtime - assembly layer for the telesieve filtering framework.
//!
//! This crate provides:
//! - Layered configuration loading and validation (`config`)
//! - Logging setup from configuration (`logging`)
//! - A name → handler table (`HandlerRegistry`)
//! - Router assembly from declarative routes (`Runtime`)
//!
//! ```rust,ignore
//! use telesieve_runtime::Runtime;
//! use telesieve_framework::handler_fn;
//!
//! let runtime = Runtime::builder()
//!     .profile("production")
//!     .handler("start", handler_fn(|message| async move {
//!         tracing::info!(chat_id = message.chat.id, "start");
//!     }))
//!     .build()?;
//!
//! let matched = runtime.dispatch_json(payload).await?;
//! ```
//!
//! With a `telesieve.toml` such as:
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [[routes]]
//! name = "start"
//! filters = [{ type = "command", name = "start" }]
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod runtime;

pub use config::{
    ConfigError, ConfigLoader, ConfigResult, LoggingConfig, Profile, RouteConfig, TelesieveConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use registry::HandlerRegistry;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeStats, build_router};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
