//! Configuration for the telesieve runtime.
//!
//! Layered loading (files, environment, programmatic overrides) via figment,
//! the schema for logging and declarative routes, and validation that runs
//! before any route is built.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, RouteConfig, SpanEventConfig,
    TelesieveConfig,
};
pub use validation::validate_config;
