//! # Telesieve
//!
//! Declarative, thread-safe message filters and first-match routing for
//! Telegram bots.
//!
//! ## Overview
//!
//! A handler declares the conditions a message must meet before it runs.
//! Conditions are small, immutable [`Filter`](framework::Filter) values
//! evaluated against a [`FilterContext`](core::FilterContext); filters over
//! related objects (the chat, the sender) derive a child context instead of
//! keeping any state of their own.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐     ┌───────────────────────────┐     ┌──────────────┐
//! │ Update (JSON)  │────▶│ Router                    │────▶│ handler of   │
//! └────────────────┘     │  "start"  [filters...]    │     │ first route  │
//!                        │  "groups" [filters...]    │     │ that passes  │
//!                        └───────────────────────────┘     └──────────────┘
//! ```
//!
//! - **core**: Telegram model, `FilterContext`, comparison modes, chat-type flags
//! - **framework**: filters, combinators, registration table, router, tower gate
//! - **runtime**: configuration, logging, router assembly from declared routes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use telesieve::prelude::*;
//!
//! let router = Router::new()
//!     .route("start", vec![TextCommand::new("start").boxed()], start)
//!     .route(
//!         "group_rust",
//!         vec![
//!             ChatTypeFilter::any_of(ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP).boxed(),
//!             TextContains::new("rust")
//!                 .with_comparison(StringComparison::OrdinalIgnoreCase)
//!                 .boxed(),
//!         ],
//!         group_rust,
//!     );
//!
//! router.dispatch_json(payload).await?;
//! ```
//!
//! ## Features
//!
//! - `toml-config` *(default)*: TOML configuration files
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use telesieve_core as core;
pub use telesieve_framework as framework;
pub use telesieve_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use telesieve::prelude::*;
/// ```
pub mod prelude {
    // Runtime - configuration-driven entry point
    pub use telesieve_runtime::{HandlerRegistry, Runtime};

    // Filters and composition
    pub use telesieve_framework::prelude::*;
    pub use telesieve_framework::FilterDef;
}
