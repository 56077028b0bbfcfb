//! # Telesieve Framework
//!
//! Declarative message filters and the routing built on top of them.
//!
//! This layer provides:
//! - The [`Filter`] trait and its combinators ([`Not`], [`And`], [`Or`],
//!   [`AllOf`], [`AnyOf`])
//! - Built-in text, chat and sender filters
//! - An explicit handler → filters registration table ([`FilterRegistry`])
//! - A first-match [`Router`] that also implements `tower::Service`
//! - Tower gates that reject messages failing a filter chain
//! - Serde filter definitions ([`FilterDef`]) for configuration-driven routes
//!
//! Filters hold only their configured parameters. Evaluation reads from a
//! [`FilterContext`](telesieve_core::FilterContext) and never mutates the
//! filter, so one instance can be shared by any number of concurrent
//! evaluations.

pub mod definition;
pub mod error;
pub mod filter;
pub mod filters;
pub mod handler;
pub mod registry;
pub mod router;
pub mod service;

pub use definition::{FilterDef, build_all};
pub use error::{DispatchError, DispatchResult, FilterRejected};
pub use filter::{
    AllOf, And, AnyOf, BoxedFilter, Filter, FilterExt, FnFilter, Not, Or, filter_fn,
};
pub use handler::{BoxedHandler, HandlerFn, MessageHandler, handler_fn};
pub use registry::{FilterBinding, FilterRegistry};
pub use router::{Route, Router};
pub use service::{FilterPredicate, GatedServiceBuilder, ServiceBuilderExt};

/// Prelude for common imports.
pub mod prelude {
    pub use super::filter::{BoxedFilter, Filter, FilterExt, filter_fn};
    pub use super::filters::{
        ChatIdFilter, ChatNameFilter, ChatTitleFilter, ChatTypeFilter, ChatUsernameFilter,
        FromBot, FromUserId, FromUsername, HasText, IsForum, TextCommand, TextContains,
        TextEndsWith, TextEquals, TextStartsWith,
    };
    pub use super::handler::{BoxedHandler, MessageHandler, handler_fn};
    pub use super::registry::{FilterBinding, FilterRegistry};
    pub use super::router::Router;
    pub use super::service::ServiceBuilderExt;
    pub use telesieve_core::{
        Chat, ChatType, ChatTypeFlags, FilterContext, Message, StringComparison, Update, User,
    };
}
