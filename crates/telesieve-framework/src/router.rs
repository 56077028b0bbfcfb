//! Message router.
//!
//! The [`Router`] holds an ordered list of [`Route`]s, each pairing a
//! [`FilterBinding`] with a handler. When a message is dispatched:
//!
//! 1. Routes are checked in registration order
//! 2. The first route whose filters all pass is selected
//! 3. Its handler runs; no further route is tried
//!
//! ```rust,ignore
//! use telesieve_framework::prelude::*;
//!
//! let router = Router::new()
//!     .route("start", vec![TextCommand::new("start").boxed()], start_handler)
//!     .route("forum", vec![IsForum.boxed()], forum_handler)
//!     .route("fallback", vec![], fallback_handler);
//!
//! let matched = router.dispatch(message).await;
//! ```
//!
//! # Tower Service Integration
//!
//! `Router` implements `tower::Service<Message>`, responding with the name of
//! the matched route.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use tower::Service;
use tracing::{Instrument, Level, debug, span, trace};

use telesieve_core::{Message, Update};

use crate::error::DispatchResult;
use crate::filter::BoxedFilter;
use crate::handler::BoxedHandler;
use crate::registry::FilterBinding;

/// A filter binding together with the handler it guards.
#[derive(Clone)]
pub struct Route {
    binding: FilterBinding,
    handler: BoxedHandler,
}

impl Route {
    pub fn new(binding: FilterBinding, handler: BoxedHandler) -> Self {
        Self { binding, handler }
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        self.binding.handler()
    }

    /// Returns the filter binding.
    pub fn binding(&self) -> &FilterBinding {
        &self.binding
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// Routes messages to the first handler whose filters pass.
///
/// # Cheap Cloning
///
/// `Router` shares its route table through an `Arc`; clones see routes added
/// through any other clone.
///
/// # Thread Safety
///
/// `Router` is `Send + Sync`. The route table lock is only held while a route
/// is being selected, never while a handler runs.
#[derive(Clone, Default)]
pub struct Router {
    routes: Arc<RwLock<Vec<Route>>>,
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route (builder pattern).
    pub fn route(
        self,
        name: impl Into<String>,
        filters: Vec<BoxedFilter<Message>>,
        handler: BoxedHandler,
    ) -> Self {
        self.add(Route::new(FilterBinding::new(name, filters), handler));
        self
    }

    /// Adds a route. Routes are tried in the order they are added.
    pub fn add(&self, route: Route) {
        debug!(
            route = route.name(),
            filter_count = route.binding().filters().len(),
            "Route registered"
        );
        self.routes.write().push(route);
    }

    /// Returns the number of registered routes.
    pub fn route_count(&self) -> usize {
        self.routes.read().len()
    }

    /// Returns the route names in evaluation order.
    pub fn route_names(&self) -> Vec<String> {
        self.routes
            .read()
            .iter()
            .map(|r| r.name().to_string())
            .collect()
    }

    /// Removes all routes.
    pub fn clear(&self) {
        self.routes.write().clear();
    }

    fn select(&self, message: &Message) -> Option<(String, BoxedHandler)> {
        self.routes
            .read()
            .iter()
            .find(|route| route.binding.passes(message))
            .map(|route| (route.name().to_string(), Arc::clone(&route.handler)))
    }

    /// Returns the name of the route that would handle `message`, without
    /// running any handler.
    pub fn resolve(&self, message: &Message) -> Option<String> {
        self.select(message).map(|(name, _)| name)
    }

    /// Dispatches a message to the first matching route.
    ///
    /// Returns the name of the route whose handler ran, or `None` if no route
    /// matched.
    pub async fn dispatch(&self, message: Message) -> Option<String> {
        let span = span!(
            Level::DEBUG,
            "dispatch",
            message_id = message.message_id,
            chat_id = message.chat.id
        );

        async move {
            let Some((name, handler)) = self.select(&message) else {
                trace!("No route matched");
                return None;
            };

            debug!(route = %name, "Route matched, executing handler");
            handler.handle(Arc::new(message)).await;
            Some(name)
        }
        .instrument(span)
        .await
    }

    /// Dispatches the message carried by an update.
    ///
    /// Updates without a message are ignored.
    pub async fn dispatch_update(&self, update: Update) -> Option<String> {
        match update.message {
            Some(message) => self.dispatch(message).await,
            None => {
                trace!(update_id = update.update_id, "Update carries no message");
                None
            }
        }
    }

    /// Decodes a Bot API update payload and dispatches it.
    pub async fn dispatch_json(&self, payload: &str) -> DispatchResult<Option<String>> {
        let update = Update::from_json(payload)?;
        Ok(self.dispatch_update(update).await)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("route_count", &self.route_count())
            .finish()
    }
}

impl Service<Message> for Router {
    type Response = Option<String>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, message: Message) -> Self::Future {
        let router = self.clone();
        async move { Ok(router.dispatch(message).await) }.boxed()
    }
}
