//! Message handlers.
//!
//! A handler is the async code a route runs once its filters pass. Any
//! async closure taking an `Arc<Message>` can be used via [`handler_fn`]:
//!
//! ```rust,ignore
//! let greet = handler_fn(|message: Arc<Message>| async move {
//!     tracing::info!(chat_id = message.chat.id, "greeting");
//! });
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use telesieve_core::Message;

/// The code run for a message once a route has been selected.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handles the message.
    async fn handle(&self, message: Arc<Message>);
}

/// A type-erased handler that can be stored in collections.
pub type BoxedHandler = Arc<dyn MessageHandler>;

/// Adapts an async closure into a [`MessageHandler`].
pub struct HandlerFn<F, Fut> {
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

impl<F: Clone, Fut> Clone for HandlerFn<F, Fut> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> MessageHandler for HandlerFn<F, Fut>
where
    F: Fn(Arc<Message>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle(&self, message: Arc<Message>) {
        (self.f)(message).await;
    }
}

/// Wraps an async closure as a boxed handler.
pub fn handler_fn<F, Fut>(f: F) -> BoxedHandler
where
    F: Fn(Arc<Message>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(HandlerFn {
        f,
        _marker: PhantomData,
    })
}
