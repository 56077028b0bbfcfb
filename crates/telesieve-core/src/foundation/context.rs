//! Filter evaluation context.
//!
//! This module provides [`FilterContext`], the immutable value every filter is
//! evaluated against. A context borrows its target (a message, a chat, a user)
//! for the duration of one dispatch attempt and is dropped afterwards.
//!
//! Filters that reason about a related object derive a narrower context with
//! [`create_child`](FilterContext::create_child) instead of caching the object
//! on themselves:
//!
//! ```text
//! FilterContext<Message>            ← built by the router, one per attempt
//! └── FilterContext<Chat>           ← create_child(&message.chat)
//!     parent() → Some(&Message)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use telesieve_core::{FilterContext, Message};
//!
//! let ctx = FilterContext::new(&message).with_handler("greet");
//! let chat_ctx = ctx.create_child(&message.chat);
//!
//! assert_eq!(chat_ctx.target().id, message.chat.id);
//! assert!(chat_ctx.parent::<Message>().is_some());
//! ```

use std::any::Any;
use std::fmt;

/// The immutable context a filter is evaluated against.
///
/// `FilterContext` is `Copy`: it only holds borrows, so passing it around or
/// deriving children never clones the underlying data.
pub struct FilterContext<'a, T> {
    /// The value currently being tested.
    target: &'a T,
    /// The target of the context this one was derived from, if any.
    parent: Option<&'a (dyn Any + Send + Sync)>,
    /// Name of the handler whose filters are being evaluated.
    handler: Option<&'a str>,
}

impl<'a, T> FilterContext<'a, T> {
    /// Creates a root context for the given target.
    pub fn new(target: &'a T) -> Self {
        Self {
            target,
            parent: None,
            handler: None,
        }
    }

    /// Attaches the name of the handler being evaluated.
    pub fn with_handler(mut self, handler: &'a str) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Returns the value being tested.
    pub fn target(&self) -> &'a T {
        self.target
    }

    /// Returns the name of the handler being evaluated, if known.
    pub fn handler(&self) -> Option<&'a str> {
        self.handler
    }

    /// Returns `true` if this context was derived from another one.
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the parent target if it is of type `P`.
    pub fn parent<P: Any>(&self) -> Option<&'a P> {
        self.parent.and_then(|p| p.downcast_ref::<P>())
    }

    /// Derives a child context scoped to a related object.
    ///
    /// The child records this context's target as its parent and inherits the
    /// handler name. Neither context can be mutated through the other.
    pub fn create_child<U>(&self, target: &'a U) -> FilterContext<'a, U>
    where
        T: Any + Send + Sync,
    {
        FilterContext {
            target,
            parent: Some(self.target),
            handler: self.handler,
        }
    }
}

impl<T> Clone for FilterContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FilterContext<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for FilterContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("target", self.target)
            .field("handler", &self.handler)
            .field("is_child", &self.is_child())
            .finish()
    }
}
