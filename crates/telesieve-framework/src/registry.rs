//! Handler → filter registration table.
//!
//! Instead of discovering filters by inspecting handler metadata at runtime,
//! bindings are declared up front:
//!
//! ```rust,ignore
//! let mut registry = FilterRegistry::new();
//! registry
//!     .bind("start", vec![TextCommand::new("start").boxed()])
//!     .bind("forum_only", vec![IsForum.boxed(), HasText.boxed()]);
//!
//! // Inspect without running any handler code
//! for binding in registry.bindings() {
//!     println!("{} requires {} filters", binding.handler(), binding.filters().len());
//! }
//! ```
//!
//! Bindings keep their registration order, which is also the order the
//! router tries them in.

use std::fmt;

use tracing::trace;

use telesieve_core::{FilterContext, Message};

use crate::filter::BoxedFilter;

/// One handler name with the ordered filters it requires.
#[derive(Clone)]
pub struct FilterBinding {
    handler: String,
    filters: Vec<BoxedFilter<Message>>,
}

impl FilterBinding {
    /// Creates a binding. An empty filter list accepts every message.
    pub fn new(handler: impl Into<String>, filters: Vec<BoxedFilter<Message>>) -> Self {
        Self {
            handler: handler.into(),
            filters,
        }
    }

    /// Returns the handler name.
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Returns the filters in evaluation order.
    pub fn filters(&self) -> &[BoxedFilter<Message>] {
        &self.filters
    }

    /// Returns `true` if every filter passes for the message.
    ///
    /// Evaluation stops at the first failing filter.
    pub fn passes(&self, message: &Message) -> bool {
        let ctx = FilterContext::new(message).with_handler(&self.handler);

        for (index, filter) in self.filters.iter().enumerate() {
            if !filter.evaluate(&ctx) {
                trace!(
                    handler = %self.handler,
                    filter = filter.name(),
                    filter_index = index,
                    message_id = message.message_id,
                    "Filter rejected message"
                );
                return false;
            }
        }

        true
    }
}

impl fmt::Debug for FilterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("FilterBinding")
            .field("handler", &self.handler)
            .field("filters", &names)
            .finish()
    }
}

/// Ordered table of [`FilterBinding`]s.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    bindings: Vec<FilterBinding>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding for `handler`.
    pub fn bind(
        &mut self,
        handler: impl Into<String>,
        filters: Vec<BoxedFilter<Message>>,
    ) -> &mut Self {
        self.bindings.push(FilterBinding::new(handler, filters));
        self
    }

    /// Appends a prepared binding.
    pub fn push(&mut self, binding: FilterBinding) {
        self.bindings.push(binding);
    }

    /// Returns all bindings in registration order.
    pub fn bindings(&self) -> &[FilterBinding] {
        &self.bindings
    }

    /// Returns the filters bound to `handler`, if it is registered.
    pub fn filters_for(&self, handler: &str) -> Option<&[BoxedFilter<Message>]> {
        self.bindings
            .iter()
            .find(|b| b.handler == handler)
            .map(FilterBinding::filters)
    }

    /// Returns the name of the first handler whose filters all pass.
    pub fn first_match(&self, message: &Message) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.passes(message))
            .map(FilterBinding::handler)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl IntoIterator for FilterRegistry {
    type Item = FilterBinding;
    type IntoIter = std::vec::IntoIter<FilterBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}
