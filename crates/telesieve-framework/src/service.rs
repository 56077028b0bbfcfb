//! Tower integration: filters as request gates.
//!
//! [`FilterPredicate`] implements [`tower::filter::Predicate`], so a chain of
//! message filters can sit in front of any `Service<Arc<Message>>`. Requests
//! that fail the chain are rejected with [`FilterRejected`] before the inner
//! service is called.
//!
//! # Example
//!
//! ```rust,ignore
//! use tower::{ServiceBuilder, service_fn};
//! use telesieve_framework::prelude::*;
//!
//! let svc = ServiceBuilder::new()
//!     .message_filter(vec![IsForum.boxed(), HasText.boxed()])
//!     .service(service_fn(|message: Arc<Message>| async move {
//!         Ok::<_, tower::BoxError>(message.message_id)
//!     }));
//! ```

use std::sync::Arc;

use tower::filter::{FilterLayer, Predicate};
use tower::{BoxError, ServiceBuilder};
use tower_layer::Stack;
use tracing::trace;

use telesieve_core::Message;

use crate::error::FilterRejected;
use crate::filter::BoxedFilter;
use crate::registry::FilterBinding;

/// A [`Predicate`] that passes a message through only if all its filters pass.
#[derive(Clone, Debug)]
pub struct FilterPredicate {
    binding: Arc<FilterBinding>,
}

impl FilterPredicate {
    /// Creates a predicate named `name` over the given filters.
    pub fn new(name: impl Into<String>, filters: Vec<BoxedFilter<Message>>) -> Self {
        Self::from_binding(FilterBinding::new(name, filters))
    }

    /// Creates a predicate from an existing binding.
    pub fn from_binding(binding: FilterBinding) -> Self {
        Self {
            binding: Arc::new(binding),
        }
    }
}

impl Predicate<Arc<Message>> for FilterPredicate {
    type Request = Arc<Message>;

    fn check(&mut self, request: Arc<Message>) -> Result<Arc<Message>, BoxError> {
        if self.binding.passes(&request) {
            Ok(request)
        } else {
            trace!(
                gate = self.binding.handler(),
                message_id = request.message_id,
                "Message rejected at filter gate"
            );
            Err(Box::new(FilterRejected))
        }
    }
}

/// Convenience type alias for a `ServiceBuilder` with a filter gate stacked.
pub type GatedServiceBuilder<L> = ServiceBuilder<Stack<FilterLayer<FilterPredicate>, L>>;

/// Extension trait for [`tower::ServiceBuilder`] that stacks message filter
/// gates.
pub trait ServiceBuilderExt<L> {
    /// Rejects messages that do not pass every filter in `filters`.
    fn message_filter(self, filters: Vec<BoxedFilter<Message>>) -> GatedServiceBuilder<L>;

    /// Rejects messages that do not pass the given binding.
    fn message_binding(self, binding: FilterBinding) -> GatedServiceBuilder<L>;
}

impl<L> ServiceBuilderExt<L> for ServiceBuilder<L> {
    fn message_filter(self, filters: Vec<BoxedFilter<Message>>) -> GatedServiceBuilder<L> {
        self.filter(FilterPredicate::new("gate", filters))
    }

    fn message_binding(self, binding: FilterBinding) -> GatedServiceBuilder<L> {
        self.filter(FilterPredicate::from_binding(binding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telesieve_core::{Chat, ChatType};
    use tower::{ServiceExt, service_fn};

    use crate::filter::FilterExt;
    use crate::filters::{ChatIdFilter, HasText};

    fn message(chat_id: i64, text: Option<&str>) -> Arc<Message> {
        let mut message = Message::new(9, Chat::new(chat_id, ChatType::Group));
        message.text = text.map(str::to_string);
        Arc::new(message)
    }

    #[test]
    fn test_gate_passes_matching_message() {
        let svc = ServiceBuilder::new()
            .message_filter(vec![ChatIdFilter::new(42).boxed(), HasText.boxed()])
            .service(service_fn(|message: Arc<Message>| async move {
                Ok::<_, BoxError>(message.message_id)
            }));

        let result = tokio_test::block_on(svc.oneshot(message(42, Some("hi"))));
        assert_eq!(result.unwrap(), 9);
    }

    #[test]
    fn test_gate_rejects_with_filter_rejected() {
        let svc = ServiceBuilder::new()
            .message_binding(FilterBinding::new("only_42", vec![ChatIdFilter::new(42).boxed()]))
            .service(service_fn(|message: Arc<Message>| async move {
                Ok::<_, BoxError>(message.message_id)
            }));

        let err = tokio_test::block_on(svc.oneshot(message(7, Some("hi")))).unwrap_err();
        assert!(err.is::<FilterRejected>());
    }
}
