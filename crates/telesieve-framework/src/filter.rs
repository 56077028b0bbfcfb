//! The filter abstraction.
//!
//! A [`Filter`] is a boolean predicate over a [`FilterContext`]. Filters are
//! configured at construction time and never mutate themselves while
//! evaluating, so one instance can be shared between routes and evaluated
//! from many tasks at once.
//!
//! # Composition
//!
//! Filters compose through [`FilterExt`]:
//!
//! ```rust,ignore
//! use telesieve_framework::prelude::*;
//!
//! let filter = TextStartsWith::new("/ban")
//!     .and(ChatTypeFilter::any_of(ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP))
//!     .and(FromBot.not());
//! ```

use std::sync::Arc;

use telesieve_core::FilterContext;

/// A boolean predicate evaluated against a typed context.
///
/// Implementations must be pure: the result may only depend on the context
/// and on the filter's own configuration.
pub trait Filter<T>: Send + Sync {
    /// Returns `true` if the context satisfies this filter.
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool;

    /// Returns a human-readable name, used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A type-erased, shareable filter.
pub type BoxedFilter<T> = Arc<dyn Filter<T>>;

impl<T, F: Filter<T> + ?Sized> Filter<T> for Box<F> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        (**self).evaluate(ctx)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T, F: Filter<T> + ?Sized> Filter<T> for Arc<F> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        (**self).evaluate(ctx)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// ============================================================================
// Closure filters
// ============================================================================

/// A filter backed by a closure.
///
/// Created with [`filter_fn`].
#[derive(Clone)]
pub struct FnFilter<F> {
    f: F,
    name: &'static str,
}

/// Wraps a closure as a filter.
///
/// ```rust,ignore
/// let even_ids = filter_fn("even-message-id", |ctx: &FilterContext<'_, Message>| {
///     ctx.target().message_id % 2 == 0
/// });
/// ```
pub fn filter_fn<T, F>(name: &'static str, f: F) -> FnFilter<F>
where
    F: Fn(&FilterContext<'_, T>) -> bool + Send + Sync,
{
    FnFilter { f, name }
}

impl<T, F> Filter<T> for FnFilter<F>
where
    F: Fn(&FilterContext<'_, T>) -> bool + Send + Sync,
{
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        (self.f)(ctx)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// ============================================================================
// Combinators
// ============================================================================

/// Inverts the inner filter.
#[derive(Debug, Clone)]
pub struct Not<F>(pub F);

impl<T, F: Filter<T>> Filter<T> for Not<F> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        !self.0.evaluate(ctx)
    }
}

/// Passes if both filters pass. The right side is skipped if the left fails.
#[derive(Debug, Clone)]
pub struct And<A, B>(pub A, pub B);

impl<T, A: Filter<T>, B: Filter<T>> Filter<T> for And<A, B> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        self.0.evaluate(ctx) && self.1.evaluate(ctx)
    }
}

/// Passes if either filter passes. The right side is skipped if the left passes.
#[derive(Debug, Clone)]
pub struct Or<A, B>(pub A, pub B);

impl<T, A: Filter<T>, B: Filter<T>> Filter<T> for Or<A, B> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        self.0.evaluate(ctx) || self.1.evaluate(ctx)
    }
}

/// Passes if every filter in the list passes. An empty list passes.
pub struct AllOf<T>(pub Vec<BoxedFilter<T>>);

impl<T> Filter<T> for AllOf<T> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        self.0.iter().all(|f| f.evaluate(ctx))
    }
}

/// Passes if at least one filter in the list passes. An empty list fails.
pub struct AnyOf<T>(pub Vec<BoxedFilter<T>>);

impl<T> Filter<T> for AnyOf<T> {
    fn evaluate(&self, ctx: &FilterContext<'_, T>) -> bool {
        self.0.iter().any(|f| f.evaluate(ctx))
    }
}

/// Combinator methods available on every filter.
pub trait FilterExt<T>: Filter<T> + Sized {
    /// Inverts this filter.
    fn not(self) -> Not<Self> {
        Not(self)
    }

    /// Requires both this filter and `other`.
    fn and<B: Filter<T>>(self, other: B) -> And<Self, B> {
        And(self, other)
    }

    /// Requires this filter or `other`.
    fn or<B: Filter<T>>(self, other: B) -> Or<Self, B> {
        Or(self, other)
    }

    /// Erases the concrete type.
    fn boxed(self) -> BoxedFilter<T>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<T, F: Filter<T>> FilterExt<T> for F {}
