//! Filters over the user who sent a message.
//!
//! Same two-phase shape as the chat filters, narrowed to the sender
//! [`User`]. Messages without a sender (channel posts) fail closed.

use telesieve_core::{FilterContext, Message, StringComparison, User};

use crate::filter::Filter;

/// A predicate over a sender-scoped context.
pub trait UserFilter: Send + Sync {
    /// Returns `true` if the sender satisfies this filter.
    fn evaluate_user(&self, ctx: &FilterContext<'_, User>) -> bool;
}

/// Evaluates a user filter against the sender of a message.
pub fn evaluate_as_sender<F: UserFilter + ?Sized>(
    filter: &F,
    ctx: &FilterContext<'_, Message>,
) -> bool {
    match ctx.target().from.as_ref() {
        Some(user) => filter.evaluate_user(&ctx.create_child(user)),
        None => false,
    }
}

macro_rules! message_filter_via_sender {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Filter<Message> for $ty {
                fn evaluate(&self, ctx: &FilterContext<'_, Message>) -> bool {
                    evaluate_as_sender(self, ctx)
                }
            }
        )*
    };
}

message_filter_via_sender!(FromUserId, FromUsername, FromBot);

/// Passes if the sender id equals the configured id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FromUserId {
    id: i64,
}

impl FromUserId {
    /// Matches messages sent by the user with the given id.
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl UserFilter for FromUserId {
    fn evaluate_user(&self, ctx: &FilterContext<'_, User>) -> bool {
        ctx.target().id == self.id
    }
}

/// Passes if the sender has a username equal to the configured one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromUsername {
    username: String,
    comparison: StringComparison,
}

impl FromUsername {
    /// Creates the filter with the default comparison mode. A leading `@` is ignored.
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            username: username.trim_start_matches('@').to_string(),
            comparison: StringComparison::default(),
        }
    }

    /// Selects the comparison mode.
    pub fn with_comparison(mut self, comparison: StringComparison) -> Self {
        self.comparison = comparison;
        self
    }
}

impl UserFilter for FromUsername {
    fn evaluate_user(&self, ctx: &FilterContext<'_, User>) -> bool {
        ctx.target()
            .username
            .as_deref()
            .is_some_and(|username| self.comparison.equals(username, &self.username))
    }
}

/// Passes if the sender is a bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FromBot;

impl UserFilter for FromBot {
    fn evaluate_user(&self, ctx: &FilterContext<'_, User>) -> bool {
        ctx.target().is_bot
    }
}
