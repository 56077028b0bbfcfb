//! Filters over the chat a message belongs to.
//!
//! Chat filters are evaluated in two phases. The message-level
//! [`Filter::evaluate`] derives a chat-scoped child context from the message
//! context, then hands it to [`ChatFilter::evaluate_chat`]. Concrete filters
//! only ever reason about a [`Chat`].
//!
//! ```text
//! FilterContext<Message> ──create_child(&message.chat)──▶ FilterContext<Chat>
//!                                                          └─ evaluate_chat()
//! ```
//!
//! Custom chat predicates implement [`ChatFilter`] and are lifted to message
//! filters with [`in_chat`].

use telesieve_core::{Chat, ChatType, ChatTypeFlags, FilterContext, Message, StringComparison};

use crate::filter::Filter;

/// A predicate over a chat-scoped context.
pub trait ChatFilter: Send + Sync {
    /// Returns `true` if the chat satisfies this filter.
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool;
}

/// Evaluates a chat filter against a message context.
pub fn evaluate_in_chat<F: ChatFilter + ?Sized>(
    filter: &F,
    ctx: &FilterContext<'_, Message>,
) -> bool {
    let chat_ctx = ctx.create_child(&ctx.target().chat);
    filter.evaluate_chat(&chat_ctx)
}

/// Lifts a [`ChatFilter`] into a message filter.
#[derive(Debug, Clone)]
pub struct InChat<F>(pub F);

/// Lifts a [`ChatFilter`] into a message filter.
pub fn in_chat<F: ChatFilter>(filter: F) -> InChat<F> {
    InChat(filter)
}

impl<F: ChatFilter> Filter<Message> for InChat<F> {
    fn evaluate(&self, ctx: &FilterContext<'_, Message>) -> bool {
        evaluate_in_chat(&self.0, ctx)
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<F>()
    }
}

/// Implements the message-level phase for the built-in chat filters.
macro_rules! message_filter_via_chat {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Filter<Message> for $ty {
                fn evaluate(&self, ctx: &FilterContext<'_, Message>) -> bool {
                    evaluate_in_chat(self, ctx)
                }
            }
        )*
    };
}

message_filter_via_chat!(
    IsForum,
    ChatIdFilter,
    ChatTypeFilter,
    ChatTitleFilter,
    ChatUsernameFilter,
    ChatNameFilter,
);

/// Passes if the chat is a forum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsForum;

impl ChatFilter for IsForum {
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool {
        ctx.target().is_forum
    }
}

/// Passes if the chat id equals the configured id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatIdFilter {
    id: i64,
}

impl ChatIdFilter {
    /// Matches the chat with the given id.
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl ChatFilter for ChatIdFilter {
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool {
        ctx.target().id == self.id
    }
}

/// How a [`ChatTypeFilter`] matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTypeMatch {
    /// The chat type must equal this type.
    Exact(ChatType),
    /// The chat type's flag must be in this set.
    AnyOf(ChatTypeFlags),
}

/// Passes if the chat type matches.
///
/// In flag-set mode, chat types without a flag never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTypeFilter {
    mode: ChatTypeMatch,
}

impl ChatTypeFilter {
    /// Matches exactly one chat type.
    pub fn exact(chat_type: ChatType) -> Self {
        Self {
            mode: ChatTypeMatch::Exact(chat_type),
        }
    }

    /// Matches any chat type in the flag set.
    pub fn any_of(flags: ChatTypeFlags) -> Self {
        Self {
            mode: ChatTypeMatch::AnyOf(flags),
        }
    }

    /// Returns the match mode.
    pub fn mode(&self) -> ChatTypeMatch {
        self.mode
    }
}

impl From<ChatType> for ChatTypeFilter {
    fn from(chat_type: ChatType) -> Self {
        Self::exact(chat_type)
    }
}

impl From<ChatTypeFlags> for ChatTypeFilter {
    fn from(flags: ChatTypeFlags) -> Self {
        Self::any_of(flags)
    }
}

impl ChatFilter for ChatTypeFilter {
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool {
        let kind = ctx.target().kind;
        match self.mode {
            ChatTypeMatch::Exact(expected) => kind == expected,
            ChatTypeMatch::AnyOf(flags) => flags.contains_type(kind),
        }
    }
}

/// Passes if the chat has a title equal to the configured one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTitleFilter {
    title: String,
    comparison: StringComparison,
}

impl ChatTitleFilter {
    /// Creates the filter with the default comparison mode.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            comparison: StringComparison::default(),
        }
    }

    /// Selects the comparison mode.
    pub fn with_comparison(mut self, comparison: StringComparison) -> Self {
        self.comparison = comparison;
        self
    }
}

impl ChatFilter for ChatTitleFilter {
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool {
        ctx.target()
            .title
            .as_deref()
            .is_some_and(|title| self.comparison.equals(title, &self.title))
    }
}

/// Passes if the chat has a username equal to the configured one.
///
/// A leading `@` in the configured username is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUsernameFilter {
    username: String,
    comparison: StringComparison,
}

impl ChatUsernameFilter {
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

impl ChatFilter for ChatUsernameFilter {
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool {
        ctx.target()
            .username
            .as_deref()
            .is_some_and(|username| self.comparison.equals(username, &self.username))
    }
}

/// Passes if the chat's first and last names match the configured ones.
///
/// Only the names that were supplied are checked; each supplied name requires
/// the chat to carry a matching field. With neither name supplied the filter
/// passes every chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatNameFilter {
    first_name: Option<String>,
    last_name: Option<String>,
    comparison: StringComparison,
}

impl ChatNameFilter {
    /// Creates the filter with the default comparison mode. A `None` name is not checked.
    pub fn new(first_name: Option<&str>, last_name: Option<&str>) -> Self {
        Self {
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            comparison: StringComparison::default(),
        }
    }

    /// Checks only the first name.
    pub fn first_name(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: None,
            comparison: StringComparison::default(),
        }
    }

    /// Selects the comparison mode.
    pub fn with_comparison(mut self, comparison: StringComparison) -> Self {
        self.comparison = comparison;
        self
    }

    fn field_matches(&self, expected: Option<&str>, actual: Option<&str>) -> bool {
        match (expected, actual) {
            (None, _) => true,
            (Some(expected), Some(actual)) => self.comparison.equals(actual, expected),
            (Some(_), None) => false,
        }
    }
}

impl ChatFilter for ChatNameFilter {
    fn evaluate_chat(&self, ctx: &FilterContext<'_, Chat>) -> bool {
        let chat = ctx.target();
        self.field_matches(self.first_name.as_deref(), chat.first_name.as_deref())
            && self.field_matches(self.last_name.as_deref(), chat.last_name.as_deref())
    }
}
