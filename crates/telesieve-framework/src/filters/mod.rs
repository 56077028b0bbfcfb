//! Built-in message filters.
//!
//! - [`text`] – comparisons against `message.text` and bot commands
//! - [`chat`] – predicates over the message's chat, via a chat-scoped context
//! - [`sender`] – predicates over the sending user, via a user-scoped context

pub mod chat;
pub mod sender;
pub mod text;

pub use chat::{
    ChatFilter, ChatIdFilter, ChatNameFilter, ChatTitleFilter, ChatTypeFilter, ChatTypeMatch,
    ChatUsernameFilter, InChat, IsForum, in_chat,
};
pub use sender::{FromBot, FromUserId, FromUsername, UserFilter};
pub use text::{HasText, TextCommand, TextContains, TextEndsWith, TextEquals, TextStartsWith};
