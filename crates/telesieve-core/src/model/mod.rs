//! Telegram data model consumed by the filters.
//!
//! These are deliberately small projections of the Bot API objects: a
//! [`Message`] with its text, [`Chat`] and sender [`User`], and the [`Update`]
//! envelope it arrives in.

pub mod chat;
pub mod message;
pub mod user;

pub use chat::{Chat, ChatType, ChatTypeFlags};
pub use message::{Message, Update};
pub use user::User;
