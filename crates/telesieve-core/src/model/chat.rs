//! Chat types.
//!
//! Mirrors the `Chat` object of the Telegram Bot API, plus the bit-flag
//! representation of chat types used for set-membership filtering.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of a chat.
///
/// Wire values the Bot API may add later deserialize to [`ChatType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// One-to-one chat with a user.
    #[default]
    Private,
    /// Basic group.
    Group,
    /// Supergroup (including forums).
    Supergroup,
    /// Channel.
    Channel,
    /// The chat of the inline query sender.
    Sender,
    /// Any chat type this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl ChatType {
    /// Maps this chat type to its flag.
    ///
    /// Returns `None` for types without a flag, which never match a flag set.
    pub fn to_flag(self) -> Option<ChatTypeFlags> {
        CHAT_TYPE_FLAGS
            .iter()
            .find(|(ty, _)| *ty == self)
            .map(|(_, flag)| *flag)
    }

    /// Returns the Bot API name of this chat type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Sender => "sender",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a known chat type name, ignoring case.
///
/// Unlike deserializing a Bot API payload, `unknown` and unrecognized names
/// are errors.
impl FromStr for ChatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "private" => Self::Private,
            "group" => Self::Group,
            "supergroup" => Self::Supergroup,
            "channel" => Self::Channel,
            "sender" => Self::Sender,
            other => return Err(format!("unknown chat type: {other}")),
        })
    }
}

/// Explicit chat type → flag table. Types missing here have no flag.
const CHAT_TYPE_FLAGS: [(ChatType, ChatTypeFlags); 5] = [
    (ChatType::Channel, ChatTypeFlags::CHANNEL),
    (ChatType::Group, ChatTypeFlags::GROUP),
    (ChatType::Supergroup, ChatTypeFlags::SUPERGROUP),
    (ChatType::Sender, ChatTypeFlags::SENDER),
    (ChatType::Private, ChatTypeFlags::PRIVATE),
];

/// A set of chat types.
///
/// ```rust,ignore
/// let groups = ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP;
/// assert!(groups.contains(ChatTypeFlags::SUPERGROUP));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChatTypeFlags(u8);

impl ChatTypeFlags {
    /// Channels.
    pub const CHANNEL: Self = Self(1 << 0);
    /// Basic groups.
    pub const GROUP: Self = Self(1 << 1);
    /// Supergroups.
    pub const SUPERGROUP: Self = Self(1 << 2);
    /// Inline query sender chats.
    pub const SENDER: Self = Self(1 << 3);
    /// Private chats.
    pub const PRIVATE: Self = Self(1 << 4);
    /// Every known chat type.
    pub const ALL: Self = Self(0b1_1111);

    /// Returns the empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every flag of `other` is set in `self`.
    ///
    /// An empty `other` is never contained.
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Returns `true` if the given chat type maps to a flag in this set.
    pub fn contains_type(self, chat_type: ChatType) -> bool {
        chat_type.to_flag().is_some_and(|flag| self.contains(flag))
    }

    /// Iterates over the chat types in this set.
    pub fn types(self) -> impl Iterator<Item = ChatType> {
        CHAT_TYPE_FLAGS
            .into_iter()
            .filter(move |(_, flag)| self.contains(*flag))
            .map(|(ty, _)| ty)
    }
}

impl BitOr for ChatTypeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChatTypeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<ChatType> for ChatTypeFlags {
    fn from_iter<I: IntoIterator<Item = ChatType>>(iter: I) -> Self {
        iter.into_iter()
            .filter_map(ChatType::to_flag)
            .fold(Self::empty(), |acc, flag| acc | flag)
    }
}

impl fmt::Debug for ChatTypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.types()).finish()
    }
}

impl Serialize for ChatTypeFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.types())
    }
}

/// Deserializes from a list of chat type names. Names without a flag are
/// rejected rather than dropped.
impl<'de> Deserialize<'de> for ChatTypeFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|name| name.parse::<ChatType>().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// A Telegram chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique identifier of the chat.
    pub id: i64,
    /// Type of the chat.
    #[serde(rename = "type")]
    pub kind: ChatType,
    /// Title, for supergroups, channels and group chats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Username, for private chats, supergroups and channels if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// First name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// `true` if the supergroup chat is a forum.
    #[serde(default)]
    pub is_forum: bool,
}

impl Chat {
    /// Creates a chat with the given id and type and no optional fields.
    pub fn new(id: i64, kind: ChatType) -> Self {
        Self {
            id,
            kind,
            ..Default::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the first and last names.
    pub fn with_name(mut self, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        self.first_name = first_name.map(str::to_string);
        self.last_name = last_name.map(str::to_string);
        self
    }

    /// Marks the chat as a forum.
    pub fn forum(mut self) -> Self {
        self.is_forum = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_mapping_table() {
        assert_eq!(ChatType::Channel.to_flag(), Some(ChatTypeFlags::CHANNEL));
        assert_eq!(ChatType::Private.to_flag(), Some(ChatTypeFlags::PRIVATE));
        assert_eq!(ChatType::Unknown.to_flag(), None);
    }

    #[test]
    fn test_flag_set_membership() {
        let groups = ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP;
        assert!(groups.contains_type(ChatType::Supergroup));
        assert!(groups.contains_type(ChatType::Group));
        assert!(!groups.contains_type(ChatType::Private));
        assert!(!ChatTypeFlags::ALL.contains_type(ChatType::Unknown));
        assert!(!groups.contains(ChatTypeFlags::empty()));
    }

    #[test]
    fn test_flags_from_types() {
        let flags: ChatTypeFlags = [ChatType::Channel, ChatType::Unknown, ChatType::Sender]
            .into_iter()
            .collect();
        assert_eq!(flags, ChatTypeFlags::CHANNEL | ChatTypeFlags::SENDER);
        assert_eq!(
            flags.types().collect::<Vec<_>>(),
            vec![ChatType::Channel, ChatType::Sender]
        );
    }

    #[test]
    fn test_deserialize_chat() {
        let json = r#"{"id":-1001,"type":"supergroup","title":"Rustaceans","is_forum":true}"#;
        let chat: Chat = serde_json::from_str(json).unwrap();
        assert_eq!(chat.id, -1001);
        assert_eq!(chat.kind, ChatType::Supergroup);
        assert_eq!(chat.title.as_deref(), Some("Rustaceans"));
        assert!(chat.is_forum);
        assert!(chat.username.is_none());
    }

    #[test]
    fn test_deserialize_unknown_chat_type() {
        let chat: Chat = serde_json::from_str(r#"{"id":1,"type":"hologram"}"#).unwrap();
        assert_eq!(chat.kind, ChatType::Unknown);
        assert!(!chat.is_forum);
    }

    #[test]
    fn test_deserialize_flags() {
        let flags: ChatTypeFlags = serde_json::from_str(r#"["group","supergroup"]"#).unwrap();
        assert_eq!(flags, ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP);
    }

    #[test]
    fn test_deserialize_flags_rejects_unknown_names() {
        let err = serde_json::from_str::<ChatTypeFlags>(r#"["group","supergrup"]"#).unwrap_err();
        assert!(err.to_string().contains("supergrup"));

        assert!(serde_json::from_str::<ChatTypeFlags>(r#"["unknown"]"#).is_err());
    }

    #[test]
    fn test_parse_chat_type() {
        assert_eq!("Supergroup".parse::<ChatType>(), Ok(ChatType::Supergroup));
        assert_eq!("sender".parse::<ChatType>(), Ok(ChatType::Sender));
        assert!("privat".parse::<ChatType>().is_err());
        assert!("unknown".parse::<ChatType>().is_err());
    }
}
