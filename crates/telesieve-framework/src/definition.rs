//! Declarative filter definitions.
//!
//! [`FilterDef`] describes a filter as data, so routes can be declared in a
//! configuration file and turned into filter instances at startup:
//!
//! ```toml
//! [[routes]]
//! name = "admin_commands"
//! filters = [
//!     { type = "command", name = "ban" },
//!     { type = "chat-type", any-of = ["group", "supergroup"] },
//!     { type = "not", filter = { type = "from-bot" } },
//! ]
//! ```

use serde::{Deserialize, Serialize};

use telesieve_core::{ChatType, ChatTypeFlags, Message, StringComparison};

use crate::filter::{AllOf, AnyOf, BoxedFilter, FilterExt, Not};
use crate::filters::{
    ChatIdFilter, ChatNameFilter, ChatTitleFilter, ChatTypeFilter, ChatUsernameFilter, FromBot,
    FromUserId, FromUsername, HasText, IsForum, TextCommand, TextContains, TextEndsWith,
    TextEquals, TextStartsWith,
};

/// A filter described as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum FilterDef {
    /// See [`TextStartsWith`].
    TextStartsWith {
        content: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`TextEndsWith`].
    TextEndsWith {
        content: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`TextContains`].
    TextContains {
        content: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`TextEquals`].
    TextEquals {
        content: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`HasText`].
    HasText,
    /// See [`TextCommand`].
    Command {
        name: String,
        #[serde(default)]
        bot: Option<String>,
    },
    /// See [`IsForum`].
    ChatIsForum,
    /// See [`ChatIdFilter`].
    ChatId { id: i64 },
    /// See [`ChatTypeFilter`]. `exact` wins over `any-of` when both are set.
    ChatType {
        #[serde(default)]
        exact: Option<ChatType>,
        #[serde(default)]
        any_of: ChatTypeFlags,
    },
    /// See [`ChatTitleFilter`].
    ChatTitle {
        title: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`ChatUsernameFilter`].
    ChatUsername {
        username: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`ChatNameFilter`].
    ChatName {
        #[serde(default)]
        first_name: Option<String>,
        #[serde(default)]
        last_name: Option<String>,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`FromUserId`].
    FromUserId { id: i64 },
    /// See [`FromUsername`].
    FromUsername {
        username: String,
        #[serde(default)]
        comparison: StringComparison,
    },
    /// See [`FromBot`].
    FromBot,
    /// Inverts the inner filter.
    Not { filter: Box<FilterDef> },
    /// Passes if any inner filter passes.
    AnyOf { filters: Vec<FilterDef> },
    /// Passes if every inner filter passes.
    AllOf { filters: Vec<FilterDef> },
}

impl FilterDef {
    /// Returns the `type` tag of this definition.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TextStartsWith { .. } => "text-starts-with",
            Self::TextEndsWith { .. } => "text-ends-with",
            Self::TextContains { .. } => "text-contains",
            Self::TextEquals { .. } => "text-equals",
            Self::HasText => "has-text",
            Self::Command { .. } => "command",
            Self::ChatIsForum => "chat-is-forum",
            Self::ChatId { .. } => "chat-id",
            Self::ChatType { .. } => "chat-type",
            Self::ChatTitle { .. } => "chat-title",
            Self::ChatUsername { .. } => "chat-username",
            Self::ChatName { .. } => "chat-name",
            Self::FromUserId { .. } => "from-user-id",
            Self::FromUsername { .. } => "from-username",
            Self::FromBot => "from-bot",
            Self::Not { .. } => "not",
            Self::AnyOf { .. } => "any-of",
            Self::AllOf { .. } => "all-of",
        }
    }

    /// Builds the filter this definition describes.
    pub fn build(&self) -> BoxedFilter<Message> {
        match self {
            Self::TextStartsWith {
                content,
                comparison,
            } => TextStartsWith::new(content)
                .with_comparison(*comparison)
                .boxed(),
            Self::TextEndsWith {
                content,
                comparison,
            } => TextEndsWith::new(content)
                .with_comparison(*comparison)
                .boxed(),
            Self::TextContains {
                content,
                comparison,
            } => TextContains::new(content)
                .with_comparison(*comparison)
                .boxed(),
            Self::TextEquals {
                content,
                comparison,
            } => TextEquals::new(content).with_comparison(*comparison).boxed(),
            Self::HasText => HasText.boxed(),
            Self::Command { name, bot } => {
                let command = TextCommand::new(name);
                match bot {
                    Some(bot) => command.for_bot(bot).boxed(),
                    None => command.boxed(),
                }
            }
            Self::ChatIsForum => IsForum.boxed(),
            Self::ChatId { id } => ChatIdFilter::new(*id).boxed(),
            Self::ChatType { exact, any_of } => match exact {
                Some(chat_type) => ChatTypeFilter::exact(*chat_type).boxed(),
                None => ChatTypeFilter::any_of(*any_of).boxed(),
            },
            Self::ChatTitle { title, comparison } => ChatTitleFilter::new(title)
                .with_comparison(*comparison)
                .boxed(),
            Self::ChatUsername {
                username,
                comparison,
            } => ChatUsernameFilter::new(username)
                .with_comparison(*comparison)
                .boxed(),
            Self::ChatName {
                first_name,
                last_name,
                comparison,
            } => ChatNameFilter::new(first_name.as_deref(), last_name.as_deref())
                .with_comparison(*comparison)
                .boxed(),
            Self::FromUserId { id } => FromUserId::new(*id).boxed(),
            Self::FromUsername {
                username,
                comparison,
            } => FromUsername::new(username)
                .with_comparison(*comparison)
                .boxed(),
            Self::FromBot => FromBot.boxed(),
            Self::Not { filter } => Not(filter.build()).boxed(),
            Self::AnyOf { filters } => AnyOf(filters.iter().map(Self::build).collect()).boxed(),
            Self::AllOf { filters } => AllOf(filters.iter().map(Self::build).collect()).boxed(),
        }
    }
}

/// Builds every definition in order.
pub fn build_all(defs: &[FilterDef]) -> Vec<BoxedFilter<Message>> {
    defs.iter().map(FilterDef::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use telesieve_core::{Chat, FilterContext, User};

    use crate::filter::Filter;

    fn passes(def: &FilterDef, message: &Message) -> bool {
        def.build().evaluate(&FilterContext::new(message))
    }

    #[test]
    fn test_deserialize_tagged_definitions() {
        let json = r#"[
            {"type": "text-equals", "content": "hi", "comparison": "ordinal-ignore-case"},
            {"type": "has-text"},
            {"type": "chat-type", "any-of": ["group", "supergroup"]},
            {"type": "chat-name", "first-name": "Ada"},
            {"type": "not", "filter": {"type": "from-bot"}}
        ]"#;

        let defs: Vec<FilterDef> = serde_json::from_str(json).unwrap();
        assert_eq!(
            defs[0],
            FilterDef::TextEquals {
                content: "hi".into(),
                comparison: StringComparison::OrdinalIgnoreCase,
            }
        );
        assert_eq!(defs[1], FilterDef::HasText);
        assert_eq!(
            defs[2],
            FilterDef::ChatType {
                exact: None,
                any_of: ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP,
            }
        );
        assert_eq!(defs[3].kind(), "chat-name");
        assert_eq!(defs[4].kind(), "not");
    }

    #[test]
    fn test_default_comparison() {
        let def: FilterDef =
            serde_json::from_str(r#"{"type": "text-starts-with", "content": "foo"}"#).unwrap();
        assert_eq!(
            def,
            FilterDef::TextStartsWith {
                content: "foo".into(),
                comparison: StringComparison::InvariantCulture,
            }
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_str::<FilterDef>(r#"{"type": "telepathy"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_built_filters_behave_like_constructed_ones() {
        let supergroup = Message::new(1, Chat::new(-5, ChatType::Supergroup).forum())
            .with_text("HI")
            .with_from(User::new(1, "Ada"));

        let equals = FilterDef::TextEquals {
            content: "hi".into(),
            comparison: StringComparison::OrdinalIgnoreCase,
        };
        assert!(passes(&equals, &supergroup));

        let groups = FilterDef::ChatType {
            exact: None,
            any_of: ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP,
        };
        assert!(passes(&groups, &supergroup));

        let exact_private = FilterDef::ChatType {
            exact: Some(ChatType::Private),
            any_of: ChatTypeFlags::ALL,
        };
        assert!(!passes(&exact_private, &supergroup));

        let not_bot = FilterDef::Not {
            filter: Box::new(FilterDef::FromBot),
        };
        assert!(passes(&not_bot, &supergroup));

        let any = FilterDef::AnyOf {
            filters: vec![FilterDef::ChatId { id: 1 }, FilterDef::ChatIsForum],
        };
        assert!(passes(&any, &supergroup));

        let all = FilterDef::AllOf {
            filters: vec![FilterDef::ChatId { id: 1 }, FilterDef::ChatIsForum],
        };
        assert!(!passes(&all, &supergroup));
    }

    #[test]
    fn test_build_all_keeps_order() {
        let defs = vec![FilterDef::HasText, FilterDef::ChatIsForum];
        let filters = build_all(&defs);
        assert_eq!(filters.len(), 2);
        assert!(filters[0].name().ends_with("HasText"));
        assert!(filters[1].name().ends_with("IsForum"));
    }
}
