//! Filters over a message's text.
//!
//! Every text filter fails closed: a message without text never passes.

use telesieve_core::{FilterContext, Message, StringComparison};

use crate::filter::Filter;

/// Declares a text filter comparing `message.text` with a configured pattern.
macro_rules! text_filter {
    ($(#[$meta:meta])* $name:ident => $method:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            content: String,
            comparison: StringComparison,
        }

        impl $name {
            /// Creates the filter with the default comparison mode.
            pub fn new(content: impl Into<String>) -> Self {
                Self {
                    content: content.into(),
                    comparison: StringComparison::default(),
                }
            }

            /// Selects the comparison mode.
            pub fn with_comparison(mut self, comparison: StringComparison) -> Self {
                self.comparison = comparison;
                self
            }

            /// Returns the configured pattern.
            pub fn content(&self) -> &str {
                &self.content
            }

            /// Returns the configured comparison mode.
            pub fn comparison(&self) -> StringComparison {
                self.comparison
            }
        }

        impl Filter<Message> for $name {
            fn evaluate(&self, ctx: &FilterContext<'_, Message>) -> bool {
                ctx.target()
                    .text()
                    .is_some_and(|text| self.comparison.$method(text, &self.content))
            }
        }
    };
}

text_filter! {
    /// Passes if the text starts with the configured content.
    TextStartsWith => starts_with
}

text_filter! {
    /// Passes if the text ends with the configured content.
    TextEndsWith => ends_with
}

text_filter! {
    /// Passes if the text contains the configured content.
    TextContains => contains
}

text_filter! {
    /// Passes if the text equals the configured content.
    TextEquals => equals
}

/// Passes if the message carries non-empty text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasText;

impl Filter<Message> for HasText {
    fn evaluate(&self, ctx: &FilterContext<'_, Message>) -> bool {
        ctx.target().text().is_some_and(|text| !text.is_empty())
    }
}

/// Passes if the text is the bot command `/name`.
///
/// The first whitespace-separated token must be `/name` or `/name@bot`.
/// Command names compare ASCII case-insensitively. When a bot username is
/// configured, an explicit `@mention` must address that bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCommand {
    name: String,
    bot: Option<String>,
}

impl TextCommand {
    /// Creates a filter for `/name`. A leading `/` in `name` is ignored.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: name.trim_start_matches('/').to_string(),
            bot: None,
        }
    }

    /// Only accepts `@mentions` of the given bot username.
    pub fn for_bot(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.bot = Some(username.trim_start_matches('@').to_string());
        self
    }

    /// Returns the command name without the leading `/`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Filter<Message> for TextCommand {
    fn evaluate(&self, ctx: &FilterContext<'_, Message>) -> bool {
        let Some(token) = ctx.target().text().and_then(|t| t.split_whitespace().next()) else {
            return false;
        };
        let Some(command) = token.strip_prefix('/') else {
            return false;
        };

        let (name, mention) = match command.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (command, None),
        };

        if !name.eq_ignore_ascii_case(&self.name) {
            return false;
        }

        match (mention, &self.bot) {
            (Some(mention), Some(bot)) => mention.eq_ignore_ascii_case(bot),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telesieve_core::{Chat, ChatType};

    fn message(text: Option<&str>) -> Message {
        let message = Message::new(1, Chat::new(1, ChatType::Private));
        match text {
            Some(text) => message.with_text(text),
            None => message,
        }
    }

    fn eval<F: Filter<Message>>(filter: &F, text: Option<&str>) -> bool {
        let message = message(text);
        filter.evaluate(&FilterContext::new(&message))
    }

    #[test]
    fn test_missing_text_fails_every_filter() {
        assert!(!eval(&TextStartsWith::new(""), None));
        assert!(!eval(&TextEndsWith::new(""), None));
        assert!(!eval(&TextContains::new(""), None));
        assert!(!eval(&TextEquals::new(""), None));
        assert!(!eval(&HasText, None));
        assert!(!eval(&TextCommand::new("start"), None));
    }

    #[test]
    fn test_starts_with() {
        let filter = TextStartsWith::new("foo");
        assert!(eval(&filter, Some("foobar")));
        assert!(!eval(&filter, Some("barfoo")));
        assert!(!eval(&filter, Some("FOObar")));
    }

    #[test]
    fn test_ends_with_and_contains() {
        assert!(eval(&TextEndsWith::new("bar"), Some("foobar")));
        assert!(!eval(&TextEndsWith::new("foo"), Some("foobar")));
        assert!(eval(&TextContains::new("oba"), Some("foobar")));
        assert!(!eval(&TextContains::new("baz"), Some("foobar")));
    }

    #[test]
    fn test_equals_ignore_case() {
        let filter = TextEquals::new("hi").with_comparison(StringComparison::OrdinalIgnoreCase);
        assert!(eval(&filter, Some("HI")));
        assert!(!eval(&filter, Some("hi there")));
        assert!(!eval(&TextEquals::new("hi"), Some("HI")));
    }

    #[test]
    fn test_has_text() {
        assert!(eval(&HasText, Some("x")));
        assert!(!eval(&HasText, Some("")));
    }

    #[test]
    fn test_command() {
        let filter = TextCommand::new("/start");
        assert_eq!(filter.name(), "start");
        assert!(eval(&filter, Some("/start")));
        assert!(eval(&filter, Some("/START payload")));
        assert!(eval(&filter, Some("/start@any_bot")));
        assert!(!eval(&filter, Some("/started")));
        assert!(!eval(&filter, Some("start")));
        assert!(!eval(&filter, Some("")));
    }

    #[test]
    fn test_command_for_bot() {
        let filter = TextCommand::new("help").for_bot("@sieve_bot");
        assert!(eval(&filter, Some("/help")));
        assert!(eval(&filter, Some("/help@Sieve_Bot")));
        assert!(!eval(&filter, Some("/help@other_bot")));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let filter = TextStartsWith::new("foo");
        let message = message(Some("foobar"));
        let ctx = FilterContext::new(&message);
        let first = filter.evaluate(&ctx);
        let second = filter.evaluate(&ctx);
        assert_eq!(first, second);
    }
}
