//! Group Moderator Demo
//!
//! Loads `telesieve.toml` from the working directory, registers one handler
//! per configured route and feeds a handful of Bot API updates through the
//! resulting router.
//!
//! # Usage
//!
//! ```bash
//! cd demos/group_moderator && cargo run
//! ```

use std::sync::Arc;

use anyhow::Result;
use telesieve::prelude::*;
use tracing::info;

// ============================================================================
// Handlers
// ============================================================================

async fn start(message: Arc<Message>) {
    info!(chat_id = message.chat.id, "Greeting new user");
}

async fn ban(message: Arc<Message>) {
    let moderator = message.from.as_ref().map(|user| user.first_name.as_str());
    info!(chat_id = message.chat.id, ?moderator, "Ban requested");
}

async fn link_watch(message: Arc<Message>) {
    info!(
        chat_id = message.chat.id,
        text = message.text().unwrap_or_default(),
        "Link posted in forum"
    );
}

// ============================================================================
// Sample updates
// ============================================================================

const UPDATES: &[&str] = &[
    r#"{"update_id":1,"message":{"message_id":10,"chat":{"id":7,"type":"private","first_name":"Ada"},"from":{"id":7,"is_bot":false,"first_name":"Ada"},"text":"/start@moderator_bot"}}"#,
    r#"{"update_id":2,"message":{"message_id":11,"chat":{"id":-100,"type":"supergroup","title":"Rustaceans"},"from":{"id":8,"is_bot":false,"first_name":"Linus"},"text":"/ban spammer"}}"#,
    r#"{"update_id":3,"message":{"message_id":12,"chat":{"id":-200,"type":"supergroup","title":"Help desk","is_forum":true},"from":{"id":9,"is_bot":false,"first_name":"Grace"},"text":"see HTTPS://example.org"}}"#,
    r#"{"update_id":4,"message":{"message_id":13,"chat":{"id":-100,"type":"supergroup","title":"Rustaceans"},"from":{"id":10,"is_bot":true,"first_name":"Spam"},"text":"/ban everyone"}}"#,
    r#"{"update_id":5}"#,
];

#[tokio::main]
async fn main() -> Result<()> {
    let runtime = Runtime::builder()
        .handler("start", handler_fn(start))
        .handler("ban", handler_fn(ban))
        .handler("link_watch", handler_fn(link_watch))
        .build()?;

    info!(stats = ?runtime.stats(), routes = ?runtime.router().route_names(), "Router ready");

    for payload in UPDATES {
        match runtime.dispatch_json(payload).await? {
            Some(route) => info!(%route, "Update handled"),
            None => info!("Update ignored"),
        }
    }

    Ok(())
}
