//! # Telesieve Core
//!
//! The data model and evaluation primitives of the telesieve filtering layer.
//!
//! ## Layers
//!
//! ### Foundation
//!
//! - **Filter context**: an immutable view of the value being tested, with
//!   child contexts for related objects ([`FilterContext`])
//! - **Comparison modes**: ordinal and culture-named text matching
//!   ([`StringComparison`])
//!
//! ### Model
//!
//! Serde projections of the Telegram Bot API objects the filters inspect:
//! [`Update`], [`Message`], [`Chat`], [`User`], plus [`ChatType`] and the
//! [`ChatTypeFlags`] set used for membership checks.
//!
//! ```text
//! Update
//! └── Message { text, from: User }
//!     └── Chat { id, type, title, username, first_name, last_name, is_forum }
//! ```

pub mod error;
pub mod foundation;
pub mod model;

pub use error::{ModelError, ModelResult};
pub use foundation::{FilterContext, StringComparison};
pub use model::{Chat, ChatType, ChatTypeFlags, Message, Update, User};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::model::*;
}
