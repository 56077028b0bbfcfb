//! Handler registry.
//!
//! Routes in configuration refer to handlers by name. The registry is the
//! table those names resolve against when the router is built.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use telesieve_framework::BoxedHandler;

use crate::error::{RuntimeError, RuntimeResult};

/// Name → handler table.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, BoxedHandler>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under `name`.
    ///
    /// Fails if the name is already taken.
    pub fn register(&mut self, name: impl Into<String>, handler: BoxedHandler) -> RuntimeResult<()> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(RuntimeError::HandlerExists(name));
        }
        debug!(handler = %name, "Registered handler");
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Looks up a handler by name.
    pub fn get(&self, name: &str) -> Option<BoxedHandler> {
        self.handlers.get(name).cloned()
    }

    /// Returns `true` if a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Returns all registered handler names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telesieve_framework::handler_fn;

    fn noop() -> BoxedHandler {
        handler_fn(|_message| async {})
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        registry.register("start", noop()).unwrap();
        registry.register("help", noop()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("start"));
        assert!(registry.get("help").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names(), vec!["help", "start"]);
    }

    #[test]
    fn test_duplicate_handler_is_rejected() {
        let mut registry = HandlerRegistry::new();
        registry.register("start", noop()).unwrap();

        let result = registry.register("start", noop());
        assert!(matches!(result, Err(RuntimeError::HandlerExists(name)) if name == "start"));
        assert_eq!(registry.len(), 1);
    }
}
