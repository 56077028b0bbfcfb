//! Runtime assembly: configuration, logging and the router.
//!
//! The runtime turns declarative route configuration into a ready
//! [`Router`]:
//!
//! 1. Load configuration (files, environment, overrides)
//! 2. Validate it
//! 3. Initialize logging
//! 4. Build one route per enabled [`RouteConfig`](crate::config::RouteConfig),
//!    resolving its handler by name
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use telesieve_runtime::Runtime;
//! use telesieve_framework::handler_fn;
//!
//! let runtime = Runtime::builder()
//!     .config_file("telesieve.toml")
//!     .handler("start", handler_fn(|message| async move { /* ... */ }))
//!     .handler("group_text", handler_fn(|message| async move { /* ... */ }))
//!     .build()?;
//!
//! runtime.dispatch_json(payload).await?;
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use telesieve_core::{Message, Update};
use telesieve_framework::{BoxedHandler, FilterBinding, Route, Router, build_all};

use crate::config::{ConfigLoader, TelesieveConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;
use crate::registry::HandlerRegistry;

/// Counters describing how the router was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Routes added to the router.
    pub routes: usize,
    /// Routes skipped because they are disabled.
    pub disabled_routes: usize,
    /// Handlers available in the registry.
    pub handlers: usize,
}

/// A configured router together with the configuration it came from.
#[derive(Debug, Clone)]
pub struct Runtime {
    config: TelesieveConfig,
    router: Router,
    stats: RuntimeStats,
}

impl Runtime {
    /// Creates a runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from an already loaded configuration.
    ///
    /// The configuration is validated and logging is initialized from it.
    pub fn from_config(config: TelesieveConfig, handlers: &HandlerRegistry) -> RuntimeResult<Self> {
        validate_config(&config)?;
        logging::init_from_config(&config.logging);
        Self::assemble(config, handlers)
    }

    fn assemble(config: TelesieveConfig, handlers: &HandlerRegistry) -> RuntimeResult<Self> {
        let (router, stats) = build_router(&config, handlers)?;

        info!(
            routes = stats.routes,
            disabled_routes = stats.disabled_routes,
            handlers = stats.handlers,
            log_level = %config.logging.level,
            "Runtime initialized from configuration"
        );

        Ok(Self {
            config,
            router,
            stats,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TelesieveConfig {
        &self.config
    }

    /// Returns the router. Clones share the same route table.
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Dispatches a message; returns the matched route name.
    pub async fn dispatch(&self, message: Message) -> Option<String> {
        self.router.dispatch(message).await
    }

    /// Dispatches the message carried by an update, if any.
    pub async fn dispatch_update(&self, update: Update) -> Option<String> {
        self.router.dispatch_update(update).await
    }

    /// Decodes a Bot API update payload and dispatches it.
    pub async fn dispatch_json(&self, payload: &str) -> RuntimeResult<Option<String>> {
        Ok(self.router.dispatch_json(payload).await?)
    }
}

/// Builds a router from the enabled routes of `config`.
///
/// Routes keep their configured order. Every enabled route must name a
/// registered handler.
pub fn build_router(
    config: &TelesieveConfig,
    handlers: &HandlerRegistry,
) -> RuntimeResult<(Router, RuntimeStats)> {
    let router = Router::new();
    let mut stats = RuntimeStats {
        handlers: handlers.len(),
        ..Default::default()
    };

    for route in &config.routes {
        if !route.enabled {
            debug!(route = %route.name, "Skipping disabled route");
            stats.disabled_routes += 1;
            continue;
        }

        let handler_name = route.handler_name();
        let handler = handlers
            .get(handler_name)
            .ok_or_else(|| RuntimeError::HandlerNotFound {
                route: route.name.clone(),
                handler: handler_name.to_string(),
            })?;

        let binding = FilterBinding::new(route.name.clone(), build_all(&route.filters));
        router.add(Route::new(binding, handler));
        stats.routes += 1;
    }

    Ok((router, stats))
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for a [`Runtime`] with custom configuration sources.
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    handlers: HandlerRegistry,
    init_logging: bool,
    error: Option<RuntimeError>,
}

impl RuntimeBuilder {
    /// Creates a builder searching the current directory for configuration.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
            handlers: HandlerRegistry::new(),
            init_logging: true,
            error: None,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile (e.g., "development", "production").
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Enables loading environment variables (enabled by default).
    pub fn with_env(mut self) -> Self {
        self.config_loader = self.config_loader.with_env();
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges a base configuration below files and env vars.
    pub fn merge(mut self, config: TelesieveConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Overrides one value by dotted key, e.g. `logging.level`.
    pub fn set<V: Serialize>(mut self, key: &str, value: V) -> Self {
        self.config_loader = self.config_loader.set(key, value);
        self
    }

    /// Leaves the global subscriber alone, e.g. when the host application
    /// installs its own.
    pub fn without_logging(mut self) -> Self {
        self.init_logging = false;
        self
    }

    /// Registers a handler under `name`.
    ///
    /// A duplicate name is reported by [`build`](Self::build).
    pub fn handler(mut self, name: impl Into<String>, handler: BoxedHandler) -> Self {
        if let Err(err) = self.handlers.register(name, handler) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Loads the configuration and builds the runtime.
    pub fn build(self) -> RuntimeResult<Runtime> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let config = self.config_loader.load()?;
        validate_config(&config)?;
        if self.init_logging {
            logging::init_from_config(&config.logging);
        }
        Runtime::assemble(config, &self.handlers)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use telesieve_core::{Chat, ChatType, ChatTypeFlags};
    use telesieve_framework::{FilterDef, handler_fn};

    use crate::config::{ConfigError, RouteConfig};

    fn counting(counter: &Arc<AtomicUsize>) -> BoxedHandler {
        let counter = Arc::clone(counter);
        handler_fn(move |_message| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    fn routes() -> Vec<RouteConfig> {
        vec![
            RouteConfig::new(
                "start",
                vec![FilterDef::Command {
                    name: "start".into(),
                    bot: None,
                }],
            ),
            RouteConfig::new("legacy", vec![FilterDef::HasText]).disabled(),
            RouteConfig::new(
                "groups",
                vec![FilterDef::ChatType {
                    exact: None,
                    any_of: ChatTypeFlags::GROUP | ChatTypeFlags::SUPERGROUP,
                }],
            )
            .with_handler("group_text"),
        ]
    }

    fn config() -> TelesieveConfig {
        TelesieveConfig {
            routes: routes(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_router_skips_disabled_routes() {
        let mut handlers = HandlerRegistry::new();
        handlers.register("start", handler_fn(|_m| async {})).unwrap();
        handlers
            .register("group_text", handler_fn(|_m| async {}))
            .unwrap();

        let (router, stats) = build_router(&config(), &handlers).unwrap();

        assert_eq!(router.route_names(), vec!["start", "groups"]);
        assert_eq!(
            stats,
            RuntimeStats {
                routes: 2,
                disabled_routes: 1,
                handlers: 2,
            }
        );
    }

    #[test]
    fn test_unknown_handler() {
        let mut handlers = HandlerRegistry::new();
        handlers.register("start", handler_fn(|_m| async {})).unwrap();

        let result = build_router(&config(), &handlers);
        assert!(matches!(
            result,
            Err(RuntimeError::HandlerNotFound { route, handler })
                if route == "groups" && handler == "group_text"
        ));
    }

    #[test]
    fn test_disabled_route_does_not_need_a_handler() {
        let mut handlers = HandlerRegistry::new();
        handlers.register("start", handler_fn(|_m| async {})).unwrap();
        handlers
            .register("group_text", handler_fn(|_m| async {}))
            .unwrap();

        // "legacy" is disabled and has no handler registered.
        assert!(build_router(&config(), &handlers).is_ok());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = config();
        config.routes.push(RouteConfig::new("start", vec![]));

        let result = Runtime::from_config(config, &HandlerRegistry::new());
        assert!(matches!(
            result,
            Err(RuntimeError::Config(ConfigError::DuplicateRoute(_)))
        ));
    }

    #[test]
    fn test_builder_reports_duplicate_handler() {
        let result = Runtime::builder()
            .without_env()
            .without_logging()
            .handler("start", handler_fn(|_m| async {}))
            .handler("start", handler_fn(|_m| async {}))
            .build();

        assert!(matches!(result, Err(RuntimeError::HandlerExists(_))));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_builder_overrides() {
        use crate::config::{LogLevel, LogOutput, LoggingConfig};

        figment::Jail::expect_with(|jail| {
            jail.create_file("telesieve.toml", "[logging]\nlevel = \"warn\"\n")?;

            let runtime = Runtime::builder()
                .search_path(jail.directory())
                .without_env()
                .without_logging()
                .merge(TelesieveConfig {
                    logging: LoggingConfig {
                        level: LogLevel::Trace,
                        output: LogOutput::Stderr,
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .set("logging.level", LogLevel::Error)
                .build()
                .map_err(|e| e.to_string())?;

            assert_eq!(runtime.config().logging.level, LogLevel::Error);
            assert_eq!(runtime.config().logging.output, LogOutput::Stderr);
            Ok(())
        });
    }

    #[tokio::test]
    async fn test_dispatch_through_configured_routes() {
        let starts = Arc::new(AtomicUsize::new(0));
        let groups = Arc::new(AtomicUsize::new(0));

        let mut handlers = HandlerRegistry::new();
        handlers.register("start", counting(&starts)).unwrap();
        handlers.register("group_text", counting(&groups)).unwrap();

        let runtime = Runtime::from_config(config(), &handlers).unwrap();
        assert_eq!(runtime.stats().routes, 2);

        let command = Message::new(1, Chat::new(-1, ChatType::Supergroup)).with_text("/start");
        assert_eq!(runtime.dispatch(command).await.as_deref(), Some("start"));

        let chatter = Message::new(2, Chat::new(-1, ChatType::Group)).with_text("hello");
        assert_eq!(runtime.dispatch(chatter).await.as_deref(), Some("groups"));

        let private = Message::new(3, Chat::new(7, ChatType::Private)).with_text("hello");
        assert_eq!(runtime.dispatch(private).await, None);

        let payload = r#"{"update_id":9,"message":{"message_id":4,"chat":{"id":-1,"type":"group"},"text":"/start@any_bot now"}}"#;
        assert_eq!(
            runtime.dispatch_json(payload).await.unwrap().as_deref(),
            Some("start")
        );
        assert!(matches!(
            runtime.dispatch_json("{").await,
            Err(RuntimeError::Dispatch(_))
        ));

        assert_eq!(starts.load(Ordering::SeqCst), 2);
        assert_eq!(groups.load(Ordering::SeqCst), 1);
    }
}
