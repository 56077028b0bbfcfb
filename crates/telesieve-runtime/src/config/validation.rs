//! Configuration validation utilities.

use std::collections::HashSet;

use telesieve_core::ChatType;
use telesieve_framework::FilterDef;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, RouteConfig, TelesieveConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &TelesieveConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_routes_config(&config.routes)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.max_files == 0 {
        return Err(ConfigError::validation(
            "logging.max_files must be greater than 0",
        ));
    }

    if logging.filters.keys().any(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(
            "logging.filters cannot contain a blank module name",
        ));
    }

    Ok(())
}

/// Validates all routes, including disabled ones.
fn validate_routes_config(routes: &[RouteConfig]) -> ConfigResult<()> {
    let mut seen_names = HashSet::new();

    for route in routes {
        if route.name.trim().is_empty() {
            return Err(ConfigError::missing_field("routes.name"));
        }

        if !seen_names.insert(route.name.as_str()) {
            return Err(ConfigError::DuplicateRoute(route.name.clone()));
        }

        if route
            .handler
            .as_deref()
            .is_some_and(|handler| handler.trim().is_empty())
        {
            return Err(ConfigError::validation(format!(
                "Route '{}' names a blank handler",
                route.name
            )));
        }

        for filter in &route.filters {
            validate_filter_def(&route.name, filter)?;
        }
    }

    Ok(())
}

/// Validates one filter definition, recursing into combinators.
fn validate_filter_def(route: &str, def: &FilterDef) -> ConfigResult<()> {
    let blank = |field: &str| {
        ConfigError::invalid_filter(route, format!("{} has a blank {field}", def.kind()))
    };

    match def {
        FilterDef::TextStartsWith { content, .. }
        | FilterDef::TextEndsWith { content, .. }
        | FilterDef::TextContains { content, .. }
        | FilterDef::TextEquals { content, .. } => {
            if content.is_empty() {
                return Err(blank("content"));
            }
        }
        FilterDef::Command { name, bot } => {
            if name.trim_start_matches('/').trim().is_empty() {
                return Err(blank("name"));
            }
            if bot
                .as_deref()
                .is_some_and(|bot| bot.trim_start_matches('@').trim().is_empty())
            {
                return Err(blank("bot"));
            }
        }
        FilterDef::ChatType { exact, any_of } => {
            if exact.is_none() && any_of.is_empty() {
                return Err(ConfigError::invalid_filter(
                    route,
                    "chat-type needs `exact` or a non-empty `any-of`",
                ));
            }
            // Misspelled names deserialize to `Unknown`, which no chat matches.
            if *exact == Some(ChatType::Unknown) {
                return Err(ConfigError::invalid_filter(
                    route,
                    "chat-type `exact` names an unknown chat type",
                ));
            }
        }
        FilterDef::ChatTitle { title, .. } => {
            if title.trim().is_empty() {
                return Err(blank("title"));
            }
        }
        FilterDef::ChatUsername { username, .. } | FilterDef::FromUsername { username, .. } => {
            if username.trim_start_matches('@').trim().is_empty() {
                return Err(blank("username"));
            }
        }
        FilterDef::Not { filter } => validate_filter_def(route, filter)?,
        FilterDef::AnyOf { filters } | FilterDef::AllOf { filters } => {
            if filters.is_empty() {
                return Err(ConfigError::invalid_filter(
                    route,
                    format!("{} needs at least one filter", def.kind()),
                ));
            }
            for filter in filters {
                validate_filter_def(route, filter)?;
            }
        }
        FilterDef::HasText
        | FilterDef::ChatIsForum
        | FilterDef::ChatId { .. }
        | FilterDef::ChatName { .. }
        | FilterDef::FromUserId { .. }
        | FilterDef::FromBot => {}
    }

    Ok(())
}
