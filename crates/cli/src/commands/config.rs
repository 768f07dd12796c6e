use std::env;
use std::fs;
use std::path::Path;

use storefront_core::config::{resolve_config_path, AppConfig, LoadOptions};
use storefront_core::ApplicationError;
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG};

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            let error = ApplicationError::from(error);
            return CommandResult::failure(
                "config",
                error.error_class(),
                format!("config validation failed: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str], overridden: bool| {
        field_source(
            key_path,
            env_keys,
            overridden,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        )
    };
    let overrides = &options.overrides;

    let mut lines = vec![
        "effective config (source precedence: override > env > file > default):".to_string()
    ];

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<builtin demo catalog>".to_string());
    lines.push(render_line(
        "catalog.path",
        &catalog_path,
        source("catalog.path", &["STOREFRONT_CATALOG_PATH"], overrides.catalog_path.is_some()),
    ));
    lines.push(render_line(
        "catalog.currency",
        &config.catalog.currency,
        source("catalog.currency", &["STOREFRONT_CATALOG_CURRENCY"], overrides.currency.is_some()),
    ));
    lines.push(render_line(
        "session.added_indicator_ms",
        &config.session.added_indicator_ms.to_string(),
        source(
            "session.added_indicator_ms",
            &["STOREFRONT_SESSION_ADDED_INDICATOR_MS"],
            overrides.added_indicator_ms.is_some(),
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source(
            "logging.level",
            &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
            overrides.log_level.is_some(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source(
            "logging.format",
            &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
            overrides.log_format.is_some(),
        ),
    ));

    CommandResult::text(lines.join("\n"))
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    overridden: bool,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if overridden {
        return "override".to_string();
    }

    for env_key in env_keys {
        let set = env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false);
        if set {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
