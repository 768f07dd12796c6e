pub mod catalog;
pub mod config;
pub mod shop;

use serde::Serialize;
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::{load_catalog, ApplicationError, Catalog};

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_CATALOG: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
pub const EXIT_IO: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn text(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => EXIT_CONFIG,
            ApplicationError::Domain(_) | ApplicationError::Catalog(_) => EXIT_CATALOG,
        };
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            exit_code,
        )
    }
}

/// Loads config and the catalog it points at, mapping failures to a command result.
pub(crate) fn load_context(
    command: &str,
    options: &LoadOptions,
) -> Result<(AppConfig, Catalog), CommandResult> {
    let config = AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::from_application_error(command, ApplicationError::from(error))
    })?;
    let catalog = load_catalog(&config.catalog).map_err(|error| {
        CommandResult::from_application_error(command, ApplicationError::from(error))
    })?;

    Ok((config, catalog))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
