use storefront_core::config::{LogFormat, LoggingConfig};
use tracing::Level;

/// Installs the global subscriber. Output goes to stderr so command payloads
/// on stdout stay machine-readable. Returns `false` when a subscriber was already
/// installed; the refusal is logged at debug level.
pub fn init(logging: &LoggingConfig) -> bool {
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let installed = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(error) = installed {
        tracing::debug!(
            event_name = "logging.init.skipped",
            error = %error,
            "global subscriber already installed"
        );
        return false;
    }
    true
}
