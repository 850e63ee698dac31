use roster_core::config::{LogFormat, LoggingConfig};
use tracing::Level;

/// Installs the global subscriber. Events go to stderr; stdout carries the
/// command payload. Call once per process.
pub fn init_logging(config: &LoggingConfig) {
    let log_level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use roster_core::config::{LogFormat, LoggingConfig};

    use super::init_logging;

    #[test]
    fn init_logging_installs_the_global_subscriber() {
        init_logging(&LoggingConfig { level: "debug".to_string(), format: LogFormat::Json });

        assert!(tracing::dispatcher::has_been_set());
        assert!(tracing::enabled!(tracing::Level::DEBUG));
        assert!(!tracing::enabled!(tracing::Level::TRACE));
    }
}
