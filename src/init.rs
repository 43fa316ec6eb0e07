use crate::env::{env_opt, ES_SINK_LOG_ENV};
use crate::error::SinkError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Logging configuration for processes hosting the sink.
///
/// **Fields**
/// - `default_filter`: `EnvFilter` directive used when `ES_SINK_LOG` is
///   not set.
/// - `enable_stdout`: if `false`, only the filter is installed and events
///   are discarded; handy for load runs.
/// - `with_target`: include the event target in each line.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub default_filter: String,
    pub enable_stdout: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "es_item_sink=info".to_string(),
            enable_stdout: true,
            with_target: false,
        }
    }
}

/// Install a global `tracing` subscriber built from [`LogConfig`].
///
/// **Returns**
/// - `Err(SinkError::Logging)` if the filter is invalid or a global
///   subscriber has already been set.
pub fn init_logging_with_config(config: LogConfig) -> Result<(), SinkError> {
    let directive = env_opt(ES_SINK_LOG_ENV).unwrap_or(config.default_filter);
    let filter = EnvFilter::try_new(&directive).map_err(|e| SinkError::Logging(e.to_string()))?;

    let registry = Registry::default().with(filter);
    let result = if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .compact();
        registry.with(fmt_layer).try_init()
    } else {
        registry.try_init()
    };

    result.map_err(|e| SinkError::Logging(e.to_string()))
}

/// Initialize logging with [`LogConfig::default`].
pub fn init_logging() -> Result<(), SinkError> {
    init_logging_with_config(LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_an_error() {
        let quiet = LogConfig {
            enable_stdout: false,
            ..LogConfig::default()
        };
        assert!(init_logging_with_config(quiet.clone()).is_ok());
        assert!(matches!(
            init_logging_with_config(quiet),
            Err(SinkError::Logging(_))
        ));
    }
}
