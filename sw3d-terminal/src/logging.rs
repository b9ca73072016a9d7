/// Logger setup for the terminal frontend
use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one.
pub const DEFAULT_FILTER: &str = "warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "warn",
/// "sw3d_core=debug"). When unset, `RUST_LOG` is consulted, then
/// [`DEFAULT_FILTER`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Output goes to stderr, which shares the terminal with the alternate
/// screen the app draws on. The `warn` default keeps per-frame `debug` and
/// `trace` records from scribbling over the picture; raise it with
/// `RUST_LOG` and redirect stderr to a file to see them.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = filter_spec(&config, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized with filter {:?}", filter);
    });
}

/// The filter in effect: explicit config, then `RUST_LOG`, then the default.
fn filter_spec(config: &LoggingConfig, rust_log: Option<String>) -> String {
    config
        .env_filter
        .clone()
        .or(rust_log)
        .filter(|spec| !spec.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
