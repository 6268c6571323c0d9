use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. "debug" or
/// "px_engine=debug,wgpu_core=warn".
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter. Falls back to `RUST_LOG`, then to `default_level`.
    pub env_filter: Option<String>,

    /// Level used when neither a filter nor `RUST_LOG` is given.
    pub default_level: log::LevelFilter,

    /// Cap for wgpu's own crates under the default level; they log per frame at info.
    pub wgpu_level: log::LevelFilter,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            wgpu_level: log::LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(config.default_level);
                for module in ["wgpu_core", "wgpu_hal", "naga"] {
                    builder.filter_module(module, config.wgpu_level.min(config.default_level));
                }
            }
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed by the host process.
        if builder.try_init().is_err() {
            return;
        }
        log::debug!("logging initialized");
    });
}
