use std::sync::Once;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Subscriber configuration.
///
/// `env_filter` uses the `tracing_subscriber::EnvFilter` directive syntax
/// (e.g. "debug", "steadytick=trace,winit=warn"). When unset, `RUST_LOG` is read.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            ansi: true,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global fmt subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let (filter, rejected) = resolve_filter(config.env_filter.as_deref());
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.ansi)
            .try_init();

        if let Err(e) = installed {
            eprintln!("logging already initialized elsewhere: {e}");
            return;
        }
        if let Some(directives) = rejected {
            tracing::warn!("ignoring invalid log filter {directives:?}, using {DEFAULT_FILTER}");
        }
        tracing::debug!("logging initialized");
    });
}

/// Picks the filter to install, returning the directives that failed to parse.
fn resolve_filter(explicit: Option<&str>) -> (EnvFilter, Option<String>) {
    let directives = match explicit {
        Some(directives) => Some(directives.to_string()),
        None => std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    };

    match directives {
        None => (EnvFilter::new(DEFAULT_FILTER), None),
        Some(directives) => match EnvFilter::try_new(&directives) {
            Ok(filter) => (filter, None),
            Err(_) => (EnvFilter::new(DEFAULT_FILTER), Some(directives)),
        },
    }
}
