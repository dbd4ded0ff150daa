//! Tracing setup for HexaNebula.
//!
//! Console output carries uptime timestamps and targets so region and
//! generation events from `hexa_universe` can be filtered per module. Debug
//! builds additionally write JSON lines to `hexa.log` for replaying long
//! flights. `RUST_LOG` wins over the configured `debug.log_level`.

use std::path::Path;

use hexa_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "hexa.log";

/// Install the global subscriber.
///
/// `log_dir` is only used when `debug_build` is set; if the directory or file
/// cannot be created, logging continues on the console alone. Calling this
/// more than once keeps the first subscriber.
///
/// ```no_run
/// let config = hexa_config::Config::default();
/// hexa_log::init_logging(Some(std::path::Path::new("logs")), true, Some(&config));
/// tracing::info!("seed {}", 42);
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(config)));

    let console = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry().with(filter).with(console);

    let log_file = log_dir
        .filter(|_| debug_build)
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .and_then(|dir| std::fs::File::create(dir.join(LOG_FILE_NAME)).ok());

    if let Some(file) = log_file {
        let json = fmt::layer()
            .json()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime());
        let _ = subscriber.with(json).try_init();
    } else {
        let _ = subscriber.try_init();
    }
}

/// The filter directive derived from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_string(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// An `EnvFilter` at [`DEFAULT_FILTER`], for tests and tools.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        assert!(default_env_filter().to_string().contains(DEFAULT_FILTER));
    }

    #[test]
    fn test_configured_level_is_used_verbatim() {
        let mut config = Config::default();
        config.debug.log_level = "hexa_universe=trace,warn".to_string();
        assert_eq!(filter_string(Some(&config)), "hexa_universe=trace,warn");
    }

    #[test]
    fn test_blank_level_falls_back_to_default() {
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_string(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_module_directives_parse() {
        for directive in [
            "debug,hexa_universe::region=trace",
            "warn,hexa_universe::generator=info",
            "hexa_universe::shooting_star=trace",
        ] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
    }

    #[test]
    fn test_debug_build_creates_json_log() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        init_logging(Some(&logs), true, None);
        assert!(logs.join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_release_build_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        init_logging(Some(dir.path()), false, None);
        assert!(!dir.path().join(LOG_FILE_NAME).exists());
    }
}
