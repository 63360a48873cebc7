//! Logging setup for the `kinetika` binary.
//!
//! The subscriber is installed before the config file is read, so messages
//! emitted while loading it are not lost. The configured `logging.level`
//! is applied afterwards through a reload handle, unless `RUST_LOG` or
//! `--verbose` already fixed the filter.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, reload};

/// Handle for adjusting the filter once the config is known.
pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl Logging {
    /// Install the global subscriber. Library crates log through the `log`
    /// facade, which the subscriber picks up.
    pub fn init(verbose: bool) -> Self {
        let (filter, pinned) = startup_filter(EnvFilter::try_from_default_env().ok(), verbose);
        let (filter, handle) = reload::Layer::new(filter);
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        tracing::debug!("kinetika {}", env!("CARGO_PKG_VERSION"));
        Self { handle, pinned }
    }

    /// Switch to the level from the config file.
    pub fn apply_config_level(&self, level: &str) {
        if self.pinned {
            return;
        }
        if let Err(e) = self.handle.reload(EnvFilter::new(level)) {
            tracing::warn!("Could not apply log level '{level}': {e}");
        }
    }
}

/// Filter to start with, and whether it must survive the config file.
///
/// `RUST_LOG` wins over everything, then `--verbose`. Otherwise logging
/// starts at `info` until the config says otherwise.
pub fn startup_filter(from_env: Option<EnvFilter>, verbose: bool) -> (EnvFilter, bool) {
    match from_env {
        Some(filter) => (filter, true),
        None if verbose => (EnvFilter::new("debug"), true),
        None => (EnvFilter::new("info"), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_startup_filter_defaults_to_info() {
        let (filter, pinned) = startup_filter(None, false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert!(!pinned);
    }

    #[test]
    fn test_startup_filter_verbose_is_pinned() {
        let (filter, pinned) = startup_filter(None, true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(pinned);
    }

    #[test]
    fn test_startup_filter_env_wins_over_verbose() {
        let (filter, pinned) = startup_filter(Some(EnvFilter::new("warn")), true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        assert!(pinned);
    }
}
