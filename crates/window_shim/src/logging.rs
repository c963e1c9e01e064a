//! Logging setup

/// Initialize logging with `level` as the default filter
///
/// `RUST_LOG` still overrides the default. Safe to call more than once; only
/// the first call installs a logger.
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
