use log::LevelFilter;

/// Initialize the logger. `RUST_LOG` is read first, `level` overrides it.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
