//! Logger setup shared by the binaries.

use log::LevelFilter;

/// Start the stderr logger at `level`; `RUST_LOG` takes precedence when set.
///
/// Unknown levels fall back to `warn`. Calling this twice is harmless.
pub fn init(level: &str) {
    let filter = level.parse().unwrap_or(LevelFilter::Warn);
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
