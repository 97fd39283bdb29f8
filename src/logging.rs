//! Logger setup shared by the binaries.

use std::io::Write;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`. `RUST_LOG`, when set, overrides `level`.
pub fn init_logger(level: &str) {
    let default_level = level.parse().unwrap_or(LevelFilter::Info);

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(default_level)
        .parse_env(Env::default())
        .init();
}
