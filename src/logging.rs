use chrono::Local;
use log::LevelFilter;
use std::io::Write;

/// Wall-clock time as `HH:MM:SS` for log lines
pub fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Level used when none is given: `RUST_LOG` if it parses, otherwise `warn`
pub fn resolve_level(level: Option<LevelFilter>) -> LevelFilter {
    level
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Warn)
}

/// Initialise `env_logger` as `[HH:MM:SS LEVEL] message`.
///
/// An explicit `level` wins over `RUST_LOG`; the fallback is `warn` so the
/// command-line output stays clean unless asked otherwise.
pub fn init_logging(level: Option<LevelFilter>) {
    let log_level = resolve_level(level);

    let result = env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{} {:5}] {}", timestamp(), record.level(), record.args()))
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized (level: {})", log_level);
    }
}
