use std::{fmt::Display, str::FromStr};

use backtrace::Backtrace;
use tracing::{debug, error, info, level_filters::LevelFilter, trace, warn};

/// Installs the global subscriber. Calling it twice (as tests do) is a no-op.
pub fn init(display_level: &bool, level_filter: &str) {
    let level_filter = match LevelFilter::from_str(level_filter) {
        Ok(level) => level,
        Err(err) => panic!("Invalid log level filter '{level_filter}': {err}"),
    };

    let _ = tracing_subscriber::fmt()
        .with_level(*display_level)
        .with_target(false)
        .with_max_level(level_filter)
        .try_init();
}

pub fn trace<T: Display>(prefix: Option<&str>, msg: T) {
    let prefix = prefix.unwrap_or("🐾");
    trace!("{prefix} {msg}");
}

pub fn debug<T: Display>(prefix: Option<&str>, msg: T) {
    let prefix = prefix.unwrap_or("🐞");
    debug!("{prefix} {msg}");
}

pub fn info<T: Display>(prefix: Option<&str>, msg: T) {
    let prefix = prefix.unwrap_or("📢");
    info!("{prefix} {msg}");
}

pub fn warn<T: Display>(prefix: Option<&str>, msg: T) {
    let prefix = prefix.unwrap_or("⚠️");
    warn!("{prefix} {msg}");
}

pub fn error<T: Display>(prefix: Option<&str>, msg: T) {
    let prefix = prefix.unwrap_or("🚨");
    if backtrace_enabled() {
        error!("{prefix} {msg}\n{:?}", Backtrace::new());
    } else {
        error!("{prefix} {msg}");
    }
}

pub fn panic<T: Display>(prefix: Option<&str>, msg: T) -> ! {
    let prefix = prefix.unwrap_or("☠️");
    error!("{prefix} {msg}");
    panic!("{prefix} {msg}")
}

fn backtrace_enabled() -> bool {
    std::env::var("RUST_BACKTRACE").is_ok_and(|var| var == "1" || var == "full")
}
