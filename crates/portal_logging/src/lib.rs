#![deny(missing_docs)]
//! Logging for the portal crates: `portal_*` macros over the `log` facade,
//! plus the logger set-up shared by the binary and the test suites.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

#[doc(hidden)]
#[macro_export]
macro_rules! __portal_log {
    ($level:expr, $($arg:tt)+) => {
        log::log!($level, $($arg)+)
    };
}

/// Trace-level message.
#[macro_export]
macro_rules! portal_trace {
    ($($arg:tt)+) => { $crate::__portal_log!(log::Level::Trace, $($arg)+) };
}

/// Debug-level message.
#[macro_export]
macro_rules! portal_debug {
    ($($arg:tt)+) => { $crate::__portal_log!(log::Level::Debug, $($arg)+) };
}

/// Info-level message: requests issued and results received.
#[macro_export]
macro_rules! portal_info {
    ($($arg:tt)+) => { $crate::__portal_log!(log::Level::Info, $($arg)+) };
}

/// Warn-level message: recoverable failures such as a rejected request or an
/// unreadable state file.
#[macro_export]
macro_rules! portal_warn {
    ($($arg:tt)+) => { $crate::__portal_log!(log::Level::Warn, $($arg)+) };
}

/// Error-level message.
#[macro_export]
macro_rules! portal_error {
    ($($arg:tt)+) => { $crate::__portal_log!(log::Level::Error, $($arg)+) };
}

/// Maps a `-v` count to a level filter: info, then debug, then trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// RFC 3339 timestamps; targets shown for errors only.
pub fn logger_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Terminal logger for tests. Later calls are no-ops, so every test may call
/// it.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(level, logger_config(), TerminalMode::Mixed, ColorChoice::Auto);
}
