#![deny(missing_docs)]
//! Logging facade for the storyreel workspace.
//!
//! Widget code logs through the `widget_*` macros, which stamp every
//! record with the shared [`LOG_TARGET`] so one filter covers all crates
//! regardless of which module emitted the line.

/// Log target shared by every crate in the workspace.
pub const LOG_TARGET: &str = "storyreel";

/// Logs a trace-level message under the workspace log target.
#[macro_export]
macro_rules! widget_trace {
    ($($arg:tt)*) => {
        log::trace!(target: $crate::LOG_TARGET, $($arg)*)
    };
}

/// Logs a debug-level message under the workspace log target.
#[macro_export]
macro_rules! widget_debug {
    ($($arg:tt)*) => {
        log::debug!(target: $crate::LOG_TARGET, $($arg)*)
    };
}

/// Logs an info-level message under the workspace log target.
#[macro_export]
macro_rules! widget_info {
    ($($arg:tt)*) => {
        log::info!(target: $crate::LOG_TARGET, $($arg)*)
    };
}

/// Logs a warn-level message under the workspace log target.
#[macro_export]
macro_rules! widget_warn {
    ($($arg:tt)*) => {
        log::warn!(target: $crate::LOG_TARGET, $($arg)*)
    };
}

/// Logs an error-level message under the workspace log target.
#[macro_export]
macro_rules! widget_error {
    ($($arg:tt)*) => {
        log::error!(target: $crate::LOG_TARGET, $($arg)*)
    };
}

/// Installs a plain logger for test runs, restricted to [`LOG_TARGET`]
/// so dependency chatter stays out of test output.
///
/// Tests from several crates may race to install it; later calls lose
/// quietly.
pub fn initialize_for_tests() {
    let level = match cfg!(debug_assertions) {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    };
    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str(LOG_TARGET)
        .build();
    let _ = simplelog::SimpleLogger::init(level, config);
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_initialization_is_tolerated() {
        super::initialize_for_tests();
        super::initialize_for_tests();
        widget_info!("logger ready");
    }
}
