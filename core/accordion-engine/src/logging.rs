//! FILENAME: core/accordion-engine/src/logging.rs
// PURPOSE: Category-tagged logging on top of the `log` facade.
//
// Lines are emitted as `CATEGORY|message` under a single target so a host can
// route every accordion diagnostic with one filter.

#[doc(hidden)]
pub use log;

/// Log target shared by the engine and the behavior crate.
pub const LOG_TARGET: &str = "views_accordion_table";

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::debug!(target: $crate::logging::LOG_TARGET, "{}|{}", $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::info!(target: $crate::logging::LOG_TARGET, "{}|{}", $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::warn!(target: $crate::logging::LOG_TARGET, "{}|{}", $cat, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::error!(target: $crate::logging::LOG_TARGET, "{}|{}", $cat, format_args!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_warn;`
pub use crate::log_debug;
pub use crate::log_error;
pub use crate::log_info;
pub use crate::log_warn;
