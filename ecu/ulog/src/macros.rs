//! Logging macros
//!
//! Format-style front ends for the process-wide facility. Argument
//! evaluation is lazy: below the lowest active threshold nothing is
//! rendered.

/// Log through the process-wide facility at an explicit level.
#[macro_export]
macro_rules! ulog {
    ($level:expr, $($arg:tt)*) => {
        $crate::log($level, ::core::format_args!($($arg)*))
    };
}

/// Log at TRACE.
#[macro_export]
macro_rules! ulog_trace {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Trace, $($arg)*)
    };
}

/// Log at DEBUG.
#[macro_export]
macro_rules! ulog_debug {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Debug, $($arg)*)
    };
}

/// Log at INFO.
#[macro_export]
macro_rules! ulog_info {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Info, $($arg)*)
    };
}

/// Log at WARNING.
#[macro_export]
macro_rules! ulog_warning {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Warning, $($arg)*)
    };
}

/// Log at ERROR.
#[macro_export]
macro_rules! ulog_error {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Error, $($arg)*)
    };
}

/// Log at CRITICAL.
#[macro_export]
macro_rules! ulog_critical {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Critical, $($arg)*)
    };
}

/// Log at ALWAYS; delivered to every live subscriber.
#[macro_export]
macro_rules! ulog_always {
    ($($arg:tt)*) => {
        $crate::ulog!($crate::Level::Always, $($arg)*)
    };
}
