//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The call site
//! recorded for the line is the macro invocation.
//!
//! # Examples
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//! use rust_fanout_logger::info;
//!
//! let logger = Logger::builder().detached().build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// # let logger = Logger::builder().level(LogLevel::Debug).detached().build();
/// use rust_fanout_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// # let logger = Logger::builder().detached().build();
/// use rust_fanout_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message, close the logger and terminate.
///
/// # Examples
///
/// ```no_run
/// # use rust_fanout_logger::prelude::*;
/// # let logger = Logger::builder().detached().build();
/// use rust_fanout_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
}

/// Log a panic-level message and evaluate to the resulting [`LoggerError`].
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// use rust_fanout_logger::log_panic;
///
/// fn load(logger: &Logger, shards: usize) -> Result<()> {
///     if shards == 0 {
///         return Err(log_panic!(logger, "no shards configured (got {})", shards));
///     }
///     Ok(())
/// }
///
/// let logger = Logger::builder().detached().build();
/// assert!(load(&logger, 0).unwrap_err().is_panic());
/// ```
///
/// [`LoggerError`]: crate::LoggerError
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic(::std::format_args!($($arg)+))
    };
}

/// Build a [`LogFields`] from `key => value` pairs.
///
/// ```
/// use rust_fanout_logger::fields;
///
/// let fields = fields! { "user_id" => 42, "ok" => true };
/// assert_eq!(fields.to_string(), "ok=true user_id=42");
/// ```
///
/// [`LogFields`]: crate::LogFields
#[macro_export]
macro_rules! fields {
    () => {
        $crate::LogFields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::LogFields::new()$(.with($key, $value))+
    };
}
