//! Process-wide default logger
//!
//! Until a logger is built, the default is a fallback that writes every
//! enabled line to stderr behind an `ERROR: Logging before logger init.`
//! notice. The first logger built without [`LoggerBuilder::detached`]
//! replaces it; later loggers leave the default alone.
//!
//! The free functions here forward to the current default, so library code
//! can log without carrying a logger around:
//!
//! ```
//! use rust_fanout_logger::{global, LogFields};
//!
//! global::info("starting up");
//! global::with(LogFields::new().with("attempt", 2)).warning("retrying");
//! ```
//!
//! [`LoggerBuilder::detached`]: super::LoggerBuilder::detached

use super::error::LoggerError;
use super::fields::LogFields;
use super::flags::OutputFlags;
use super::log_level::{LevelMask, LogLevel};
use super::logger::{FieldScope, Logger};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};

struct DefaultSlot {
    logger: Arc<Logger>,
    installed: bool,
}

static DEFAULT: OnceLock<RwLock<DefaultSlot>> = OnceLock::new();

fn slot() -> &'static RwLock<DefaultSlot> {
    DEFAULT.get_or_init(|| {
        RwLock::new(DefaultSlot {
            logger: Logger::fallback(),
            installed: false,
        })
    })
}

/// The current default logger.
pub fn logger() -> Arc<Logger> {
    Arc::clone(&slot().read().logger)
}

/// Whether a built logger has replaced the fallback.
pub fn is_installed() -> bool {
    slot().read().installed
}

/// Make `logger` the default unless one was already installed.
///
/// Returns `true` when `logger` became the default.
pub fn install(logger: &Arc<Logger>) -> bool {
    let mut slot = slot().write();
    if slot.installed {
        return false;
    }
    slot.logger = Arc::clone(logger);
    slot.installed = true;
    true
}

/// Put the fallback back in place. Test helper.
#[doc(hidden)]
pub fn reset() {
    let mut slot = slot().write();
    slot.logger = Logger::fallback();
    slot.installed = false;
}

#[track_caller]
pub fn debug(message: impl fmt::Display) {
    logger().debug(message);
}

#[track_caller]
pub fn info(message: impl fmt::Display) {
    logger().info(message);
}

#[track_caller]
pub fn warning(message: impl fmt::Display) {
    logger().warning(message);
}

#[track_caller]
pub fn error(message: impl fmt::Display) {
    logger().error(message);
}

#[track_caller]
pub fn fatal(message: impl fmt::Display) {
    logger().fatal(message);
}

#[track_caller]
#[must_use = "the returned error carries the panic to the caller"]
pub fn panic(message: impl fmt::Display) -> LoggerError {
    logger().panic(message)
}

pub fn with(fields: LogFields) -> FieldScope {
    logger().with(fields)
}

pub fn bind_context(fields: LogFields) {
    logger().bind_context(fields);
}

pub fn set_level(level: LogLevel) {
    logger().set_level(level);
}

pub fn set_level_mask(mask: LevelMask) {
    logger().set_level_mask(mask);
}

pub fn set_flags(flags: OutputFlags) {
    logger().set_flags(flags);
}

pub fn close() {
    logger().close();
}
