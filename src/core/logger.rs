//! Main logger implementation

use super::{
    channel::Channels,
    context::BoundContext,
    error::LoggerError,
    fanout::FanOut,
    fields::{FieldValue, LogFields},
    flags::OutputFlags,
    formatter::Formatter,
    global,
    log_entry::{CallSite, LogEntry},
    log_level::{LevelMask, LogLevel, SeverityGate},
    sink::{sink_handle, Sink, SinkHandle},
};
use crate::formatters::{JsonFormatter, PlainFormatter};
use crate::sinks::{ConsoleSink, PlatformSystemLog, Stream, SystemLogConnector};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Exit status used when a Fatal call terminates the process.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Prefix put in front of every line of the fallback logger.
const UNINITIALIZED_NOTICE: &str = "ERROR: Logging before logger init.\n";

/// Called with [`FATAL_EXIT_CODE`] after a Fatal line has been written and
/// the logger closed. Production loggers exit the process; tests can
/// install a hook that records the call instead.
pub type Terminator = Arc<dyn Fn(i32) + Send + Sync>;

/// Lifecycle of a logger: `Uninitialized -> Initialized -> Closed`.
///
/// Only the process-wide fallback is ever `Uninitialized`. Closed is
/// terminal; lines emitted after close are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Closed,
}

struct LoggerState {
    lifecycle: Lifecycle,
    channels: Channels,
    closers: Vec<SinkHandle>,
}

pub struct Logger {
    /// Serializes writes, flag changes and shutdown
    state: Mutex<LoggerState>,
    gate: RwLock<SeverityGate>,
    flags: RwLock<OutputFlags>,
    formatter: Arc<dyn Formatter>,
    context: BoundContext,
    terminator: Terminator,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_fanout_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(LogLevel::Debug)
    ///     .flags(OutputFlags::DISABLED)
    ///     .detached()
    ///     .build();
    /// logger.debug("ready");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Plain logger writing to stdout/stderr.
    #[track_caller]
    pub fn console() -> Arc<Logger> {
        Self::builder().build()
    }

    /// Logger that also writes to the platform system log under `name`.
    #[track_caller]
    pub fn system_log(name: impl Into<String>) -> Arc<Logger> {
        Self::builder().name(name).system_log(true).build()
    }

    /// Console logger producing one JSON object per line.
    #[track_caller]
    pub fn json() -> Arc<Logger> {
        Self::builder().formatter(JsonFormatter::new()).build()
    }

    /// Console logger with colored level prefixes.
    #[cfg(feature = "console")]
    #[track_caller]
    pub fn colorized() -> Arc<Logger> {
        Self::builder()
            .formatter(crate::formatters::ColorizedFormatter::new())
            .build()
    }

    /// Plain logger writing to `sink` in addition to the console streams.
    #[track_caller]
    pub fn with_sink<S: Sink + 'static>(sink: S) -> Arc<Logger> {
        Self::builder().writer(sink).build()
    }

    /// The stderr-only logger used before anything else is installed.
    pub(crate) fn fallback() -> Arc<Logger> {
        let stderr = sink_handle(ConsoleSink::stderr());
        let channels = Channels::build(
            |_| FanOut::new(vec![Arc::clone(&stderr)]),
            |level| format!("{}{}", UNINITIALIZED_NOTICE, level.tag()),
            OutputFlags::DATE | OutputFlags::MICROSECONDS | OutputFlags::SHORT_FILE,
        );

        Arc::new(Logger {
            state: Mutex::new(LoggerState {
                lifecycle: Lifecycle::Uninitialized,
                channels,
                closers: Vec::new(),
            }),
            gate: RwLock::new(SeverityGate::default()),
            flags: RwLock::new(OutputFlags::STD),
            formatter: Arc::new(PlainFormatter::new()),
            context: BoundContext::new(),
            terminator: default_terminator(),
        })
    }

    pub fn set_level(&self, level: LogLevel) {
        self.set_gate(SeverityGate::Threshold(level));
    }

    pub fn set_level_mask(&self, mask: LevelMask) {
        self.set_gate(SeverityGate::Mask(mask));
    }

    pub fn set_gate(&self, gate: SeverityGate) {
        *self.gate.write() = gate;
    }

    pub fn gate(&self) -> SeverityGate {
        *self.gate.read()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.gate.read().enabled(level)
    }

    /// Set the header flags.
    ///
    /// The formatter always sees the new value. The channels only pick it
    /// up when the formatter does not force its own flags.
    pub fn set_flags(&self, flags: OutputFlags) {
        if self.formatter.channel_flags().is_none() {
            self.state.lock().channels.set_flags(flags);
        }
        *self.flags.write() = flags;
    }

    pub fn flags(&self) -> OutputFlags {
        *self.flags.read()
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// Attach fields to exactly one call.
    ///
    /// The returned scope is consumed by its emit method, so the fields
    /// cannot leak into a later call.
    ///
    /// ```
    /// use rust_fanout_logger::prelude::*;
    ///
    /// let logger = Logger::builder().detached().build();
    /// logger.with(fields! { "user_id" => 42 }).info("signed in");
    /// logger.info("no fields here");
    /// ```
    pub fn with(self: &Arc<Self>, fields: LogFields) -> FieldScope {
        FieldScope {
            logger: Arc::clone(self),
            fields,
        }
    }

    /// Bind fields that are merged into every following call until
    /// replaced by the next `bind_context`.
    pub fn bind_context(&self, fields: LogFields) -> &Self {
        self.context.bind(fields);
        self
    }

    pub fn clear_context(&self) {
        self.context.clear();
    }

    pub fn context(&self) -> Arc<LogFields> {
        self.context.snapshot()
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Debug, LogFields::new(), message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Info, LogFields::new(), message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Warning, LogFields::new(), message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(LogLevel::Error, LogFields::new(), message.to_string(), CallSite::caller());
    }

    /// Write at Fatal, close the logger, then terminate.
    ///
    /// The terminate hook runs even when the gate suppresses the line.
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.emit_fatal(LogFields::new(), message.to_string(), CallSite::caller());
    }

    /// Write at Panic, close the logger and hand back the panic value.
    ///
    /// Nothing unwinds here; the caller decides what to do with the error,
    /// typically `return Err(logger.panic("..").into())`.
    #[track_caller]
    #[must_use = "the returned error carries the panic to the caller"]
    pub fn panic(&self, message: impl fmt::Display) -> LoggerError {
        self.emit_panic(LogFields::new(), message.to_string(), CallSite::caller())
    }

    fn emit_fatal(&self, fields: LogFields, message: String, call_site: CallSite) {
        self.emit(LogLevel::Fatal, fields, message, call_site);
        self.close();
        (self.terminator)(FATAL_EXIT_CODE);
    }

    fn emit_panic(&self, fields: LogFields, message: String, call_site: CallSite) -> LoggerError {
        self.emit(LogLevel::Panic, fields, message.clone(), call_site);
        self.close();
        LoggerError::panic(message)
    }

    /// Gate, merge bound context, format and write one line.
    pub(crate) fn emit(
        &self,
        level: LogLevel,
        one_shot: LogFields,
        message: String,
        call_site: CallSite,
    ) {
        if !self.is_enabled(level) {
            return;
        }

        let fields = self.context.merge_with(one_shot);
        let entry = LogEntry::new(level, message)
            .with_fields(fields)
            .with_call_site(call_site);
        let payload = self.formatter.output(self.flags(), &entry);

        let state = self.state.lock();
        if state.lifecycle == Lifecycle::Closed {
            eprintln!(
                "[LOGGER ERROR] Dropped {} line written after close: {}",
                level.name(),
                entry.message
            );
            return;
        }
        state.channels.get(level).output(&entry, &payload);
    }

    pub fn flush(&self) {
        self.state.lock().channels.flush();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lock().lifecycle
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle() == Lifecycle::Closed
    }

    /// Flush every channel and close the sinks this logger owns.
    ///
    /// Close failures are reported to stderr with the failing sink's name.
    /// Closing a closed or never-initialized logger does nothing.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.lifecycle != Lifecycle::Initialized {
            return;
        }

        state.channels.flush();
        for sink in state.closers.drain(..) {
            let mut sink = sink.lock();
            if let Err(e) = sink.close() {
                eprintln!("[LOGGER ERROR] Failed to close log sink '{}': {}", sink.name(), e);
            }
        }
        state.lifecycle = Lifecycle::Closed;
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("formatter", &self.formatter.name())
            .field("gate", &self.gate())
            .field("flags", &self.flags())
            .field("lifecycle", &self.lifecycle())
            .finish()
    }
}

fn default_terminator() -> Terminator {
    Arc::new(|code| std::process::exit(code))
}

/// Fields attached to a single call.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::prelude::*;
///
/// let logger = Logger::builder().detached().build();
///
/// logger.with(LogFields::new())
///     .field("request_id", "abc-123")
///     .field("latency_ms", 42)
///     .info("request processed");
/// ```
#[must_use = "fields are only written by one of the emit methods"]
pub struct FieldScope {
    logger: Arc<Logger>,
    fields: LogFields,
}

impl FieldScope {
    /// Merge more fields into this scope, later values winning.
    pub fn with(mut self, fields: LogFields) -> Self {
        self.fields = self.fields.add(fields);
        self
    }

    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    pub fn fields(&self) -> &LogFields {
        &self.fields
    }

    #[track_caller]
    pub fn debug(self, message: impl fmt::Display) {
        self.logger
            .emit(LogLevel::Debug, self.fields, message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn info(self, message: impl fmt::Display) {
        self.logger
            .emit(LogLevel::Info, self.fields, message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn warning(self, message: impl fmt::Display) {
        self.logger
            .emit(LogLevel::Warning, self.fields, message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn error(self, message: impl fmt::Display) {
        self.logger
            .emit(LogLevel::Error, self.fields, message.to_string(), CallSite::caller());
    }

    #[track_caller]
    pub fn fatal(self, message: impl fmt::Display) {
        self.logger
            .emit_fatal(self.fields, message.to_string(), CallSite::caller());
    }

    #[track_caller]
    #[must_use = "the returned error carries the panic to the caller"]
    pub fn panic(self, message: impl fmt::Display) -> LoggerError {
        self.logger
            .emit_panic(self.fields, message.to_string(), CallSite::caller())
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Every level gets an ordered list of destinations:
/// 1. the explicit writer, if one was given
/// 2. the system-log sink for that level, if requested and available
/// 3. stdout (Debug, Info, Warning) or stderr (Error, Panic, Fatal)
///
/// # Example
/// ```
/// use rust_fanout_logger::prelude::*;
///
/// let memory = MemorySink::new();
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .writer(memory.clone())
///     .formatter(JsonFormatter::new())
///     .detached()
///     .build();
///
/// logger.debug("hello");
/// assert!(memory.contents().contains("\"msg\":\"hello\""));
/// ```
pub struct LoggerBuilder {
    name: String,
    system_log: bool,
    connector: Arc<dyn SystemLogConnector>,
    writer: Option<SinkHandle>,
    formatter: Arc<dyn Formatter>,
    gate: SeverityGate,
    flags: OutputFlags,
    context: LogFields,
    terminator: Terminator,
    offer_as_default: bool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::new(),
            system_log: false,
            connector: Arc::new(PlatformSystemLog),
            writer: None,
            formatter: Arc::new(PlainFormatter::new()),
            gate: SeverityGate::default(),
            flags: OutputFlags::STD,
            context: LogFields::new(),
            terminator: default_terminator(),
            offer_as_default: true,
        }
    }

    /// Source name used when attaching the system log
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach the platform system log to every level
    #[must_use = "builder methods return a new value"]
    pub fn system_log(mut self, enabled: bool) -> Self {
        self.system_log = enabled;
        self
    }

    /// Replace the collaborator that opens system-log sinks
    #[must_use = "builder methods return a new value"]
    pub fn system_log_connector<C: SystemLogConnector + 'static>(mut self, connector: C) -> Self {
        self.connector = Arc::new(connector);
        self
    }

    /// Explicit destination written ahead of every other sink
    #[must_use = "builder methods return a new value"]
    pub fn writer<S: Sink + 'static>(self, sink: S) -> Self {
        self.writer_handle(sink_handle(sink))
    }

    /// Explicit destination given as an already shared handle
    #[must_use = "builder methods return a new value"]
    pub fn writer_handle(mut self, sink: SinkHandle) -> Self {
        self.writer = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Shared formatter instance
    #[must_use = "builder methods return a new value"]
    pub fn formatter_arc(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set an ordered severity threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.gate = SeverityGate::Threshold(level);
        self
    }

    /// Set an explicit mask of enabled levels
    #[must_use = "builder methods return a new value"]
    pub fn level_mask(mut self, mask: LevelMask) -> Self {
        self.gate = SeverityGate::Mask(mask);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn gate(mut self, gate: SeverityGate) -> Self {
        self.gate = gate;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: OutputFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Fields bound to the logger from the start
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, fields: LogFields) -> Self {
        self.context = fields;
        self
    }

    /// Replace the action run after a Fatal line, normally process exit
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal<F>(mut self, terminate: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.terminator = Arc::new(terminate);
        self
    }

    /// Do not offer the new logger as the process-wide default
    #[must_use = "builder methods return a new value"]
    pub fn detached(mut self) -> Self {
        self.offer_as_default = false;
        self
    }

    /// Build the Logger
    ///
    /// A system log that cannot be opened does not fail the build: the
    /// error is written once through the new logger at Error severity.
    /// Unless [`detached`](Self::detached) was called, the first logger
    /// built in the process becomes the process-wide default.
    #[track_caller]
    pub fn build(self) -> Arc<Logger> {
        let mut system_sinks: [Option<SinkHandle>; 6] = Default::default();
        let mut acquisition_error = None;
        if self.system_log {
            match self.connector.connect_all(&self.name) {
                Ok(sinks) => {
                    for (level, sink) in sinks {
                        system_sinks[level as usize] = Some(sink);
                    }
                }
                Err(e) => acquisition_error = Some(e),
            }
        }

        let stdout = sink_handle(ConsoleSink::stdout());
        let stderr = sink_handle(ConsoleSink::stderr());

        let mut closers: Vec<SinkHandle> = Vec::new();
        for sink in self.writer.iter().chain(system_sinks.iter().flatten()) {
            if sink.lock().is_closeable() {
                closers.push(Arc::clone(sink));
            }
        }

        let formatter = self.formatter;
        let channel_flags = formatter.channel_flags().unwrap_or(self.flags);
        let channels = Channels::build(
            |level| {
                let mut sinks = Vec::with_capacity(3);
                if let Some(ref writer) = self.writer {
                    sinks.push(Arc::clone(writer));
                }
                if let Some(ref system) = system_sinks[level as usize] {
                    sinks.push(Arc::clone(system));
                }
                // Last resort; service processes may have no usable console.
                sinks.push(match Stream::for_level(level) {
                    Stream::Stdout => Arc::clone(&stdout),
                    Stream::Stderr => Arc::clone(&stderr),
                });
                FanOut::new(sinks)
            },
            |level| {
                formatter
                    .channel_prefix(level)
                    .unwrap_or_else(|| level.tag().to_string())
            },
            channel_flags,
        );

        let context = BoundContext::new();
        context.bind(self.context);

        let logger = Arc::new(Logger {
            state: Mutex::new(LoggerState {
                lifecycle: Lifecycle::Initialized,
                channels,
                closers,
            }),
            gate: RwLock::new(self.gate),
            flags: RwLock::new(self.flags),
            formatter,
            context,
            terminator: self.terminator,
        });

        if let Some(e) = acquisition_error {
            logger.emit(
                LogLevel::Error,
                LogFields::new(),
                e.to_string(),
                CallSite::caller(),
            );
        }

        if self.offer_as_default {
            global::install(&logger);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
