//! Integration tests for the fan-out logger
//!
//! These tests verify:
//! - Log injection prevention
//! - Per-level prefixes and gating
//! - One-shot and bound fields
//! - Fatal and Panic control flow
//! - Fan-out to several destinations and shutdown
//! - Thread safety

use parking_lot::Mutex;
use rust_fanout_logger::core::{Lifecycle, SinkHandle};
use rust_fanout_logger::prelude::*;
use rust_fanout_logger::sinks::SystemLogConnector;
use rust_fanout_logger::{fields, info};
use std::fs;
use std::io;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn capture(level: LogLevel) -> (Arc<Logger>, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .writer(sink.clone())
        .level(level)
        .flags(OutputFlags::DISABLED)
        .on_fatal(|_| {})
        .detached()
        .build();
    (logger, sink)
}

#[test]
fn test_log_injection_prevention() {
    let (logger, sink) = capture(LogLevel::Info);

    let malicious_message = "User login\nERROR: Fake error injected\nINFO : Continuation";
    logger.info(malicious_message);

    let content = sink.contents();
    assert!(content.contains("\\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_debug_threshold_emits_every_level_once() {
    let (logger, sink) = capture(LogLevel::Debug);

    logger.debug("debug test");
    logger.info("info test");
    logger.warning("warning test");
    logger.error("error test");

    assert_eq!(
        sink.lines(),
        vec![
            "DEBUG: debug test",
            "INFO : info test",
            "WARN : warning test",
            "ERROR: error test",
        ]
    );
}

#[test]
fn test_default_threshold_drops_debug() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .writer(sink.clone())
        .flags(OutputFlags::DISABLED)
        .detached()
        .build();

    logger.debug("hidden");
    logger.info("shown");

    assert_eq!(sink.lines(), vec!["INFO : shown"]);
}

#[test]
fn test_fields_rendered_sorted_before_message() {
    let (logger, sink) = capture(LogLevel::Debug);

    logger
        .with(fields! {
            "string" => "test",
            "int" => 7,
            "bool" => true,
            "second" => 2,
        })
        .info("check field");

    assert_eq!(
        sink.lines(),
        vec!["INFO : bool=true int=7 second=2 string=test check field"]
    );
}

#[test]
fn test_one_shot_fields_apply_to_one_call_only() {
    let (logger, sink) = capture(LogLevel::Info);

    logger.bind_context(fields! { "service" => "api" });
    logger.with(fields! { "request" => "r-1" }).info("first");
    logger.info("second");
    logger.with(fields! { "service" => "override" }).info("third");

    assert_eq!(
        sink.lines(),
        vec![
            "INFO : request=r-1 service=api first",
            "INFO : service=api second",
            "INFO : service=override third",
        ]
    );
    assert_eq!(logger.context().len(), 1);
}

#[test]
fn test_fatal_line_written_before_termination() {
    let sink = MemorySink::new();
    let observed = Arc::new(Mutex::new(None));

    let hook_observed = Arc::clone(&observed);
    let hook_sink = sink.clone();
    let logger = Logger::builder()
        .writer(sink.clone())
        .flags(OutputFlags::DISABLED)
        .on_fatal(move |code| {
            *hook_observed.lock() = Some((code, hook_sink.lines()));
        })
        .detached()
        .build();

    logger.with(fields! { "disk" => "sda" }).fatal("unrecoverable");

    let (code, lines) = observed.lock().take().expect("terminator was called");
    assert_eq!(code, 1);
    assert_eq!(lines, vec!["FATAL: disk=sda unrecoverable"]);
    assert_eq!(logger.lifecycle(), Lifecycle::Closed);
}

#[test]
fn test_panic_surfaces_as_error_value() {
    fn startup(logger: &Logger) -> Result<()> {
        Err(logger.panic("config missing"))
    }

    let (logger, sink) = capture(LogLevel::Info);
    let err = startup(&logger).unwrap_err();

    assert!(err.is_panic());
    assert_eq!(err.to_string(), "panic: config missing");
    assert_eq!(sink.lines(), vec!["PANIC: config missing"]);
}

#[test]
fn test_fan_out_same_line_on_every_destination() {
    let first = MemorySink::new();
    let second = MemorySink::new();

    struct Pair(MemorySink, MemorySink);
    impl Sink for Pair {
        fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
            self.0.write_line(line)?;
            self.1.write_line(line)
        }
        fn name(&self) -> &str {
            "pair"
        }
    }

    let logger = Logger::builder()
        .writer(Pair(first.clone(), second.clone()))
        .formatter(JsonFormatter::new())
        .detached()
        .build();
    logger.warning("replicated");

    assert_eq!(first.contents(), second.contents());
    assert!(first.contents().contains("\"msg\":\"replicated\""));
}

struct RecordingConnector {
    sinks: Mutex<Vec<(LogLevel, MemorySink)>>,
    closed: Arc<AtomicUsize>,
}

struct ClosingMemory {
    inner: MemorySink,
    closed: Arc<AtomicUsize>,
}

impl Sink for ClosingMemory {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.inner.write_line(line)
    }

    fn name(&self) -> &str {
        "closing-memory"
    }

    fn is_closeable(&self) -> bool {
        true
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl SystemLogConnector for RecordingConnector {
    fn connect(&self, _source: &str, level: LogLevel) -> Result<SinkHandle> {
        let inner = MemorySink::new();
        self.sinks.lock().push((level, inner.clone()));
        Ok(rust_fanout_logger::core::sink_handle(ClosingMemory {
            inner,
            closed: Arc::clone(&self.closed),
        }))
    }
}

#[test]
fn test_system_log_sinks_closed_on_shutdown() {
    let closed = Arc::new(AtomicUsize::new(0));
    let connector = RecordingConnector {
        sinks: Mutex::new(Vec::new()),
        closed: Arc::clone(&closed),
    };

    let logger = Logger::builder()
        .name("orders")
        .system_log(true)
        .system_log_connector(connector)
        .flags(OutputFlags::DISABLED)
        .detached()
        .build();

    logger.error("payment failed");
    logger.close();

    assert_eq!(closed.load(Ordering::SeqCst), LogLevel::ALL.len());
    logger.close();
    assert_eq!(closed.load(Ordering::SeqCst), LogLevel::ALL.len());
}

#[test]
fn test_unavailable_system_log_reported_at_error() {
    struct Unavailable;
    impl SystemLogConnector for Unavailable {
        fn connect(&self, _source: &str, _level: LogLevel) -> Result<SinkHandle> {
            Err(LoggerError::sink_acquisition("system log", "access denied"))
        }
    }

    let sink = MemorySink::new();
    let logger = Logger::builder()
        .system_log(true)
        .system_log_connector(Unavailable)
        .writer(sink.clone())
        .flags(OutputFlags::DISABLED)
        .detached()
        .build();

    assert_eq!(
        sink.lines(),
        vec!["ERROR: Failed to acquire system log sink: access denied"]
    );
    assert_eq!(logger.lifecycle(), Lifecycle::Initialized);
}

#[test]
fn test_json_output_key_order() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .writer(sink.clone())
        .formatter(JsonFormatter::new())
        .flags(OutputFlags::DATE | OutputFlags::TIME | OutputFlags::UTC)
        .detached()
        .build();

    logger.with(fields! { "b" => 2, "a" => 1 }).info("ordered");

    let line = sink.lines().remove(0);
    assert!(line.starts_with("{\"time\":\""), "got {}", line);
    let tail = line
        .split_once("\",\"level\"")
        .map(|(_, rest)| rest)
        .expect("level follows time");
    assert_eq!(tail, ":\"info\",\"msg\":\"ordered\",\"a\":1,\"b\":2}");
}

#[test]
fn test_file_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .writer(FileSink::new(&log_file).expect("Failed to open log file"))
        .flags(OutputFlags::SHORT_FILE)
        .detached()
        .build();

    info!(logger, "written to {}", "disk");
    logger.close();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.starts_with("INFO : integration_tests.rs:"), "got {}", content);
    assert!(content.ends_with(": written to disk\n"));
}

#[test]
fn test_header_layout_with_msg_prefix() {
    let (logger, sink) = capture(LogLevel::Info);
    logger.set_flags(OutputFlags::SHORT_FILE | OutputFlags::MSG_PREFIX);

    logger.warning("moved prefix");

    let line = sink.lines().remove(0);
    assert!(line.starts_with("integration_tests.rs:"), "got {}", line);
    assert!(line.ends_with(": WARN : moved prefix"));
}

#[test]
fn test_use_after_close_is_dropped() {
    let (logger, sink) = capture(LogLevel::Info);
    logger.info("before");
    logger.close();
    logger.info("after");
    logger.with(fields! { "k" => 1 }).error("after");

    assert_eq!(sink.lines(), vec!["INFO : before"]);
    assert!(logger.is_closed());
}

#[test]
fn test_failing_destination_does_not_block_others() {
    struct Broken;
    impl Sink for Broken {
        fn write_line(&mut self, _line: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
        fn name(&self) -> &str {
            "broken"
        }
    }

    let exit = Arc::new(AtomicI32::new(0));
    let hook = Arc::clone(&exit);
    let logger = Logger::builder()
        .writer(Broken)
        .on_fatal(move |code| hook.store(code, Ordering::SeqCst))
        .detached()
        .build();

    logger.info("still delivered to stdout");
    logger.fatal("still terminates");
    assert_eq!(exit.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_lines_never_interleave() {
    let (logger, sink) = capture(LogLevel::Info);
    let threads = 8;
    let per_thread = 200;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..per_thread {
                    logger
                        .with(fields! { "thread" => t })
                        .info(format!("message {}", i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), threads * per_thread);
    for line in lines {
        assert!(line.starts_with("INFO : thread="), "torn line: {}", line);
        assert_eq!(line.matches("message").count(), 1, "torn line: {}", line);
    }
}
