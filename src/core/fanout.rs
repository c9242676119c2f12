//! Fan-out of one line to several sinks

use super::sink::SinkHandle;

/// Ordered set of sinks that all receive the same line.
///
/// **Per-Sink Isolation**: every destination is written independently and
/// wrapped in catch_unwind. A sink that fails or panics is reported to stderr
/// and the remaining sinks still receive the line. Failed writes are not
/// retried.
#[derive(Clone, Default)]
pub struct FanOut {
    sinks: Vec<SinkHandle>,
}

impl FanOut {
    pub fn new(sinks: Vec<SinkHandle>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn sinks(&self) -> &[SinkHandle] {
        &self.sinks
    }

    /// Write `line` to every sink. Returns the number of sinks that failed.
    pub fn write_line(&self, line: &[u8]) -> usize {
        let mut failures = 0;

        for (idx, sink) in self.sinks.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let mut sink = sink.lock();
                sink.write_line(line)
                    .map_err(|e| (sink.name().to_string(), e))
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err((name, e))) => {
                    eprintln!("[LOGGER ERROR] Sink #{} '{}' failed: {}", idx, name, e);
                    failures += 1;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} panicked: {}. \
                         Other sinks continue to function.",
                        idx, panic_msg
                    );
                    failures += 1;
                }
            }
        }

        failures
    }

    pub fn flush(&self) {
        for sink in &self.sinks {
            let mut sink = sink.lock();
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }
}
