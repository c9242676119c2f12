//! System log sinks
//!
//! On Unix the local syslog daemon is reached over its datagram socket
//! (`/dev/log`, `/var/run/syslog` or `/var/run/log`). Each severity level
//! gets its own sink so the daemon sees the right priority:
//!
//! | level           | syslog severity |
//! |-----------------|-----------------|
//! | Debug           | debug           |
//! | Info            | notice          |
//! | Warning         | warning         |
//! | Error           | err             |
//! | Panic, Fatal    | crit            |
//!
//! Acquiring the system log is a collaborator concern: the logger only asks
//! a [`SystemLogConnector`] for one sink per level and falls back to its
//! other destinations when that fails.

use crate::core::{LogLevel, LoggerError, Result, SinkHandle};

/// Opens one system-log sink per severity level.
pub trait SystemLogConnector: Send + Sync {
    /// Connect the sink for `level`, tagging messages with `source`.
    fn connect(&self, source: &str, level: LogLevel) -> Result<SinkHandle>;

    /// Connect every level at once. Any failure discards the whole set.
    fn connect_all(&self, source: &str) -> Result<Vec<(LogLevel, SinkHandle)>> {
        LogLevel::ALL
            .iter()
            .map(|level| self.connect(source, *level).map(|sink| (*level, sink)))
            .collect()
    }
}

/// The platform's native system log.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformSystemLog;

impl SystemLogConnector for PlatformSystemLog {
    #[cfg(all(unix, feature = "syslog"))]
    fn connect(&self, source: &str, level: LogLevel) -> Result<SinkHandle> {
        let sink = SyslogSink::connect(source, SyslogSeverity::for_level(level))?;
        Ok(crate::core::sink_handle(sink))
    }

    #[cfg(not(all(unix, feature = "syslog")))]
    fn connect(&self, _source: &str, _level: LogLevel) -> Result<SinkHandle> {
        Err(LoggerError::sink_acquisition(
            "system log",
            "no system log is available on this platform",
        ))
    }
}

#[cfg(all(unix, feature = "syslog"))]
pub use unix::{SyslogSeverity, SyslogSink};

#[cfg(all(unix, feature = "syslog"))]
mod unix {
    use super::*;
    use crate::core::Sink;
    use chrono::Local;
    use std::io;
    use std::os::unix::net::UnixDatagram;
    use std::path::Path;

    const SOCKET_PATHS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];
    /// `LOG_USER` facility.
    const FACILITY_USER: u8 = 1 << 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum SyslogSeverity {
        Crit = 2,
        Err = 3,
        Warning = 4,
        Notice = 5,
        Debug = 7,
    }

    impl SyslogSeverity {
        pub fn for_level(level: LogLevel) -> Self {
            match level {
                LogLevel::Debug => SyslogSeverity::Debug,
                LogLevel::Info => SyslogSeverity::Notice,
                LogLevel::Warning => SyslogSeverity::Warning,
                LogLevel::Error => SyslogSeverity::Err,
                LogLevel::Panic | LogLevel::Fatal => SyslogSeverity::Crit,
            }
        }

        pub fn priority(&self) -> u8 {
            FACILITY_USER | *self as u8
        }
    }

    /// Sends each line as one datagram to the local syslog daemon.
    pub struct SyslogSink {
        socket: Option<UnixDatagram>,
        severity: SyslogSeverity,
        tag: String,
        pid: u32,
        name: String,
    }

    impl SyslogSink {
        /// Connect to the first syslog socket that accepts us.
        ///
        /// An empty `source` is replaced by the executable name.
        pub fn connect(source: &str, severity: SyslogSeverity) -> Result<Self> {
            let tag = if source.is_empty() {
                default_tag()
            } else {
                source.to_string()
            };

            let mut last_error = None;
            for path in SOCKET_PATHS {
                match Self::connect_to(Path::new(path)) {
                    Ok(socket) => {
                        return Ok(Self {
                            socket: Some(socket),
                            severity,
                            name: format!("syslog:{}:{:?}", tag, severity),
                            tag,
                            pid: std::process::id(),
                        });
                    }
                    Err(e) => last_error = Some(format!("{}: {}", path, e)),
                }
            }

            Err(LoggerError::sink_acquisition(
                "syslog",
                last_error.unwrap_or_else(|| "no syslog socket found".to_string()),
            ))
        }

        fn connect_to(path: &Path) -> io::Result<UnixDatagram> {
            let socket = UnixDatagram::unbound()?;
            socket.connect(path)?;
            Ok(socket)
        }

        /// `<PRI>Mmm dd hh:mm:ss tag[pid]: message`
        pub(crate) fn frame(&self, line: &[u8]) -> Vec<u8> {
            let message = String::from_utf8_lossy(line);
            let message = message.trim_end_matches('\n');
            format!(
                "<{}>{} {}[{}]: {}\n",
                self.severity.priority(),
                Local::now().format("%b %e %H:%M:%S"),
                self.tag,
                self.pid,
                message
            )
            .into_bytes()
        }
    }

    fn default_tag() -> String {
        std::env::args()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "rust_fanout_logger".to_string())
    }

    impl Sink for SyslogSink {
        fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
            let framed = self.frame(line);
            let socket = self
                .socket
                .as_ref()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "syslog sink closed"))?;
            socket.send(&framed).map(|_| ())
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn is_closeable(&self) -> bool {
            true
        }

        fn close(&mut self) -> io::Result<()> {
            match self.socket.take() {
                Some(socket) => match socket.shutdown(std::net::Shutdown::Both) {
                    Err(e) if e.kind() != io::ErrorKind::NotConnected => Err(e),
                    _ => Ok(()),
                },
                None => Ok(()),
            }
        }
    }

}
