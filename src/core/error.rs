//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A destination such as the system log could not be opened
    #[error("Failed to acquire {sink} sink: {message}")]
    SinkAcquisition { sink: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Unknown severity level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Unknown output flag name
    #[error("Invalid output flag: '{0}'")]
    InvalidFlag(String),

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// Raised by a Panic-level call after its line has been written
    #[error("panic: {message}")]
    Panic { message: String },
}

impl LoggerError {
    /// Create a sink acquisition error
    pub fn sink_acquisition(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkAcquisition {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create the value a Panic-level call hands back to its caller
    pub fn panic(message: impl Into<String>) -> Self {
        LoggerError::Panic {
            message: message.into(),
        }
    }

    /// Whether this is the control-flow value produced by a Panic-level call
    pub fn is_panic(&self) -> bool {
        matches!(self, LoggerError::Panic { .. })
    }
}
