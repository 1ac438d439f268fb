//! Error types for the feed → series → chart pipeline.

use thiserror::Error;

/// Result type alias for SWMA operations
pub type Result<T> = std::result::Result<T, SwmaError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for SWMA operations
///
/// None of these are caught or retried inside a pipeline run; they travel
/// unchanged to whoever invoked the tool.
#[derive(Error, Debug)]
pub enum SwmaError {
    /// Endpoint unreachable or answered with a non-success status
    #[error("Network error: {message}")]
    Network {
        /// What went wrong
        message: String,
        /// HTTP status, when the server answered at all
        status: Option<u16>,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Response body is not valid JSON, or not shaped like any known feed
    #[error("Format error: {message}")]
    Format {
        /// What went wrong
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Expected field or column absent from a feed record
    #[error("Schema error in feed '{feed}' at '{field}': {message}")]
    Schema {
        /// Feed the record came from
        feed: String,
        /// Field name or position that failed
        field: String,
        /// What went wrong
        message: String,
    },

    /// No data points to derive axis limits or a category split from
    #[error("Empty series: {what}")]
    EmptySeries {
        /// Which series was empty
        what: String,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart drawing and image encoding errors
    #[error("Graph error: {message}")]
    Graph {
        /// What went wrong
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for user input
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
        /// Offending field, if any
        field: Option<String>,
    },
}

impl SwmaError {
    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            status: None,
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error for a non-success HTTP status
    pub fn http_status(url: &str, status: u16) -> Self {
        Self::Network {
            message: format!("{url} answered with HTTP {status}"),
            status: Some(status),
            source: None,
        }
    }

    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new format error with source
    pub fn format_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Format {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new schema error
    pub fn schema(
        feed: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Schema {
            feed: feed.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a new empty-series error
    pub fn empty_series(what: impl Into<String>) -> Self {
        Self::EmptySeries { what: what.into() }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status attached to a network error
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to SwmaError
impl From<reqwest::Error> for SwmaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::format_with_source("Response body could not be decoded", err);
        }
        let status = err.status().map(|s| s.as_u16());
        let message = if err.is_timeout() {
            "Request timeout".to_string()
        } else if err.is_connect() {
            "Connection failed".to_string()
        } else if let Some(code) = status {
            format!("HTTP error: {code}")
        } else {
            "Network request failed".to_string()
        };
        Self::Network {
            message,
            status,
            source: Some(Box::new(err)),
        }
    }
}

/// Convert from serde_json::Error to SwmaError
impl From<serde_json::Error> for SwmaError {
    fn from(err: serde_json::Error) -> Self {
        Self::format_with_source("Invalid JSON", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to SwmaError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for SwmaError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
