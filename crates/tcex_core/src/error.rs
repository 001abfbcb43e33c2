//! Error types for the tcex export services.
//!
//! The read path (schema listing, table dumping) converts these into empty
//! results at the service boundary; the write path propagates them.

use thiserror::Error;

/// Main error type for the export services.
#[derive(Debug, Error)]
pub enum TcexError {
    /// Database connection failed or was lost.
    #[error("Connection error: {message}")]
    Connection {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution error with PostgreSQL-specific details.
    #[error("{message}")]
    Query {
        /// PostgreSQL error message.
        message: String,
        /// Additional detail from PostgreSQL.
        detail: Option<String>,
        /// PostgreSQL hint.
        hint: Option<String>,
        /// Position in query (1-indexed).
        position: Option<usize>,
        /// PostgreSQL error code (e.g., "42P01").
        code: Option<String>,
    },

    /// CSV formatting or file IO error.
    #[error("CSV error: {message}")]
    Csv {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid or incomplete configuration.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
    },
}

impl TcexError {
    /// Create a new connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection { message: message.into(), source: None }
    }

    /// Create a new connection error with source.
    pub fn connection_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Create a new CSV error.
    pub fn csv(message: impl Into<String>) -> Self {
        Self::Csv { message: message.into(), source: None }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Check if this error came from the database layer.
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Query { .. })
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "Connection",
            Self::Query { .. } => "Query",
            Self::Csv { .. } => "Csv",
            Self::Config { .. } => "Config",
        }
    }

    /// Get the PostgreSQL error code (if applicable).
    pub fn pg_code(&self) -> Option<&str> {
        match self {
            Self::Query { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Convert from tokio_postgres::Error to TcexError.
impl From<tokio_postgres::Error> for TcexError {
    fn from(err: tokio_postgres::Error) -> Self {
        // Try to extract PostgreSQL error details
        if let Some(db_err) = err.as_db_error() {
            let message = db_err.message().to_string();
            let detail = db_err.detail().map(String::from);
            let hint = db_err.hint().map(String::from);
            let position = db_err.position().and_then(|p| match p {
                tokio_postgres::error::ErrorPosition::Original(pos) => Some(*pos as usize),
                tokio_postgres::error::ErrorPosition::Internal { .. } => None,
            });
            let code = db_err.code().code().to_string();

            // Connection exceptions (08xxx) and authentication failures (28xxx)
            // surface as connection errors; everything else is a query error.
            return if code.starts_with("08") || code.starts_with("28") {
                TcexError::Connection { message, source: Some(Box::new(err)) }
            } else {
                TcexError::Query { message, detail, hint, position, code: Some(code) }
            };
        }

        if err.is_closed() {
            return TcexError::Connection {
                message: "Connection closed".to_string(),
                source: Some(Box::new(err)),
            };
        }

        TcexError::Connection { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Convert from csv::Error to TcexError.
impl From<csv::Error> for TcexError {
    fn from(err: csv::Error) -> Self {
        TcexError::Csv { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Convert from std::io::Error to TcexError.
impl From<std::io::Error> for TcexError {
    fn from(err: std::io::Error) -> Self {
        TcexError::Csv { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_category() {
        assert_eq!(TcexError::connection("down").category(), "Connection");
        assert_eq!(TcexError::csv("bad field").category(), "Csv");
        assert_eq!(TcexError::config("missing key").category(), "Config");
    }

    #[test]
    fn test_io_error_maps_to_csv() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TcexError::from(io);
        assert_eq!(err.category(), "Csv");
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_pg_code_only_on_query_errors() {
        let err = TcexError::Query {
            message: "relation \"missing\" does not exist".to_string(),
            detail: None,
            hint: None,
            position: Some(15),
            code: Some("42P01".to_string()),
        };
        assert_eq!(err.pg_code(), Some("42P01"));
        assert!(err.is_database());
        assert_eq!(TcexError::connection("x").pg_code(), None);
    }
}
