//! Error types for the TFX transform evaluator.
//!
//! All public APIs return `TfxResult<T>`, with no panics in library code.
//! Construction errors surface once, when a transform tree is built; the
//! per-batch path only propagates failures raised by leaf readers.

use thiserror::Error;

/// Unified error type for all TFX operations.
#[derive(Debug, Error)]
pub enum TfxError {
    /// Wrong number of arguments for a transform function
    #[error("transform function '{function}' expects {expected} argument(s), got {actual}")]
    Arity {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Argument violates the function's contract (literal, multi-value, ...)
    #[error("invalid argument for transform function '{function}': {message}")]
    InvalidArgument { function: String, message: String },

    /// No transform function registered under this name
    #[error("unknown transform function '{0}'")]
    UnknownFunction(String),

    /// Requested column does not exist in the schema or batch
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Column or literal type cannot be read as the requested value type
    #[error("unsupported type in {context}: {data_type}")]
    UnsupportedType { context: String, data_type: String },

    /// Row batch window is inconsistent with its backing data
    #[error("invalid row batch: {0}")]
    InvalidBatch(String),

    /// Configuration value could not be applied
    #[error("config error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Standard I/O error
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Apache Arrow error (RecordBatch operations)
    #[error("arrow error: {source}")]
    Arrow {
        #[from]
        source: arrow::error::ArrowError,
    },
}

impl TfxError {
    /// `InvalidArgument` 생성 헬퍼
    pub fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        TfxError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for all TFX operations.
pub type TfxResult<T> = Result<T, TfxError>;

impl From<serde_json::Error> for TfxError {
    fn from(err: serde_json::Error) -> Self {
        TfxError::Serialization(err.to_string())
    }
}
