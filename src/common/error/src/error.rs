//! Core error types for Strix.

use thiserror::Error;

/// Result type alias using `StrixError`.
pub type StrixResult<T> = std::result::Result<T, StrixError>;

/// Core error type for Strix operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrixError {
    /// Unsupported input layout or exhausted capacity.
    #[error("NotImplemented: {0}")]
    NotImplemented(String),

    /// The entity being registered is already registered.
    #[error("AlreadyExists: {0}")]
    AlreadyExists(String),

    /// The requested entity was never registered.
    #[error("NotFound: {0}")]
    NotFound(String),

    /// An argument is outside the accepted domain.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),

    /// Schema-related error (column missing, wrong type, etc.).
    #[error("SchemaError: {0}")]
    SchemaError(String),

    /// Internal error (bug in Strix or a broken invariant).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Arrow error.
    #[error("ArrowError: {0}")]
    ArrowError(#[from] arrow_schema::ArrowError),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl StrixError {
    /// Create a new `NotImplemented` error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create a new `AlreadyExists` error.
    pub fn already_exists<S: Into<String>>(msg: S) -> Self {
        Self::AlreadyExists(msg.into())
    }

    /// Create a new `NotFound` error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new `InvalidArgument` error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new `SchemaError`.
    pub fn schema_error<S: Into<String>>(msg: S) -> Self {
        Self::SchemaError(msg.into())
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Short name of the error kind, matching the `Display` prefix.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotImplemented(_) => "NotImplemented",
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::NotFound(_) => "NotFound",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::SchemaError(_) => "SchemaError",
            Self::InternalError(_) => "InternalError",
            Self::ArrowError(_) => "ArrowError",
            Self::SerdeJsonError(_) => "SerdeJsonError",
        }
    }
}

/// Ensure a condition holds, returning the given error variant if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::StrixError::$variant(format!($($msg)*)));
        }
    };
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::StrixError::InternalError($msg.to_string()));
        }
    };
}

/// Return early with a `NotFound` error.
#[macro_export]
macro_rules! not_found_err {
    ($($arg:tt)*) => {
        return Err($crate::StrixError::NotFound(format!($($arg)*)))
    };
}

/// Return early with an `InvalidArgument` error.
#[macro_export]
macro_rules! invalid_arg_err {
    ($($arg:tt)*) => {
        return Err($crate::StrixError::InvalidArgument(format!($($arg)*)))
    };
}
