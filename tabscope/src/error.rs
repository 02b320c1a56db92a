//! Error types for the tabscope profiling engine.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the [`ProfileError`] enum. Errors are raised as soon as an input-shape or
//! configuration problem is detected and propagate unchanged to the caller; no
//! operation returns a partially built profile.

use thiserror::Error;

/// The main error type for tabscope.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Error from Arrow operations (casts, row conversion, batch slicing).
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A requested column does not exist in the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A column cannot be read as the semantic type it was resolved to.
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// Invalid profiler or request configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Input data that cannot be profiled.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ProfileError>`.
///
/// # Examples
///
/// ```rust
/// use tabscope::error::Result;
///
/// fn load_profile() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a column not found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates a type mismatch error for a column.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Creates an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ProfileError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| wrap(msg, e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(&f(), e.into()))
    }
}

// Caller-facing variants keep their shape; everything else is folded into
// `Internal` with the context prefixed.
fn wrap(msg: &str, err: ProfileError) -> ProfileError {
    match err {
        ProfileError::Internal(inner) => ProfileError::Internal(format!("{msg}: {inner}")),
        ProfileError::Arrow(inner) => ProfileError::Internal(format!("{msg}: {inner}")),
        other => other,
    }
}
