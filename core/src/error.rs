//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every failure raised while writing a document is fatal to the current call.
//! Nothing here is retried or logged; errors travel back to the caller with `?`.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for failures of the underlying sink.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A caller passed an unusable argument (blank property name, external reference, ...).
    #[from(ignore)]
    #[display("Argument Error: {_0}")]
    Argument(String),

    /// The scope discipline of the writer was violated.
    #[from(ignore)]
    #[display("Scope Error: {_0}")]
    Scope(String),

    /// The indentation level was decremented below zero.
    #[from(ignore)]
    #[display("Indentation level cannot be lower than 0.")]
    IndentationLevelInvalid,

    /// The dynamic value dispatcher met a type it cannot write.
    #[from(ignore)]
    #[display("The type '{_0}' is not supported.")]
    UnsupportedType(String),

    /// A reference could not be resolved against the document.
    #[from(ignore)]
    #[display("Reference Error: {message} (id: '{id}')")]
    Reference {
        /// Id of the offending reference.
        id: String,
        /// Human readable reason.
        message: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Builds the not-found error raised when a reference id has no target.
    pub(crate) fn invalid_reference_id(id: impl Into<String>) -> Self {
        let id = id.into();
        AppError::Reference {
            message: format!("Invalid Reference identifier '{}'.", id),
            id,
        }
    }
}
