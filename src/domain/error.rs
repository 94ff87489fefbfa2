//! Error types for the Optioneer core.
//!
//! This module defines the centralized error type [`OptioneerError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.

use thiserror::Error;

/// The main error type for Optioneer operations.
///
/// This enum consolidates all error conditions that can occur while editing a
/// working copy or synchronizing it to the remote collaborator. Validation
/// failures are always detected locally, before any remote call is issued.
///
/// # Examples
///
/// ```
/// use optioneer::domain::OptioneerError;
///
/// fn check_names() -> Result<(), OptioneerError> {
///     Err(OptioneerError::Validation(
///         "duplicate option name \"Red\"".to_string(),
///     ))
/// }
/// ```
#[derive(Debug, Error)]
pub enum OptioneerError {
    /// The working copy failed local validation.
    ///
    /// Raised for duplicate or empty names among enabled options, duplicate
    /// names in an add batch, or an invalid find/replace pattern. Blocks plan
    /// execution entirely; no remote calls are issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A save pipeline is already outstanding.
    ///
    /// Only one plan may be in flight at a time; the caller must wait for the
    /// current save to complete or fail before starting another.
    #[error("A save is already in progress")]
    SaveInProgress,

    /// A call to the remote collaborator failed.
    ///
    /// The string contains a description of what went wrong on the remote
    /// side. The executor wraps this in an
    /// [`ExecutionError`](crate::sync::ExecutionError) carrying the failed
    /// phase.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Request/response traffic through the remote port was malformed.
    ///
    /// Raised when a request carries an invalid shape (for example an
    /// `InsertRelative` with zero or two anchors) or a response cannot be
    /// interpreted.
    #[error("Port error: {0}")]
    Port(String),

    /// An operation plan violated an internal invariant at dispatch time.
    ///
    /// The notable case is a Move referencing a pending id that no preceding
    /// Create resolved. This indicates a planner bug, not user error.
    #[error("Plan integrity error: {0}")]
    PlanIntegrity(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations (configuration file
    /// loading). Automatically converts from `std::io::Error` using the
    /// `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Optioneer operations.
///
/// This is a type alias for `std::result::Result<T, OptioneerError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, OptioneerError>;
