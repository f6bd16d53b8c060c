//! Error types for the smoke workflow.

use thiserror::Error;

/// Reasons the creation form cannot be submitted yet.
///
/// These never reach the network; the form shows them next to a disabled
/// submit button.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Video URL is required")]
    MissingVideoUrl,

    /// Timestamp is not a whole number of seconds greater than zero
    #[error("Timestamp must be a whole number of seconds greater than zero")]
    InvalidTimestamp,

    #[error("Pick a point on the map")]
    MissingPoint,

    #[error("A submission is already in progress")]
    SubmitInFlight,

    /// Submit was requested outside of the review step
    #[error("Nothing to submit")]
    NotReviewing,
}

/// Failures talking to the smokes API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("You need to log in first")]
    Unauthenticated,

    /// Non-success HTTP status with the message extracted from the body
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}
