//! Error types for the expense API client and the route table.
//!
//! Every non-2xx response lands in `HttpError`, regardless of whether it is a
//! client or server failure. Its display text is `error：<status>` so callers
//! that surface the message see the status code verbatim.

use thiserror::Error;

/// Errors returned by `ExpenseClient` build, parse and round-trip methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("error：{status}")]
    HttpError { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request cannot be sent as described, e.g. a GET carrying a body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    TransportError(String),
}

impl ApiError {
    /// Status code of an `HttpError`, `None` for local failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while assembling a `RouteTable`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("route path must start with '/': {0}")]
    RelativePath(String),
}
