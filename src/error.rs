//! Error types shared by the request context, response builder and transport adapter.
//!
//! Client-facing failures ([`DecodeError`]) are serialized locally by handlers as
//! `400` responses. [`ResponseError`] signals a programmer error inside a handler and
//! is surfaced by the dispatcher as a `500`.

use std::fmt;
use std::io;

/// Failure to decode a request body into the requested shape.
///
/// Decoding is all-or-nothing: when this error is returned no part of the
/// target value has been populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Human readable description, taken from the underlying decoder
    pub message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Misuse of a [`crate::server::ResponseBuilder`].
#[derive(Debug)]
pub enum ResponseError {
    /// A terminal write (or a status change) was attempted after the response
    /// had already been finalized.
    AlreadyWritten,
    /// The value handed to `write_json` could not be serialized.
    Serialize(serde_json::Error),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::AlreadyWritten => {
                write!(f, "response already written; only one terminal write is allowed")
            }
            ResponseError::Serialize(e) => write!(f, "failed to serialize response body: {e}"),
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseError::Serialize(e) => Some(e),
            ResponseError::AlreadyWritten => None,
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(e: serde_json::Error) -> Self {
        ResponseError::Serialize(e)
    }
}

/// Failure to turn raw transport input into a [`crate::server::ParsedRequest`].
#[derive(Debug)]
pub enum RequestError {
    /// The request line carried a method token `http` refuses
    InvalidMethod(String),
    /// The body could not be read from the connection buffer
    Body(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidMethod(m) => write!(f, "Invalid method: {m}"),
            RequestError::Body(e) => write!(f, "Failed to read request body: {e}"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Body(e) => Some(e),
            RequestError::InvalidMethod(_) => None,
        }
    }
}

impl From<io::Error> for RequestError {
    fn from(e: io::Error) -> Self {
        RequestError::Body(e)
    }
}
