//! Error types.
//!
//! Two layers, kept apart on purpose:
//!
//! - [`Error`] surfaces infrastructure failures: a bad configuration value,
//!   binding to a port, accepting a connection. These end the process.
//! - [`ApiError`] is what an item handler returns when a request cannot be
//!   served. It becomes an HTTP response with an `{"Error": "…"}` body and
//!   never leaves the handler that produced it.

use serde_json::json;
use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Infrastructure error returned by [`Server`](crate::Server) and
/// [`Config::from_env`](crate::Config::from_env).
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),
}

/// A request-level failure of the item API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No item carries the requested id.
    #[error("Item not found.")]
    NotFound,

    /// The request body is malformed or misses a required field.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound => Status::NotFound,
            Self::InvalidInput(_) => Status::BadRequest,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "Error": self.to_string() });
        Response::builder()
            .status(self.status())
            .json(body.to_string().into_bytes())
    }
}
