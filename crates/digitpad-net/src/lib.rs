//! Digit Pad Networking
//!
//! HTTP plumbing and the predict/train protocol spoken with the remote
//! classifier.

pub mod api;
pub mod client;
pub mod fetch;
pub mod inference;
pub mod loader;
#[cfg(feature = "mock")]
pub mod mock;
pub mod transport;

pub use api::{Digit, Endpoints, InvalidDigit};
pub use client::{ClientConfig, HttpClient};
pub use fetch::FetchResponse;
pub use inference::{ClientError, InferenceClient, Operation};
pub use loader::Request;
pub use transport::Transport;
pub use url::Url;

/// HTTP Response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid JSON: {0}")]
    Json(String),
}
