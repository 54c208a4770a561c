//! HTTP Client
//!
//! Blocking reqwest client with fOS-style configuration. `Transport` runs it
//! on smol's blocking pool so callers only ever await it.

use std::time::Duration;

use crate::loader::Request;
use crate::{NetError, Response};

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("digitpad/", env!("CARGO_PKG_VERSION")).into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: ClientConfig,
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create with custom config
    pub fn with_config(config: ClientConfig) -> Result<Self, NetError> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;
        Ok(Self { config, inner })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `req` on the calling thread
    pub fn execute(&self, req: Request) -> Result<Response, NetError> {
        tracing::info!("HTTP POST {}", req.url);

        let mut builder = self.inner.post(req.url.as_str());
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(map_reqwest_error)?.to_vec();

        tracing::debug!(status, bytes = body.len(), "HTTP response");
        Ok(Response { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> NetError {
    if err.is_timeout() {
        NetError::Timeout
    } else if err.is_builder() {
        NetError::InvalidUrl(err.to_string())
    } else {
        NetError::Network(err.to_string())
    }
}
