//! Inference Client
//!
//! Stateless protocol client: one call per operation, one typed result.
//! Session state (current prediction, error message) lives with the caller.

use std::fmt;

use digitpad_sample::Sample;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{Digit, Endpoints, PredictRequest, PredictResponse, TrainRequest, TrainResponse};
use crate::fetch::FetchResponse;
use crate::loader::Request;
use crate::transport::Transport;
use crate::NetError;

/// Remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Predict,
    Train,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Predict => f.write_str("predict"),
            Operation::Train => f.write_str("train"),
        }
    }
}

/// Failed remote call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: NetError,
    },

    #[error("{operation} failed with HTTP {status}: {body}")]
    Status {
        operation: Operation,
        status: u16,
        body: String,
    },

    #[error("{operation} returned a malformed response: {reason}")]
    MalformedResponse { operation: Operation, reason: String },
}

impl ClientError {
    pub fn operation(&self) -> Operation {
        match self {
            ClientError::Transport { operation, .. }
            | ClientError::Status { operation, .. }
            | ClientError::MalformedResponse { operation, .. } => *operation,
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Predict/train client over a `Transport`
#[derive(Debug, Clone)]
pub struct InferenceClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> InferenceClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ask the classifier for the digit in `sample`
    pub async fn predict(&self, sample: &Sample) -> Result<Digit, ClientError> {
        let body = PredictRequest { image: sample };
        let response: PredictResponse = self
            .post(Operation::Predict, &self.endpoints.predict, &body)
            .await?;
        tracing::info!(prediction = %response.prediction, "prediction received");
        Ok(response.prediction)
    }

    /// Submit `sample` labeled `label`; returns the server status message
    pub async fn train(&self, sample: &Sample, label: Digit) -> Result<String, ClientError> {
        let body = TrainRequest {
            image: sample,
            label,
        };
        let response: TrainResponse = self
            .post(Operation::Train, &self.endpoints.train, &body)
            .await?;
        tracing::info!(%label, status = %response.status, "training sample accepted");
        Ok(response.status)
    }

    async fn post<B, R>(&self, operation: Operation, url: &Url, body: &B) -> Result<R, ClientError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = Request::post(url.as_str())
            .with_json(body)
            .map_err(|source| ClientError::Transport { operation, source })?;

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;
        let response = FetchResponse::from(response);

        if !response.ok() {
            tracing::warn!(%operation, status = response.status(), "non-success response");
            return Err(ClientError::Status {
                operation,
                status: response.status(),
                body: response.text_lossy(),
            });
        }

        response
            .json::<R>()
            .map_err(|e| ClientError::MalformedResponse {
                operation,
                reason: e.to_string(),
            })
    }
}
