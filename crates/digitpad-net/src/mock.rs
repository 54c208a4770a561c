//! In-memory Transport
//!
//! Records every request and answers from a queue of canned responses.
//! Clones share the same queue and log.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::loader::Request;
use crate::transport::Transport;
use crate::{NetError, Response};

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<Response, NetError>>,
    requests: Vec<Request>,
}

/// Scripted transport for tests
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a JSON response
    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.respond_text(status, &body.to_string())
    }

    /// Queue a raw text response
    pub fn respond_text(&self, status: u16, body: &str) -> &Self {
        self.lock()
            .responses
            .push_back(Ok(Response::new(status, body.as_bytes().to_vec())));
        self
    }

    /// Queue a transport failure
    pub fn fail(&self, error: NetError) -> &Self {
        self.lock().responses.push_back(Err(error));
        self
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> + Send {
        let outcome = {
            let mut state = self.lock();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(NetError::Network("no response queued".into())))
        };
        std::future::ready(outcome)
    }
}
