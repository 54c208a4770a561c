//! Transport seam between the protocol client and the wire.

use std::future::Future;

use crate::client::HttpClient;
use crate::loader::Request;
use crate::{NetError, Response};

/// Sends a request and yields the raw response
pub trait Transport {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> + Send;
}

impl Transport for HttpClient {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> + Send {
        let client = self.clone();
        smol::unblock(move || client.execute(request))
    }
}
