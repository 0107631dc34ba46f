//! API handle pairing the request builder with a transport.
//!
//! # Design
//! `Contentful` owns its two collaborators outright: the immutable
//! `ContentfulClient` and the caller-supplied `Transport`. Service facades
//! borrow the handle, so there is no shared mutable state and no global
//! client.

use tracing::debug;

use crate::client::ContentfulClient;
use crate::content_types::ContentTypes;
use crate::entries::Entries;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Entry point for talking to the Management API.
///
/// Every call builds a request with the inner `ContentfulClient`, sends it
/// through `transport` and parses the response. Nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub struct Contentful<T> {
    client: ContentfulClient,
    transport: T,
}

impl<T: Transport> Contentful<T> {
    pub fn new(client: ContentfulClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ContentfulClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn entries(&self) -> Entries<'_, T> {
        Entries::new(self)
    }

    pub fn content_types(&self) -> ContentTypes<'_, T> {
        ContentTypes::new(self)
    }

    /// Send `request` and hand back the raw response for parsing.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, path = %path, "sending request");

        let response = self.transport.execute(request)?;
        debug!(method, path = %path, status = response.status, "received response");
        Ok(response)
    }
}
