//! Scripted transport shared by the facade tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use contentful_core::{ApiError, Contentful, ContentfulClient, HttpRequest, HttpResponse, Transport};

pub const BASE_URL: &str = "http://localhost:3000";

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Transport(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left"))
    }
}

pub fn api(transport: ScriptedTransport) -> Contentful<ScriptedTransport> {
    Contentful::new(ContentfulClient::new(BASE_URL), transport)
}
