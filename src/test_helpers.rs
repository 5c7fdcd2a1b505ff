//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::app::History;
use crate::net::api::AuthApi;
use crate::net::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::state::session::MemorySessionStore;

/// Replays scripted responses in order and records every request sent.
pub struct ScriptedHttp {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttp {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()) })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Transport("no scripted response".into())))
    }
}

pub fn json_response(status: u16, body: serde_json::Value) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::new(status, body.to_string()))
}

pub fn transport_error() -> Result<HttpResponse, HttpError> {
    Err(HttpError::Transport("connection refused".into()))
}

/// Everything a page needs, wired to fakes.
pub struct Harness {
    pub http: Arc<ScriptedHttp>,
    pub api: AuthApi,
    pub session: Arc<MemorySessionStore>,
    pub history: Arc<History>,
}

pub fn harness(responses: Vec<Result<HttpResponse, HttpError>>) -> Harness {
    let http = ScriptedHttp::new(responses);
    let api = AuthApi::new(http.clone());
    Harness { http, api, session: Arc::new(MemorySessionStore::default()), history: Arc::new(History::default()) }
}
