//! In-memory doubles for exercising the HTTP layer without a browser.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contracts::system::auth::TokenPair;
use serde_json::Value;

use super::{ApiClient, HttpRequest, HttpResponse, Notice, NoticeKind, Notifier, Transport, TransportError};
use crate::system::auth::session::SessionStore;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn push(&self, reply: Result<HttpResponse, TransportError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.push(Ok(HttpResponse {
            status,
            body: Some(body),
        }));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".into())))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices.lock().unwrap().iter().map(|n| n.kind).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub transport: Arc<ScriptedTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: SessionStore,
}

impl Harness {
    pub fn sign_in(&self, access_token: &str) {
        self.session.set_user_token(TokenPair {
            access_token: access_token.to_string(),
            refresh_token: "refresh".to_string(),
        });
    }
}

pub fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let session = SessionStore::new();
    let client = ApiClient::new(
        "http://api.test",
        Arc::new(session),
        transport.clone(),
        notifier.clone(),
    );
    Harness {
        client,
        transport,
        notifier,
        session,
    }
}
