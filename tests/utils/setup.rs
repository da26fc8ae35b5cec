//! Test setup utilities - builds the full router over in-memory collaborators
#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use squash_bot::core::verify::{NoopVerifier, Verifier};
use squash_bot::match_tracker::StoredMatchRepository;
use squash_bot::notify::RecordingNotifier;
use squash_bot::scheduled::{ActionRegistry, PromptSessionBooking};
use squash_bot::sessions::StoredSessionRepository;
use squash_bot::storage::InMemoryStorage;
use squash_bot::timetable::{StaticTimetable, TimetableSession};
use squash_bot::{build_registry, router, AppState};

pub const PROMPT_CHANNEL_ID: &str = "channel-1";
pub const ACTIONS_TOKEN: &str = "scheduler-secret";

pub struct TestSetup {
    pub router: Router,
    pub storage: Arc<InMemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
}

pub struct TestSetupBuilder {
    verifier: Arc<dyn Verifier>,
    timetable: Vec<TimetableSession>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            verifier: Arc::new(NoopVerifier),
            timetable: Vec::new(),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn Verifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_timetable(mut self, sessions: Vec<TimetableSession>) -> Self {
        self.timetable = sessions;
        self
    }

    pub fn build(self) -> TestSetup {
        let storage = Arc::new(InMemoryStorage::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let timetable = Arc::new(StaticTimetable::new(self.timetable));

        let registry = build_registry(
            Arc::new(StoredMatchRepository::new(
                storage.clone(),
                "results",
                "match_results.json",
            )),
            Arc::new(StoredSessionRepository::new(
                storage.clone(),
                "sessions",
                "sessions.json",
            )),
            timetable.clone(),
        )
        .expect("command names should be unique");

        let actions = ActionRegistry::builder()
            .with_action(Arc::new(PromptSessionBooking::new(
                timetable,
                notifier.clone(),
                vec![PROMPT_CHANNEL_ID.to_string()],
            )))
            .build()
            .expect("action codes should be unique");

        let state = AppState::new(registry, self.verifier, actions)
            .with_actions_token(Some(ACTIONS_TOKEN.to_string()));
        TestSetup {
            router: router(state),
            storage,
            notifier,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSetup {
    pub fn new() -> Self {
        TestSetupBuilder::new().build()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Posts a scheduled action, authenticated with `token`
    pub async fn run_action(&self, action_type: &str, token: Option<&str>) -> StatusCode {
        let mut request = Request::builder()
            .method("POST")
            .uri("/actions")
            .header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let body = serde_json::json!({ "action_type": action_type }).to_string();
        let (status, _) = self.send(request.body(Body::from(body)).unwrap()).await;
        status
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Posts an interaction and returns the response message content
    pub async fn run_command(&self, interaction: Value) -> String {
        let (status, body) = self.post_json("/interactions", &interaction).await;
        assert_eq!(status, StatusCode::OK, "unexpected response {body}");
        body["data"]["content"]
            .as_str()
            .expect("response should carry message content")
            .to_string()
    }
}
