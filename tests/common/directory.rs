//! Mock Hospital Directory API
//!
//! Wraps a wiremock `MockServer` whose create and activate endpoints can be
//! switched between failing and succeeding while a test runs.

use hospital_bulk::config::UpstreamConfig;
use hospital_bulk::{BatchStore, BulkProcessor, HttpClientFactory, StoreMode};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Default)]
struct DirectoryBehaviour {
    create_calls: AtomicUsize,
    failing_calls: Mutex<HashSet<usize>>,
    fail_activation: AtomicBool,
}

/// Answers `POST /hospitals/` with an incrementing id, failing scripted calls
struct CreateResponder(Arc<DirectoryBehaviour>);

impl Respond for CreateResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.0.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.0.failing_calls.lock().unwrap().contains(&call) {
            return ResponseTemplate::new(500)
                .set_body_json(json!({ "detail": "Directory temporarily unavailable" }));
        }
        ResponseTemplate::new(201).set_body_json(json!({ "id": 1000 + call, "active": false }))
    }
}

/// Answers `PATCH /hospitals/batch/{id}/activate`
struct ActivateResponder(Arc<DirectoryBehaviour>);

impl Respond for ActivateResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if self.0.fail_activation.load(Ordering::SeqCst) {
            return ResponseTemplate::new(502).set_body_string("Bad gateway");
        }
        ResponseTemplate::new(200).set_body_json(json!({ "activated": true }))
    }
}

/// Scriptable stand-in for the Hospital Directory API
pub struct MockDirectory {
    server: MockServer,
    behaviour: Arc<DirectoryBehaviour>,
}

impl MockDirectory {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let behaviour = Arc::new(DirectoryBehaviour::default());

        Mock::given(method("POST"))
            .and(path("/hospitals/"))
            .respond_with(CreateResponder(Arc::clone(&behaviour)))
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path_regex(r"^/hospitals/batch/[0-9a-f-]{36}/activate$"))
            .respond_with(ActivateResponder(Arc::clone(&behaviour)))
            .mount(&server)
            .await;

        Self { server, behaviour }
    }

    /// Fail the given 1-based create calls, counted across the whole test
    pub fn fail_create_calls(&self, calls: &[usize]) {
        self.behaviour
            .failing_calls
            .lock()
            .unwrap()
            .extend(calls.iter().copied());
    }

    pub fn fail_activation(&self, fail: bool) {
        self.behaviour.fail_activation.store(fail, Ordering::SeqCst);
    }

    /// Let every later call succeed
    pub fn recover(&self) {
        self.behaviour.failing_calls.lock().unwrap().clear();
        self.fail_activation(false);
    }

    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.server.uri(),
            timeout_seconds: 5.0,
        }
    }

    /// Processor with a tracked store talking to this directory
    pub fn processor(&self, row_limit: usize) -> BulkProcessor {
        BulkProcessor::new(
            row_limit,
            Arc::new(HttpClientFactory::new(self.upstream_config())),
            StoreMode::Tracked(Arc::new(BatchStore::new())),
        )
    }

    /// JSON bodies of every create request received so far
    pub async fn create_payloads(&self) -> Vec<Value> {
        self.requests("POST")
            .await
            .iter()
            .map(|request| request.body_json::<Value>().unwrap())
            .collect()
    }

    /// Paths of every activation request received so far
    pub async fn activation_paths(&self) -> Vec<String> {
        self.requests("PATCH")
            .await
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }

    async fn requests(&self, verb: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == verb)
            .collect()
    }
}
