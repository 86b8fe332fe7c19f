use std::cell::RefCell;
use std::fs;

use nostalgia_core::state::SESSION_KEY;
use nostalgia_core::{KeyValueStore, MemoryStore, SiteConfig, SiteState, DEFAULT_API_URL};
use nostalgia_sync::{SyncClient, SyncError, Transport};
use serde_json::{json, Value};

fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(&path).expect("fixture is readable");
    serde_json::from_str(&raw).expect("fixture is valid JSON")
}

/// Records every POST and answers with a canned result.
struct MockTransport {
    reply: Result<Value, SyncError>,
    sent: RefCell<Vec<Value>>,
}

impl MockTransport {
    fn replying(reply: Result<Value, SyncError>) -> Self {
        Self {
            reply,
            sent: RefCell::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<Value> {
        self.sent.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SyncError> {
        self.sent
            .borrow_mut()
            .push(json!({ "url": url, "body": body }));
        self.reply.clone()
    }
}

fn fresh_state() -> SiteState<MemoryStore> {
    SiteState::load(MemoryStore::new(), &SiteConfig::default())
}

#[test]
fn ab_answers_request_matches_golden() {
    let transport = MockTransport::replying(Ok(fixture("collector_receipt.json")));
    let client = SyncClient::new(DEFAULT_API_URL, &transport);
    let mut state = fresh_state();
    state.answer(3, "b").unwrap();
    state.answer(1, "a").unwrap();

    let receipt = client.save_ab_answers(&mut state).expect("receipt");

    assert_eq!(transport.sent(), vec![fixture("ab_answers_request.json")]);
    assert_eq!(receipt.session_id.as_deref(), Some("7f3c2a"));
    assert_eq!(receipt.extra.get("success"), Some(&json!(true)));
}

#[test]
fn password_guesses_request_matches_golden() {
    let transport = MockTransport::replying(Ok(json!({})));
    let client = SyncClient::new(format!("{DEFAULT_API_URL}/"), &transport);

    let mut store = MemoryStore::new();
    store.set(SESSION_KEY, "7f3c2a").unwrap();
    let mut state = SiteState::load(store, &SiteConfig::default());
    state.submit_guesses([" potato ", "", "hunter2"]);

    assert!(client.save_password_guesses(&mut state).is_some());
    assert_eq!(transport.sent(), vec![fixture("password_guesses_request.json")]);
    assert_eq!(state.session_id(), Some("7f3c2a"));
}

#[test]
fn server_session_id_is_adopted_and_persisted() {
    let transport = MockTransport::replying(Ok(json!({ "session_id": "new-session" })));
    let client = SyncClient::new(DEFAULT_API_URL, &transport);
    let mut state = fresh_state();

    client.save_ab_answers(&mut state);
    client.save_password_guesses(&mut state);

    let sent = transport.sent();
    assert_eq!(sent[0]["body"]["session_id"], Value::Null);
    assert_eq!(sent[1]["body"]["session_id"], json!("new-session"));
    assert_eq!(
        state.store().get(SESSION_KEY).as_deref(),
        Some("new-session")
    );
}

#[test]
fn failures_leave_local_state_alone() {
    let failing = MockTransport::replying(Err(SyncError::Status {
        url: format!("{DEFAULT_API_URL}/api/ab-answers"),
        status: 503,
    }));
    let client = SyncClient::new(DEFAULT_API_URL, &failing);
    let mut state = fresh_state();
    state.answer(2, "a").unwrap();

    assert!(client.save_ab_answers(&mut state).is_none());
    assert_eq!(state.quiz().selected(2), Some("a"));
    assert_eq!(state.session_id(), None);

    let garbled = MockTransport::replying(Ok(json!(["not", "an", "object"])));
    let client = SyncClient::new(DEFAULT_API_URL, &garbled);
    assert!(client.save_ab_answers(&mut state).is_none());
    assert_eq!(state.session_id(), None);
}
