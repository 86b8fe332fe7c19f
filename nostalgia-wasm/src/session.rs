use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use log::{debug, warn};
use nostalgia_core::{
    confirm_passphrase as check_passphrase, render_profile, KeyValueStore, SiteError, SiteState,
};
use nostalgia_sync::{absorb_receipt, SyncError, SyncRequest};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Storage, XmlHttpRequest};

use crate::{parse_config, to_js};

/// `localStorage`-backed store. Without storage access every write fails and reads are empty.
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable, progress will not survive a reload");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage
            .as_ref()
            .and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SiteError> {
        let storage = self.storage.as_ref().ok_or_else(|| SiteError::Storage {
            key: key.to_string(),
            reason: "localStorage unavailable".to_string(),
        })?;
        storage.set_item(key, value).map_err(|err| SiteError::Storage {
            key: key.to_string(),
            reason: format!("{err:?}"),
        })
    }
}

type SharedState = Rc<RefCell<SiteState<LocalStore>>>;

/// Quiz, guesses and session of the current visitor, synced in the background.
#[wasm_bindgen]
pub struct SiteSession {
    state: SharedState,
    api_url: String,
}

#[wasm_bindgen]
impl SiteSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<SiteSession, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let config = parse_config(config)?;
        let state = SiteState::load(LocalStore::open(), &config);
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            api_url: config.api_url,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn session_id(&self) -> Option<String> {
        self.state.borrow().session_id().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn current_question(&self) -> u32 {
        self.state.borrow().quiz().current()
    }

    pub fn progress_label(&self) -> String {
        self.state.borrow().quiz().progress_label()
    }

    /// Option previously chosen for `question`, to restore the selection.
    pub fn selected(&self, question: u32) -> Option<String> {
        self.state
            .borrow()
            .quiz()
            .selected(question)
            .map(str::to_string)
    }

    /// Records a choice and posts the full answer set in the background.
    pub fn answer(&self, question: u32, value: &str) -> Result<(), JsValue> {
        let request = {
            let mut state = self.state.borrow_mut();
            let session_id = state.session_id().map(str::to_string);
            let answers = state
                .answer(question, value)
                .map_err(|err| JsValue::from_str(&err.to_string()))?;
            SyncRequest::ab_answers(session_id.as_deref(), answers)
        };
        self.dispatch(request);
        Ok(())
    }

    pub fn advance_question(&self) -> u32 {
        self.state.borrow_mut().advance_question()
    }

    /// Validates the wallet prompt and returns the accepted passphrase.
    pub fn confirm_passphrase(&self, first: &str, second: &str) -> Result<String, JsValue> {
        check_passphrase(first, second)
            .map(str::to_string)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Keeps the non-blank guesses, posts them and returns what was kept.
    pub fn submit_guesses(&self, inputs: Vec<String>) -> Result<JsValue, JsValue> {
        let (accepted, request) = {
            let mut state = self.state.borrow_mut();
            let accepted = state.submit_guesses(&inputs).to_vec();
            let request = SyncRequest::password_guesses(state.session_id(), &accepted);
            (accepted, request)
        };
        self.dispatch(request);
        to_js(&accepted, "guesses")
    }

    /// Plain-text profile for the copy button.
    pub fn profile(&self) -> String {
        let state = self.state.borrow();
        render_profile(state.quiz().answers(), state.guesses().guesses(), Utc::now())
    }
}

impl SiteSession {
    fn dispatch(&self, request: Result<SyncRequest, SyncError>) {
        let result = request
            .map_err(|err| JsValue::from_str(&err.to_string()))
            .and_then(|request| post_json(Rc::clone(&self.state), &self.api_url, request));
        if let Err(err) = result {
            warn!("sync request not sent: {err:?}");
        }
    }
}

/// Sends `request` with an async XHR; the response is absorbed into `state` when it lands.
fn post_json(state: SharedState, base_url: &str, request: SyncRequest) -> Result<(), JsValue> {
    let url = request.url(base_url);
    let xhr = XmlHttpRequest::new()?;
    xhr.open_with_async("POST", &url, true)?;
    xhr.set_request_header("Content-Type", "application/json")?;

    let endpoint = request.endpoint;
    let handle = xhr.clone();
    let on_done = Closure::once_into_js(move || {
        let status = handle.status().unwrap_or(0);
        if !(200..300).contains(&status) {
            warn!("sync to {url} failed with HTTP status {status}");
            return;
        }
        let body = handle.response_text().ok().flatten().unwrap_or_default();
        let response = match serde_json::from_str::<Value>(&body) {
            Ok(response) => response,
            Err(err) => {
                warn!("sync to {url} returned unreadable JSON: {err}");
                return;
            }
        };
        match state.try_borrow_mut() {
            Ok(mut state) => {
                absorb_receipt(&mut *state, endpoint, response);
            }
            Err(_) => warn!("session busy, dropping response from {url}"),
        }
    });
    xhr.set_onloadend(Some(on_done.unchecked_ref()));

    debug!("posting {:?}", request.endpoint);
    xhr.send_with_opt_str(Some(&request.body.to_string()))
}
