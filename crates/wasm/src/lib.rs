//! WASM surface for the jwt-lens page.
//!
//! Sessions live in a thread-local store behind u32 handles. The page opens
//! a session with whatever it found under [`storage_key`] in localStorage,
//! applies edits through the `session_set_*` exports, and re-renders from
//! the returned snapshot; it persists `snapshot.token` back under the same
//! key. The wasm side itself is storage-free (in-memory only), so a page
//! whose localStorage is unavailable degrades to an unpersisted session
//! without any change in behavior.

use jwt_lens_session::{Edit, MemoryStorage, PendingEdit, Session, Snapshot, Storage};
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn warn(msg: &str);
}

struct SessionState {
    session: Session<MemoryStorage>,
    pending: PendingEdit<Edit>,
}

#[derive(Default)]
struct SessionStore {
    next_id: u32,
    sessions: HashMap<u32, SessionState>,
}

thread_local! {
    static SESSION_STORE: RefCell<SessionStore> = RefCell::new(SessionStore {
        next_id: 1,
        sessions: HashMap::new(),
    });
}

fn with_session_mut<T>(
    session_id: u32,
    f: impl FnOnce(&mut SessionState) -> Result<T, String>,
) -> Result<T, String> {
    SESSION_STORE.with(|store| {
        let mut store = store.borrow_mut();
        let state = store
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| format!("session not found: {session_id}"))?;
        f(state)
    })
}

fn log_storage_error(session: &mut Session<MemoryStorage>) {
    if let Some(err) = session.take_storage_error() {
        warn(&format!("jwt-lens storage: {err}"));
    }
}

fn snapshot_after_edit(state: &mut SessionState) -> Result<Snapshot, String> {
    log_storage_error(&mut state.session);
    Ok(state.session.snapshot())
}

fn session_open_internal(initial: Option<String>) -> Result<u32, String> {
    let mut storage = MemoryStorage::new();
    if let Some(value) = initial {
        storage
            .set(jwt_lens_session::STORAGE_KEY, &value)
            .map_err(|e| format!("session init failed: {e}"))?;
    }
    let session = Session::open(storage);

    SESSION_STORE.with(|store| {
        let mut store = store.borrow_mut();
        let mut id = store.next_id;
        while id == 0 || store.sessions.contains_key(&id) {
            id = id.wrapping_add(1);
            if id == store.next_id {
                return Err("session id space exhausted".to_string());
            }
        }
        store.next_id = id.wrapping_add(1);
        store.sessions.insert(
            id,
            SessionState {
                session,
                pending: PendingEdit::new(),
            },
        );
        Ok(id)
    })
}

fn apply_edit_internal(session_id: u32, edit: Edit) -> Result<Snapshot, String> {
    with_session_mut(session_id, |state| {
        state.session.apply(&edit);
        snapshot_after_edit(state)
    })
}

fn submit_edit_internal(session_id: u32, edit: Edit) -> Result<(), String> {
    with_session_mut(session_id, |state| {
        state.pending.submit(edit);
        Ok(())
    })
}

fn flush_internal(session_id: u32) -> Result<Snapshot, String> {
    with_session_mut(session_id, |state| {
        if let Some(edit) = state.pending.take() {
            state.session.apply(&edit);
        }
        snapshot_after_edit(state)
    })
}

fn snapshot_internal(session_id: u32) -> Result<Snapshot, String> {
    with_session_mut(session_id, |state| Ok(state.session.snapshot()))
}

fn to_js(snapshot: &Snapshot) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(snapshot)
        .map_err(|e| JsValue::from_str(&format!("snapshot encode failed: {e}")))
}

/// The localStorage key the page should persist `snapshot.token` under.
#[wasm_bindgen]
pub fn storage_key() -> String {
    jwt_lens_session::STORAGE_KEY.to_string()
}

/// The sample token shown on first run.
#[wasm_bindgen]
pub fn sample_token() -> String {
    jwt_lens_session::SAMPLE_TOKEN.to_string()
}

/// Opens a session, seeded with the page's cached token if there is one.
#[wasm_bindgen]
pub fn session_open(initial: Option<String>) -> Result<u32, JsValue> {
    session_open_internal(initial).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn session_free(session_id: u32) -> bool {
    SESSION_STORE.with(|store| {
        let mut store = store.borrow_mut();
        store.sessions.remove(&session_id).is_some()
    })
}

#[wasm_bindgen]
pub fn session_snapshot(session_id: u32) -> Result<JsValue, JsValue> {
    let snapshot = snapshot_internal(session_id).map_err(|e| JsValue::from_str(&e))?;
    to_js(&snapshot)
}

#[wasm_bindgen]
pub fn session_set_token(session_id: u32, value: &str) -> Result<JsValue, JsValue> {
    let snapshot = apply_edit_internal(session_id, Edit::Token(value.to_string()))
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&snapshot)
}

#[wasm_bindgen]
pub fn session_set_header(session_id: u32, value: &str) -> Result<JsValue, JsValue> {
    let snapshot = apply_edit_internal(session_id, Edit::Header(value.to_string()))
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&snapshot)
}

#[wasm_bindgen]
pub fn session_set_payload(session_id: u32, value: &str) -> Result<JsValue, JsValue> {
    let snapshot = apply_edit_internal(session_id, Edit::Payload(value.to_string()))
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&snapshot)
}

#[wasm_bindgen]
pub fn session_set_signature(session_id: u32, value: &str) -> Result<JsValue, JsValue> {
    let snapshot = apply_edit_internal(session_id, Edit::Signature(value.to_string()))
        .map_err(|e| JsValue::from_str(&e))?;
    to_js(&snapshot)
}

/// Schedules an edit to the token field without applying it. A newer
/// submission supersedes a pending one; `session_flush` applies the latest.
#[wasm_bindgen]
pub fn session_submit_token(session_id: u32, value: &str) -> Result<(), JsValue> {
    submit_edit_internal(session_id, Edit::Token(value.to_string()))
        .map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn session_flush(session_id: u32) -> Result<JsValue, JsValue> {
    let snapshot = flush_internal(session_id).map_err(|e| JsValue::from_str(&e))?;
    to_js(&snapshot)
}
