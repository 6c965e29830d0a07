//! The editable four-field state and its re-derivation rules.

use jwt_lens_codec::{decode, encode, try_compact, try_pretty, EncodeJwt, Part};
use serde::Serialize;

use crate::storage::{Storage, StorageError, STORAGE_KEY};

/// Well-known HS256 example token shown when the cache is empty.
pub const SAMPLE_TOKEN: &str =
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";

/// Per-field decode state, recomputed from scratch on every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartState {
    Absent,
    Unparseable,
    Present,
}

impl From<&Part> for PartState {
    fn from(part: &Part) -> Self {
        match part {
            Part::Absent => PartState::Absent,
            Part::Unparseable => PartState::Unparseable,
            Part::Present(_) => PartState::Present,
        }
    }
}

/// One user edit, addressed to a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Token(String),
    Header(String),
    Payload(String),
    Signature(String),
}

/// Serializable view of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub token: String,
    pub header: String,
    pub payload: String,
    pub signature: String,
    pub header_state: PartState,
    pub payload_state: PartState,
    pub signature_state: PartState,
}

#[derive(Debug, Clone)]
struct Field {
    text: String,
    state: PartState,
}

impl Field {
    fn absent() -> Self {
        Field {
            text: String::new(),
            state: PartState::Absent,
        }
    }

    fn from_part(part: &Part) -> Self {
        Field {
            text: part.text().map(try_pretty).unwrap_or_default(),
            state: PartState::from(part),
        }
    }

    fn edited(text: &str) -> Self {
        Field {
            text: text.to_string(),
            state: if text.is_empty() {
                PartState::Absent
            } else {
                PartState::Present
            },
        }
    }
}

/// Session state for one page load.
///
/// Explicit init via [`Session::open`]; no teardown — the next page load
/// opens a fresh session against the same storage.
pub struct Session<S: Storage> {
    storage: S,
    token: String,
    header: Field,
    payload: Field,
    signature: Field,
    storage_error: Option<StorageError>,
}

impl<S: Storage> Session<S> {
    /// Reads the cached token (falling back to [`SAMPLE_TOKEN`] when the
    /// cache is empty or unreadable) and decodes it.
    pub fn open(storage: S) -> Self {
        let mut session = Session {
            storage,
            token: String::new(),
            header: Field::absent(),
            payload: Field::absent(),
            signature: Field::absent(),
            storage_error: None,
        };

        let cached = match session.storage.get(STORAGE_KEY) {
            Ok(value) => value,
            Err(err) => {
                session.storage_error = Some(err);
                None
            }
        };
        let initial = match cached {
            Some(value) if !value.is_empty() => value,
            _ => SAMPLE_TOKEN.to_string(),
        };
        session.set_token(&initial);
        session
    }

    /// Replaces the whole token and re-derives all three fields.
    ///
    /// Whitespace and newlines are stripped first; pasted tokens often
    /// carry line breaks.
    pub fn set_token(&mut self, raw: &str) {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let decoded = decode(&cleaned);
        self.header = Field::from_part(&decoded.header);
        self.payload = Field::from_part(&decoded.payload);
        // Verbatim: the signature channel is never run through the
        // normalizer.
        self.signature = Field {
            text: decoded.signature.text().unwrap_or_default().to_string(),
            state: PartState::from(&decoded.signature),
        };
        self.token = cleaned;
        self.persist();
    }

    /// Replaces the header text and re-encodes the token. Payload and
    /// signature are left untouched.
    pub fn set_header(&mut self, text: &str) {
        self.header = Field::edited(text);
        self.rebuild_token();
    }

    /// Replaces the payload text and re-encodes the token. Header and
    /// signature are left untouched.
    pub fn set_payload(&mut self, text: &str) {
        self.payload = Field::edited(text);
        self.rebuild_token();
    }

    /// Replaces the signature verbatim and re-encodes the token. Header and
    /// payload decode state must never be recomputed here.
    pub fn set_signature(&mut self, text: &str) {
        self.signature = Field::edited(text);
        self.rebuild_token();
    }

    /// Applies one [`Edit`] to the matching field.
    pub fn apply(&mut self, edit: &Edit) {
        match edit {
            Edit::Token(raw) => self.set_token(raw),
            Edit::Header(text) => self.set_header(text),
            Edit::Payload(text) => self.set_payload(text),
            Edit::Signature(text) => self.set_signature(text),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            token: self.token.clone(),
            header: self.header.text.clone(),
            payload: self.payload.text.clone(),
            signature: self.signature.text.clone(),
            header_state: self.header.state,
            payload_state: self.payload.state,
            signature_state: self.signature.state,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Last storage error, if the previous operation failed to persist.
    /// The session keeps operating on the in-memory value either way.
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }

    /// Re-encodes the compact token from the current field texts. Header
    /// and payload go through `try_compact` so hand-prettified JSON does
    /// not bloat the encoded segments.
    fn rebuild_token(&mut self) {
        let compact = |text: &str| {
            let compacted = try_compact(text);
            (!compacted.is_empty()).then_some(compacted)
        };
        self.token = encode(&EncodeJwt {
            header: compact(&self.header.text),
            payload: compact(&self.payload.text),
            signature: (!self.signature.text.is_empty()).then(|| self.signature.text.clone()),
        });
        self.persist();
    }

    fn persist(&mut self) {
        // A successful write must not discard an error recorded earlier in
        // the same operation (an unreadable cache during open); the error
        // stays until the caller takes it for logging.
        if let Err(err) = self.storage.set(STORAGE_KEY, &self.token) {
            self.storage_error = Some(err);
        }
    }
}
