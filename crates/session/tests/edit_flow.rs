use jwt_lens_session::{
    Edit, MemoryStorage, PartState, PendingEdit, Session, Storage, StorageError, STORAGE_KEY,
};

/// Storage that accepts reads but fails every write.
#[derive(Default)]
struct ReadOnlyStorage {
    cached: Option<String>,
}

impl Storage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cached.clone())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed("quota exceeded".to_string()))
    }
}

/// Storage whose reads fail but whose writes succeed.
#[derive(Default)]
struct WriteOnlyStorage {
    inner: MemoryStorage,
}

impl Storage for WriteOnlyStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("read denied".to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }
}

/// Storage that fails even reads.
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("denied".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("denied".to_string()))
    }
}

#[test]
fn editing_header_re_encodes_the_token() {
    let mut session = Session::open(MemoryStorage::new());
    session.set_token("");
    session.set_header("{\"alg\": \"none\"}");

    // The header segment encodes the compacted JSON; the payload and
    // signature positions stay as empty segments.
    let snapshot = session.snapshot();
    assert_eq!(snapshot.token, "eyJhbGciOiJub25lIn0..");
    assert_eq!(snapshot.payload_state, PartState::Absent);
    assert_eq!(snapshot.signature_state, PartState::Absent);
}

#[test]
fn editing_payload_keeps_other_fields() {
    let mut session = Session::open(MemoryStorage::new());
    session.set_token("eyJhbGciOiJub25lIn0.eyJhIjoxfQ.sig");
    let before = session.snapshot();

    session.set_payload("{\"a\":2}");
    let after = session.snapshot();

    assert_eq!(after.header, before.header);
    assert_eq!(after.signature, "sig");
    assert_eq!(after.token, "eyJhbGciOiJub25lIn0.eyJhIjoyfQ.sig");
}

#[test]
fn editing_signature_never_touches_header_or_payload_state() {
    let mut session = Session::open(MemoryStorage::new());
    // Corrupt header: its unparseable state must survive a signature edit.
    session.set_token("!!!.eyJhIjoxfQ.old");
    let before = session.snapshot();
    assert_eq!(before.header_state, PartState::Unparseable);

    session.set_signature("new");
    let after = session.snapshot();

    assert_eq!(after.header_state, PartState::Unparseable);
    assert_eq!(after.header, before.header);
    assert_eq!(after.payload, before.payload);
    assert!(after.token.ends_with(".new"));
}

#[test]
fn hand_prettified_payload_encodes_compact() {
    let mut session = Session::open(MemoryStorage::new());
    session.set_token("");
    session.set_payload("{\n  \"sub\": \"1\"\n}");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.token, ".eyJzdWIiOiIxIn0.");
    // The field itself keeps the text as typed.
    assert_eq!(snapshot.payload, "{\n  \"sub\": \"1\"\n}");
}

#[test]
fn non_json_field_text_is_carried_as_is() {
    let mut session = Session::open(MemoryStorage::new());
    session.set_token("");
    session.set_header("not json");

    // "not json" passes through the normalizer unchanged, then base64url.
    assert_eq!(session.snapshot().token, "bm90IGpzb24..");
}

#[test]
fn edits_persist_the_raw_token() {
    let mut storage = MemoryStorage::new();
    storage.set(STORAGE_KEY, "YQ.Yg.sig").unwrap();
    let mut session = Session::open(storage);
    session.set_signature("other");
    assert_eq!(session.token(), "YQ.Yg.other");
}

#[test]
fn write_failure_keeps_the_session_usable() {
    let mut session = Session::open(ReadOnlyStorage {
        cached: Some("YQ.Yg.sig".to_string()),
    });
    // Opening decoded the cached value even though persisting it failed.
    assert_eq!(session.token(), "YQ.Yg.sig");
    assert!(session.take_storage_error().is_some());

    session.set_payload("{\"a\":1}");
    assert_eq!(session.token(), "YQ.eyJhIjoxfQ.sig");
    assert!(session.take_storage_error().is_some());
    assert!(session.take_storage_error().is_none());
}

#[test]
fn read_failure_survives_the_persisting_open() {
    // Opening reads the cache (fails) and then persists the fallback token
    // (succeeds); the read error must still be there for the caller to log.
    let mut session = Session::open(WriteOnlyStorage::default());
    assert_eq!(session.token(), jwt_lens_session::SAMPLE_TOKEN);
    assert!(matches!(
        session.take_storage_error(),
        Some(StorageError::Unavailable(_))
    ));

    // A later successful edit leaves no stale error behind.
    session.set_signature("sig");
    assert!(session.take_storage_error().is_none());
}

#[test]
fn unreadable_storage_falls_back_to_sample() {
    let session = Session::open(BrokenStorage);
    assert!(session.snapshot().payload.contains("John Doe"));
}

#[test]
fn pending_edit_applies_only_the_latest() {
    let mut session = Session::open(MemoryStorage::new());
    let mut pending = PendingEdit::new();

    pending.submit(Edit::Token("YQ".to_string()));
    pending.submit(Edit::Token("YQ.Yg".to_string()));
    pending.submit(Edit::Token("YQ.Yg.sig".to_string()));

    while let Some(edit) = pending.take() {
        session.apply(&edit);
    }
    assert_eq!(session.token(), "YQ.Yg.sig");
    assert_eq!(session.snapshot().signature, "sig");
}
