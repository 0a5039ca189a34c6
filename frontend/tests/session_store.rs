use std::sync::Arc;

use port_agency_frontend::services::{FileSessionStore, Session, SessionContext, SessionStore, SessionUser};

fn session() -> Session {
    Session {
        token: "tok-file".to_string(),
        user: SessionUser {
            id: Some("7".to_string()),
            username: "ops".to_string(),
            full_name: "Operations".to_string(),
            role: "admin".to_string(),
        },
    }
}

#[test]
fn test_file_store_round_trip_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");
    let store = FileSessionStore::new(&path);

    assert_eq!(store.load().unwrap(), None);
    store.save(&session()).unwrap();
    assert!(path.exists());
    assert_eq!(store.load().unwrap(), Some(session()));

    store.clear().unwrap();
    assert!(!path.exists());
    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = SessionContext::new(Arc::new(FileSessionStore::new(&path)));
    first.begin(session()).unwrap();

    let second = SessionContext::restore(Arc::new(FileSessionStore::new(&path)));
    assert_eq!(second.token().as_deref(), Some("tok-file"));

    second.end();
    let third = SessionContext::restore(Arc::new(FileSessionStore::new(&path)));
    assert!(!third.is_authenticated());
}

#[test]
fn test_corrupt_session_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    assert!(FileSessionStore::new(&path).load().is_err());
    let context = SessionContext::restore(Arc::new(FileSessionStore::new(&path)));
    assert!(!context.is_authenticated());
}
