use passform::credentials::models::CredentialRecord;
use passform::store::document::{DocumentStore, StoreState};
use passform::store::{CredentialStore, Lookup, StoreError};
use secrecy::ExposeSecret;
use std::fs;
use tempfile::tempdir;

#[test]
fn save_then_resave_overwrites_and_lookup_returns_latest() {
    let td = tempdir().unwrap();
    let store = DocumentStore::new(td.path().join("passwords.json"));

    store
        .save(&CredentialRecord::new("x.com", "a@b.com", "", "P1"))
        .unwrap();
    match store.lookup("x.com").unwrap() {
        Lookup::Found(rec) => assert_eq!(rec.username, "-"),
        other => panic!("expected Found, got {other:?}"),
    }

    store
        .save(&CredentialRecord::new("x.com", "a@b.com", "u", "P2"))
        .unwrap();
    let rec = match store.lookup("x.com").unwrap() {
        Lookup::Found(rec) => rec,
        other => panic!("expected Found, got {other:?}"),
    };
    assert_eq!(rec.website, "x.com");
    assert_eq!(rec.email, "a@b.com");
    assert_eq!(rec.username, "u");
    assert_eq!(rec.password.expose_secret(), "P2");

    let StoreState::Present(map) = store.load().unwrap() else {
        panic!("store should exist");
    };
    assert_eq!(map.len(), 1);
}

#[test]
fn identical_saves_are_idempotent() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.json");
    let store = DocumentStore::new(path.clone());
    let rec = CredentialRecord::new("site.org", "me@mail.com", "me", "pw");

    store.save(&rec).unwrap();
    let first = fs::read(&path).unwrap();
    store.save(&rec).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn absent_store_then_not_found() {
    let td = tempdir().unwrap();
    let store = DocumentStore::new(td.path().join("passwords.json"));

    assert!(!store.exists());
    assert!(matches!(store.lookup("missing.com").unwrap(), Lookup::StoreAbsent));

    store
        .save(&CredentialRecord::new("other.com", "a@b.com", "", "pw"))
        .unwrap();
    assert!(store.exists());
    assert!(matches!(store.lookup("missing.com").unwrap(), Lookup::NotFound));
}

#[test]
fn lookup_is_exact_match() {
    let td = tempdir().unwrap();
    let store = DocumentStore::new(td.path().join("passwords.json"));
    store
        .save(&CredentialRecord::new("Example.com", "a@b.com", "", "pw"))
        .unwrap();

    assert!(matches!(store.lookup("example.com").unwrap(), Lookup::NotFound));
    assert!(matches!(store.lookup(" Example.com").unwrap(), Lookup::NotFound));
    assert!(matches!(store.lookup("Example.com").unwrap(), Lookup::Found(_)));
}

#[test]
fn corrupt_store_is_reported_and_left_untouched() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.json");
    fs::write(&path, "{ this is not json").unwrap();
    let store = DocumentStore::new(path.clone());

    let err = store
        .save(&CredentialRecord::new("x.com", "a@b.com", "", "pw"))
        .unwrap_err();
    assert!(matches!(err, StoreError::CorruptStore { .. }));
    assert!(matches!(
        store.lookup("x.com"),
        Err(StoreError::CorruptStore { .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");
}

#[test]
fn keeps_other_websites_and_writes_expected_shape() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.json");
    let store = DocumentStore::new(path.clone());
    store
        .save(&CredentialRecord::new("b.com", "b@b.com", "bee", "pb"))
        .unwrap();
    store
        .save(&CredentialRecord::new("a.com", "a@a.com", "", "pa"))
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "a.com": {"email": "a@a.com", "username": "-", "password": "pa"},
            "b.com": {"email": "b@b.com", "username": "bee", "password": "pb"}
        })
    );
}

#[test]
fn blank_file_is_reported_as_absent_store() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.json");
    for blank in ["", "  \n\t\n"] {
        fs::write(&path, blank).unwrap();
        let store = DocumentStore::new(path.clone());
        assert!(!store.exists());
        assert!(matches!(store.load().unwrap(), StoreState::Absent));
        assert!(matches!(store.lookup("missing.com").unwrap(), Lookup::StoreAbsent));
    }

    let store = DocumentStore::new(path.clone());
    store
        .save(&CredentialRecord::new("x.com", "a@b.com", "", "pw"))
        .unwrap();
    assert!(store.exists());
    assert!(matches!(store.lookup("x.com").unwrap(), Lookup::Found(_)));
    assert!(matches!(store.lookup("missing.com").unwrap(), Lookup::NotFound));
}

#[test]
fn backups_keep_previous_versions() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.json");
    let store = DocumentStore::new_with_backups(path.clone(), 1);
    store
        .save(&CredentialRecord::new("x.com", "a@b.com", "", "P1"))
        .unwrap();
    store
        .save(&CredentialRecord::new("x.com", "a@b.com", "", "P2"))
        .unwrap();

    let backup = fs::read_to_string(td.path().join("passwords.json.1")).unwrap();
    assert!(backup.contains("P1"));
    assert!(fs::read_to_string(&path).unwrap().contains("P2"));
}
