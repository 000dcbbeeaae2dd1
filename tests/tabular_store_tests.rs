use passform::credentials::models::CredentialRecord;
use passform::store::tabular::TabularStore;
use passform::store::{open_store, CredentialStore, Encoding};
use std::fs;
use tempfile::tempdir;

#[test]
fn header_written_once_and_rows_appended() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.csv");
    let store = TabularStore::new(path.clone());
    let rec = CredentialRecord::new("x.com", "a@b.com", "", "P1");

    store.save(&rec).unwrap();
    store.save(&rec).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "website,email,username,password\nx.com,a@b.com,-,P1\nx.com,a@b.com,-,P1\n"
    );
}

#[test]
fn existing_file_is_appended_without_new_header() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.csv");
    fs::write(&path, "website,email,username,password\nold.com,o@o.com,-,x\n").unwrap();

    let store = open_store(Encoding::Tabular, path.clone(), 0);
    store
        .save(&CredentialRecord::new("new.com", "n@n.com", "nu", "y"))
        .unwrap();

    let lines: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "website,email,username,password",
            "old.com,o@o.com,-,x",
            "new.com,n@n.com,nu,y",
        ]
    );
}

#[test]
fn passwords_with_commas_are_quoted() {
    let td = tempdir().unwrap();
    let path = td.path().join("passwords.csv");
    let store = TabularStore::new(path.clone());
    store
        .save(&CredentialRecord::new("x.com", "a@b.com", "u", "a,b"))
        .unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("x.com,a@b.com,u,\"a,b\"\n"));
}
