use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::credentials::models::{CredentialRecord, StoredCredential};
use crate::filesystem::secure::{read_if_exists, write_with_backups_n};
use crate::store::{CredentialStore, Encoding, Lookup, StoreError};

pub type CredentialMap = BTreeMap<String, StoredCredential>;

/// Result of loading the backing file.
#[derive(Debug)]
pub enum StoreState {
    Absent,
    Present(CredentialMap),
}

pub struct DocumentStore {
    path: PathBuf,
    backups: usize,
}

impl DocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, backups: 0 }
    }

    pub fn new_with_backups(path: PathBuf, backups: usize) -> Self {
        Self { path, backups }
    }

    pub fn load(&self) -> Result<StoreState, StoreError> {
        let Some(bytes) = read_if_exists(&self.path).map_err(|e| StoreError::io(&self.path, e))?
        else {
            return Ok(StoreState::Absent);
        };
        // A blank file holds no records yet; it is not a store.
        if is_blank(&bytes) {
            return Ok(StoreState::Absent);
        }
        decode(&bytes)
            .map(StoreState::Present)
            .map_err(|source| StoreError::CorruptStore {
                path: self.path.clone(),
                source,
            })
    }
}

impl CredentialStore for DocumentStore {
    fn encoding(&self) -> Encoding {
        Encoding::Document
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        matches!(read_if_exists(&self.path), Ok(Some(bytes)) if !is_blank(&bytes))
    }

    fn save(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let mut map = match self.load()? {
            StoreState::Absent => CredentialMap::new(),
            StoreState::Present(map) => map,
        };
        let replaced = map
            .insert(record.website.clone(), record.to_stored())
            .is_some();
        let bytes = encode(&map)?;
        write_with_backups_n(&self.path, &bytes, self.backups)
            .map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            entries = map.len(),
            replaced,
            "document store rewritten"
        );
        Ok(())
    }

    fn lookup(&self, website: &str) -> Result<Lookup, StoreError> {
        match self.load()? {
            StoreState::Absent => Ok(Lookup::StoreAbsent),
            StoreState::Present(mut map) => Ok(match map.remove(website) {
                Some(stored) => Lookup::Found(CredentialRecord::from_stored(website, stored)),
                None => Lookup::NotFound,
            }),
        }
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// An empty or whitespace-only input decodes to an empty map.
pub fn decode(bytes: &[u8]) -> Result<CredentialMap, serde_json::Error> {
    if is_blank(bytes) {
        return Ok(CredentialMap::new());
    }
    serde_json::from_slice(bytes)
}

pub fn encode(map: &CredentialMap) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut ser).map_err(StoreError::Encode)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_four_space_indent() {
        let mut map = CredentialMap::new();
        map.insert(
            "x.com".into(),
            CredentialRecord::new("x.com", "a@b.com", "", "P1").to_stored(),
        );
        let text = String::from_utf8(encode(&map).unwrap()).unwrap();
        assert_eq!(
            text,
            "{\n    \"x.com\": {\n        \"email\": \"a@b.com\",\n        \"username\": \"-\",\n        \"password\": \"P1\"\n    }\n}\n"
        );
    }

    #[test]
    fn whitespace_only_decodes_empty() {
        assert!(decode(b"  \n").unwrap().is_empty());
        assert!(decode(b"").unwrap().is_empty());
        assert!(decode(b"{not json").is_err());
    }
}
