pub mod document;
pub mod tabular;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::credentials::models::CredentialRecord;

use self::document::DocumentStore;
use self::tabular::TabularStore;

/// On-disk layout of the backing file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// JSON object keyed by website, overwrite-on-save.
    #[default]
    Document,
    /// CSV with a header line, append-only.
    Tabular,
}

impl Encoding {
    pub fn file_name(self) -> &'static str {
        match self {
            Encoding::Document => "passwords.json",
            Encoding::Tabular => "passwords.csv",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Document => f.write_str("document"),
            Encoding::Tabular => f.write_str("tabular"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "json" => Ok(Encoding::Document),
            "tabular" | "csv" => Ok(Encoding::Tabular),
            other => Err(format!("unknown store encoding: {other}")),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store at {path} exists but could not be parsed: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("lookup is not supported by the {0} encoding")]
    LookupUnsupported(Encoding),
    #[error("store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode store: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of a lookup. Absence is an expected answer, not an error.
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(CredentialRecord),
    NotFound,
    StoreAbsent,
}

pub trait CredentialStore: Send + Sync {
    fn encoding(&self) -> Encoding;
    fn path(&self) -> &Path;

    fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Persist an already validated record.
    fn save(&self, record: &CredentialRecord) -> Result<(), StoreError>;

    fn lookup(&self, _website: &str) -> Result<Lookup, StoreError> {
        Err(StoreError::LookupUnsupported(self.encoding()))
    }
}

pub fn open_store(encoding: Encoding, path: PathBuf, backups: usize) -> Arc<dyn CredentialStore> {
    match encoding {
        Encoding::Document => Arc::new(DocumentStore::new_with_backups(path, backups)),
        Encoding::Tabular => Arc::new(TabularStore::new(path)),
    }
}
