use std::path::{Path, PathBuf};

use crate::credentials::models::CredentialRecord;
use crate::filesystem::secure::append_secure;
use crate::store::{CredentialStore, Encoding, StoreError};

pub const HEADER: &str = "website,email,username,password";

/// Append-only CSV store. Rows are never deduplicated.
pub struct TabularStore {
    path: PathBuf,
}

impl TabularStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for TabularStore {
    fn encoding(&self) -> Encoding {
        Encoding::Tabular
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        if !self.exists() {
            append_secure(&self.path, &format!("{HEADER}\n"))
                .map_err(|e| StoreError::io(&self.path, e))?;
            tracing::debug!(path = %self.path.display(), "tabular store created");
        }
        append_secure(&self.path, &format_row(&record.fields()))
            .map_err(|e| StoreError::io(&self.path, e))
    }
}

/// One CSV row with a trailing newline. Fields are quoted only when needed.
pub fn format_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
