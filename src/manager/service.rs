use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::credentials::models::{CredentialRecord, FormState};
use crate::credentials::validation::{validate, ValidationError};
use crate::filesystem::clipboard::{copy_secret, ClipboardEngine, PendingRestore};
use crate::generator::generator::PasswordGenerator;
use crate::store::{CredentialStore, Lookup};

/// Composes generator, store and clipboard into the form-submit sequence:
/// generate → prepare (normalize + validate) → confirm (caller) → save → reset (caller).
pub struct PasswordManager {
    store: Arc<dyn CredentialStore>,
    generator: Arc<dyn PasswordGenerator>,
    clipboard: Option<Arc<dyn ClipboardEngine>>,
    clipboard_ttl: Option<Duration>,
    pending_restore: Mutex<Option<PendingRestore>>,
}

impl PasswordManager {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        generator: Arc<dyn PasswordGenerator>,
        clipboard: Option<Arc<dyn ClipboardEngine>>,
    ) -> Self {
        Self {
            store,
            generator,
            clipboard,
            clipboard_ttl: None,
            pending_restore: Mutex::new(None),
        }
    }

    pub fn with_clipboard_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.clipboard_ttl = ttl;
        self
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// New password, copied to the clipboard whether or not the caller keeps it.
    pub fn generate_password(&self) -> Result<SecretString> {
        let password = self
            .generator
            .generate()
            .context("password generation failed")?;
        let secret = SecretString::new(password.into());
        self.copy_to_clipboard(&secret);
        tracing::info!("generated password");
        Ok(secret)
    }

    /// Normalize and validate the form. No I/O happens here.
    pub fn prepare(&self, form: &FormState) -> Result<CredentialRecord, ValidationError> {
        let record = form.to_record();
        validate(&record)?;
        Ok(record)
    }

    pub fn save(&self, record: &CredentialRecord) -> Result<()> {
        self.store.save(record).with_context(|| {
            format!(
                "failed to save '{}' to {}",
                record.website,
                self.store.path().display()
            )
        })?;
        tracing::info!(website = %record.website, encoding = %self.store.encoding(), "record saved");
        Ok(())
    }

    /// Exact-match lookup. A found password is copied to the clipboard.
    pub fn lookup(&self, website: &str) -> Result<Lookup> {
        let outcome = self
            .store
            .lookup(website)
            .with_context(|| format!("failed to look up '{website}'"))?;
        match &outcome {
            Lookup::Found(record) => {
                self.copy_to_clipboard(&record.password);
                tracing::info!(%website, "lookup found");
            }
            Lookup::NotFound => tracing::info!(%website, "lookup: not found"),
            Lookup::StoreAbsent => tracing::info!(%website, "lookup: store absent"),
        }
        Ok(outcome)
    }

    /// TTL of the copy still waiting to be undone, if any.
    pub fn pending_restore_ttl(&self) -> Option<Duration> {
        self.pending_restore
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(PendingRestore::ttl))
    }

    /// Block until a pending clipboard restore has happened.
    pub fn settle_clipboard(&self) {
        if let Some(pending) = self.take_pending_restore() {
            pending.wait();
        }
    }

    /// Undo a pending copy immediately.
    pub fn restore_clipboard_now(&self) {
        if let Some(pending) = self.take_pending_restore() {
            pending.restore_now();
        }
    }

    fn take_pending_restore(&self) -> Option<PendingRestore> {
        self.pending_restore.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Clipboard failures never fail the calling operation.
    fn copy_to_clipboard(&self, secret: &SecretString) {
        let Some(engine) = self.clipboard.clone() else {
            return;
        };
        // An older copy is undone first so its restore cannot clobber this one.
        self.restore_clipboard_now();
        match copy_secret(engine, secret, self.clipboard_ttl) {
            Ok(pending) => {
                if let Ok(mut slot) = self.pending_restore.lock() {
                    *slot = pending;
                }
            }
            Err(e) => tracing::warn!("clipboard copy failed: {e}"),
        }
    }
}
