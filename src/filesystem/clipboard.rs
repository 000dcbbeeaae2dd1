use anyhow::{anyhow, Result};
use copypasta::{ClipboardContext, ClipboardProvider};
use secrecy::{ExposeSecret, SecretString};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub trait ClipboardEngine: Send + Sync + 'static {
    fn get_contents(&self) -> Result<Option<String>>;
    fn set_contents(&self, contents: &str) -> Result<()>;
}

/// System clipboard through `copypasta`.
pub struct SystemClipboardEngine {
    ctx: Mutex<ClipboardContext>,
}

impl SystemClipboardEngine {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new().map_err(|e| anyhow!("clipboard unavailable: {e}"))?;
        Ok(Self {
            ctx: Mutex::new(ctx),
        })
    }

    fn with_ctx<T>(&self, op: impl FnOnce(&mut ClipboardContext) -> T) -> Result<T> {
        let mut ctx = self
            .ctx
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))?;
        Ok(op(&mut *ctx))
    }
}

impl ClipboardEngine for SystemClipboardEngine {
    fn get_contents(&self) -> Result<Option<String>> {
        // An empty or non-text clipboard reads as nothing.
        self.with_ctx(|ctx| ctx.get_contents().ok())
    }

    fn set_contents(&self, contents: &str) -> Result<()> {
        self.with_ctx(|ctx| ctx.set_contents(contents.to_string()))?
            .map_err(|e| anyhow!("clipboard write failed: {e}"))
    }
}

/// A copied password waiting to be swapped back for what the clipboard held before.
///
/// The restore fires when the TTL elapses, on [`PendingRestore::restore_now`],
/// or as soon as the handle is dropped. Contents the user copied in the
/// meantime are left alone.
pub struct PendingRestore {
    ttl: Duration,
    early: Sender<()>,
    worker: JoinHandle<()>,
}

impl PendingRestore {
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Block until the TTL elapses and the previous contents are back.
    pub fn wait(self) {
        let PendingRestore { early, worker, .. } = self;
        let _ = worker.join();
        drop(early);
    }

    /// Restore right away instead of waiting out the TTL.
    pub fn restore_now(self) {
        let _ = self.early.send(());
        let _ = self.worker.join();
    }
}

/// Put `secret` on the clipboard. Without a TTL the copy is permanent and no
/// handle is returned.
pub fn copy_secret(
    engine: Arc<dyn ClipboardEngine>,
    secret: &SecretString,
    ttl: Option<Duration>,
) -> Result<Option<PendingRestore>> {
    let Some(ttl) = ttl else {
        engine.set_contents(secret.expose_secret())?;
        return Ok(None);
    };

    let previous = engine.get_contents()?.unwrap_or_default();
    engine.set_contents(secret.expose_secret())?;

    let copied = secret.clone();
    let (early, signal) = mpsc::channel::<()>();
    let worker = thread::spawn(move || {
        // Timeout, early signal and dropped sender all end the wait.
        let _ = signal.recv_timeout(ttl);
        match engine.get_contents() {
            Ok(Some(current)) if current != copied.expose_secret() => {
                tracing::debug!("clipboard changed since copy; leaving it");
            }
            _ => {
                if let Err(e) = engine.set_contents(&previous) {
                    tracing::warn!("clipboard restore failed: {e}");
                }
            }
        }
    });

    Ok(Some(PendingRestore { ttl, early, worker }))
}

/// Why the system clipboard is probably out of reach, if it is.
pub fn environment_warning() -> Option<&'static str> {
    let present = |key: &str| std::env::var_os(key).is_some();
    if present("SSH_CONNECTION") || present("SSH_TTY") {
        return Some("remote session detected; the clipboard may not reach you (try --no-copy --echo)");
    }
    if cfg!(all(target_family = "unix", not(target_os = "macos")))
        && !present("DISPLAY")
        && !present("WAYLAND_DISPLAY")
    {
        return Some("no display server found; the clipboard may be unavailable");
    }
    None
}
