use anyhow::{anyhow, Result};
use inquire::{Confirm, Password, Text};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::task::spawn_blocking;

use crate::config::app_config::Config;
use crate::credentials::models::FormState;
use crate::credentials::notice::Notice;
use crate::filesystem::clipboard::{environment_warning, ClipboardEngine, SystemClipboardEngine};
use crate::generator::generator::{DefaultPasswordGenerator, PasswordGenerator, SystemRng};
use crate::manager::service::PasswordManager;
use crate::store::{open_store, Lookup};

/// Wire the default adapters for `config`. Without `with_clipboard` nothing is copied.
pub fn compose_service(config: &Config, with_clipboard: bool) -> PasswordManager {
    let store = open_store(config.encoding, config.store_path.clone(), config.backups);
    let generator: Arc<dyn PasswordGenerator> = Arc::new(DefaultPasswordGenerator::new(
        Arc::new(SystemRng),
        config.alphabets.clone(),
    ));
    let clipboard = if with_clipboard {
        system_clipboard()
    } else {
        None
    };
    PasswordManager::new(store, generator, clipboard).with_clipboard_ttl(config.clipboard_ttl())
}

fn system_clipboard() -> Option<Arc<dyn ClipboardEngine>> {
    if let Some(warn) = environment_warning() {
        eprintln!("⚠️ {warn}");
    }
    match SystemClipboardEngine::new() {
        Ok(engine) => Some(Arc::new(engine) as Arc<dyn ClipboardEngine>),
        Err(e) => {
            eprintln!("⚠️ Clipboard not available: {e}");
            None
        }
    }
}

// Options for the save command, constructed by CLI layer
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub website: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub generate: bool,
    pub yes: bool,
    pub no_copy: bool,
}

pub struct Manager<'a> {
    config: &'a Config,
}

impl<'a> Manager<'a> {
    pub fn create(config: &'a Config) -> Self {
        Manager { config }
    }

    pub async fn handle_generate(&self, no_copy: bool, echo: bool) -> Result<()> {
        let service = Arc::new(compose_service(self.config, !no_copy));
        let password = service.generate_password()?;
        if echo {
            println!("{}", password.expose_secret());
        } else if no_copy {
            eprintln!("ℹ️ Nothing to do: use --echo to print the password or drop --no-copy.");
        } else {
            println!("🔑 Password generated and copied to clipboard.");
        }
        settle_clipboard(service).await
    }

    pub async fn handle_save(&self, opts: SaveOptions) -> Result<()> {
        let service = Arc::new(compose_service(self.config, !opts.no_copy));

        let website = match opts.website {
            Some(w) => w,
            None => Text::new("Website").prompt()?,
        };
        let email = match opts.email {
            Some(e) => e,
            None => {
                let default = self.config.default_email.clone().unwrap_or_default();
                Text::new("Email").with_default(&default).prompt()?
            }
        };
        let username = match opts.username {
            Some(u) => u,
            None => {
                let default = self.config.default_username.clone().unwrap_or_default();
                Text::new("Username (optional)")
                    .with_default(&default)
                    .prompt()?
            }
        };
        let password = if opts.generate {
            let secret = service.generate_password()?;
            secret.expose_secret().to_string()
        } else if let Some(p) = opts.password {
            p
        } else {
            Password::new("Password")
                .without_confirmation()
                .prompt()?
        };

        let form = FormState {
            website,
            email,
            username,
            password,
        };
        let record = match service.prepare(&form) {
            Ok(r) => r,
            Err(e) => {
                let notice = Notice::MissingFields(e);
                eprintln!("⚠️ {}: {}", notice.title(), notice.message());
                return settle_clipboard(service).await;
            }
        };

        if !opts.yes {
            let notice = Notice::ConfirmSave(record.clone());
            println!("{}\n\n{}", notice.title(), notice.message());
            let proceed = Confirm::new("Save this entry?")
                .with_default(false)
                .prompt()?;
            if !proceed {
                println!("❎ Save cancelled.");
                return settle_clipboard(service).await;
            }
        }

        let svc = service.clone();
        spawn_blocking(move || svc.save(&record))
            .await
            .map_err(|_| anyhow!("task join error"))??;
        println!("✅ {}", Notice::Saved.message());
        settle_clipboard(service).await
    }

    pub async fn handle_lookup(&self, website: &str, no_copy: bool, echo: bool) -> Result<()> {
        let service = Arc::new(compose_service(self.config, !no_copy));
        let key = website.to_string();
        let svc = service.clone();
        let outcome = spawn_blocking(move || svc.lookup(&key))
            .await
            .map_err(|_| anyhow!("task join error"))??;

        match outcome {
            Lookup::Found(record) => {
                println!("Website:  {}", record.website);
                println!("Email:    {}", record.email);
                println!("Username: {}", record.username);
                if echo {
                    println!("Password: {}", record.password.expose_secret());
                } else if no_copy {
                    println!("Password: ******** (use --echo to show)");
                } else {
                    println!("Password: copied to clipboard");
                }
            }
            Lookup::NotFound => {
                println!("❌ {}", Notice::NotFound(website.to_string()).message());
            }
            Lookup::StoreAbsent => {
                println!("❌ {}", Notice::StoreAbsent.message());
            }
        }
        settle_clipboard(service).await
    }
}

/// Keep the process alive until a clipboard TTL has run out and the previous
/// contents are back; a detached restore would die with the process.
async fn settle_clipboard(service: Arc<PasswordManager>) -> Result<()> {
    let Some(ttl) = service.pending_restore_ttl() else {
        return Ok(());
    };
    eprintln!(
        "⏳ Clipboard will be restored in {}s; interrupting keeps the password copied.",
        ttl.as_secs()
    );
    spawn_blocking(move || service.settle_clipboard())
        .await
        .map_err(|_| anyhow!("task join error"))
}
