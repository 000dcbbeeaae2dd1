use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::generator::alphabets::{Alphabets, DEFAULT_DIGITS, DEFAULT_LETTERS, DEFAULT_SYMBOLS};
use crate::store::Encoding;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub store_path: Option<String>,
    pub encoding: Option<Encoding>,
    pub default_email: Option<String>,
    pub default_username: Option<String>,
    pub clipboard_ttl: Option<u64>,
    pub backups: Option<usize>,
    // Generator alphabets (optional)
    pub letters: Option<String>,
    pub digits: Option<String>,
    pub symbols: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub encoding: Encoding,
    pub default_email: Option<String>,
    pub default_username: Option<String>,
    pub clipboard_ttl: Option<u64>,
    pub backups: usize,
    pub alphabets: Alphabets,
}

impl Config {
    pub fn create(path: Option<PathBuf>, encoding: Option<Encoding>) -> Result<Self, ConfigError> {
        // 1) Load config file if present
        let file_cfg = load_file_config();

        // 2) Encoding precedence: CLI > env > config file > document
        let encoding = match encoding {
            Some(e) => e,
            None => match env::var("PASSFORM_ENCODING") {
                Ok(s) => s.parse::<Encoding>().map_err(|reason| ConfigError::Invalid {
                    key: "PASSFORM_ENCODING",
                    reason,
                })?,
                Err(_) => file_cfg.encoding.unwrap_or_default(),
            },
        };

        // 3) Store path precedence: CLI > env > config file > platform default
        let store_path = path
            .or_else(|| env::var("PASSFORM_STORE_PATH").ok().map(PathBuf::from))
            .or_else(|| file_cfg.store_path.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| default_store_path(encoding));

        let default_email = env::var("PASSFORM_DEFAULT_EMAIL")
            .ok()
            .or(file_cfg.default_email);
        let default_username = env::var("PASSFORM_DEFAULT_USERNAME")
            .ok()
            .or(file_cfg.default_username);

        let clipboard_ttl = env_number::<u64>("PASSFORM_CLIP_TTL")?.or(file_cfg.clipboard_ttl);
        let backups = env_number::<usize>("PASSFORM_BACKUPS")?
            .or(file_cfg.backups)
            .unwrap_or(0);

        let alphabets = Alphabets::new(
            file_cfg.letters.as_deref().unwrap_or(DEFAULT_LETTERS),
            file_cfg.digits.as_deref().unwrap_or(DEFAULT_DIGITS),
            file_cfg.symbols.as_deref().unwrap_or(DEFAULT_SYMBOLS),
        );
        for (key, class) in [
            ("letters", &alphabets.letters),
            ("digits", &alphabets.digits),
            ("symbols", &alphabets.symbols),
        ] {
            if class.is_empty() {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "alphabet must not be empty".to_string(),
                });
            }
        }

        tracing::debug!(
            store = %store_path.display(),
            %encoding,
            backups,
            "configuration resolved"
        );

        Ok(Config {
            store_path,
            encoding,
            default_email,
            default_username,
            clipboard_ttl,
            backups,
            alphabets,
        })
    }

    pub fn clipboard_ttl(&self) -> Option<Duration> {
        self.clipboard_ttl.map(Duration::from_secs)
    }
}

// Unset means "not overridden"; set but unparsable is an error, like PASSFORM_ENCODING.
fn env_number<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key,
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

fn load_file_config() -> FileConfig {
    let (_, cfg) = load_file_config_with_path();
    cfg
}

pub fn load_file_config_with_path() -> (PathBuf, FileConfig) {
    // Allow tests/users to override config dir via PASSFORM_CONFIG_DIR; else use platform default
    let cfg_dir = if let Ok(p) = env::var("PASSFORM_CONFIG_DIR") {
        PathBuf::from(p)
    } else {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    let path = cfg_dir.join("passform").join("config.toml");
    let cfg = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<FileConfig>(&s).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring unparsable config: {e}");
            FileConfig::default()
        }),
        Err(_) => FileConfig::default(),
    };
    (path, cfg)
}

fn default_store_path(encoding: Encoding) -> PathBuf {
    // Prefer platform data_dir, allow override via PASSFORM_DATA_DIR, fallback to ~/.passform/
    let file = encoding.file_name();
    if let Ok(base) = env::var("PASSFORM_DATA_DIR") {
        return PathBuf::from(base).join("passform").join(file);
    }
    if let Some(mut p) = dirs::data_dir() {
        p.push("passform");
        p.push(file);
        return p;
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&home).join(".passform").join(file)
}
