//! Application settings loaded from config.toml with environment overrides.
//!
//! The settings file is optional; every field has a default so a bare
//! checkout starts with a local SQLite file and no AI service configured
//! (all analysis then comes from the local fallback generator). Environment
//! variables take precedence over the file so deployments can override
//! individual values without editing it.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Top-level settings structure mirroring config.toml
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// SeaORM connection string
    pub database_url: String,
    /// AI collaborator settings
    pub ai: AiSettings,
    /// Identity records to seed on startup (issued by the external identity
    /// service; listed here only so a fresh instance is usable)
    pub users: Vec<SeedUser>,
}

/// Settings for the external AI scoring/question service
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Base URL of the service; None disables the remote call entirely
    pub base_url: Option<String>,
    /// Upper bound on a single AI request, in seconds
    pub timeout_secs: u64,
}

/// One user record to seed into the store if its token is not present yet
#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
    /// Display name
    pub name: String,
    /// Opaque bearer credential
    pub token: String,
    /// Role: "admin" or "user"
    #[serde(default = "default_role")]
    pub role: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            database_url: "sqlite://data/clearlabel.sqlite?mode=rwc".to_string(),
            ai: AiSettings::default(),
            users: Vec::new(),
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 3,
        }
    }
}

fn default_role() -> String {
    "user".to_string()
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from the default location (./config.toml), falling back to
/// built-in defaults when the file is absent, then applies environment
/// overrides (`CLEARLABEL_BIND`, `DATABASE_URL`, `AI_SERVICE_URL`,
/// `AI_TIMEOUT_SECS`).
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load() -> Result<Settings> {
    let mut settings = if Path::new("config.toml").exists() {
        load_from_file("config.toml")?
    } else {
        info!("No config.toml found, using built-in defaults.");
        Settings::default()
    };

    if let Ok(bind) = std::env::var("CLEARLABEL_BIND") {
        settings.bind_addr = bind;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }
    if let Ok(url) = std::env::var("AI_SERVICE_URL") {
        settings.ai.base_url = Some(url);
    }
    if let Ok(timeout) = std::env::var("AI_TIMEOUT_SECS") {
        settings.ai.timeout_secs = timeout.parse().map_err(|_| Error::Config {
            message: format!("AI_TIMEOUT_SECS must be an integer, got {timeout:?}"),
        })?;
    }

    Ok(settings)
}
