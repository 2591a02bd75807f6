//! Configuration loading
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Default EmailJS API host
pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com";

/// Default outbound HTTP timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `folio.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface to bind (e.g. "127.0.0.1")
    #[serde(default)]
    pub bind_address: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Downloadable resume served at `/resume.pdf`
    #[serde(default)]
    pub resume_path: Option<PathBuf>,

    /// Origins allowed to call the API from a browser; empty allows any
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Email relay; absent means submissions are only logged
    #[serde(default)]
    pub email: Option<EmailSettings>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive (e.g. "info", "folio_server=debug")
    #[serde(default)]
    pub level: Option<String>,
}

/// `[email]` table: EmailJS service, template and credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    pub service_id: String,

    pub template_id: String,

    /// EmailJS public key (sent as `user_id`)
    pub public_key: String,

    /// EmailJS private key (sent as `accessToken`) for strict-mode accounts
    #[serde(default)]
    pub private_key: Option<String>,

    /// Fixed destination address
    pub to_email: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_EMAILJS_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl EmailSettings {
    /// Check that every required value is non-blank
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("service_id", &self.service_id),
            ("template_id", &self.template_id),
            ("public_key", &self.public_key),
            ("to_email", &self.to_email),
            ("endpoint", &self.endpoint),
        ];

        let blank: Vec<&str> = required
            .iter()
            .filter(|(_, value)| !is_valid_key(value))
            .map(|(key, _)| *key)
            .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "[email] is missing: {}",
                blank.join(", ")
            )))
        }
    }

    /// Apply `FOLIO_EMAIL_*` environment overrides
    pub fn apply_env_overrides(&mut self) {
        override_from_env("FOLIO_EMAIL_ENDPOINT", &mut self.endpoint);
        override_from_env("FOLIO_EMAIL_SERVICE_ID", &mut self.service_id);
        override_from_env("FOLIO_EMAIL_TEMPLATE_ID", &mut self.template_id);
        override_from_env("FOLIO_EMAIL_PUBLIC_KEY", &mut self.public_key);
        override_from_env("FOLIO_EMAIL_TO", &mut self.to_email);
        if let Ok(key) = std::env::var("FOLIO_EMAIL_PRIVATE_KEY") {
            if is_valid_key(&key) {
                self.private_key = Some(key);
            }
        }
    }
}

fn override_from_env(var: &str, slot: &mut String) {
    if let Ok(value) = std::env::var(var) {
        if is_valid_key(&value) {
            debug!("{} overrides TOML value", var);
            *slot = value;
        }
    }
}

/// Validate a credential-like value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve one setting: CLI → ENV → TOML → default
///
/// Environment values that fail to parse are ignored with a warning.
pub fn resolve_setting<T>(cli: Option<T>, env_var: &str, toml: Option<T>, default: T) -> T
where
    T: FromStr,
{
    if let Some(value) = cli {
        return value;
    }

    if let Ok(raw) = std::env::var(env_var) {
        match raw.parse::<T>() {
            Ok(value) => return value,
            Err(_) => warn!("Ignoring unparseable {}={:?}", env_var, raw),
        }
    }

    toml.unwrap_or(default)
}

/// Load and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Find and load the config file
///
/// An explicitly named file must exist and parse. Without one, the platform
/// default location is tried and a missing file yields the defaults.
pub fn resolve_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_toml_config(&path)
        }
        None => {
            info!("No config file found, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Resolve the email relay from TOML plus environment overrides
///
/// Returns `None` when no `[email]` table exists or it is incomplete.
pub fn resolve_email_settings(toml: Option<EmailSettings>) -> Option<EmailSettings> {
    let mut settings = toml?;
    settings.apply_env_overrides();

    match settings.validate() {
        Ok(()) => Some(settings),
        Err(e) => {
            warn!("Email relay disabled: {}", e);
            None
        }
    }
}

/// Default configuration file path for the platform, if one exists
///
/// Linux: `~/.config/folio/folio.toml`, then `/etc/folio/folio.toml`.
/// Elsewhere: the per-user config directory only.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("folio").join("folio.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/folio/folio.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: TomlConfig = toml::from_str(
            r#"
            bind_address = "0.0.0.0"
            port = 8080
            resume_path = "/srv/resume.pdf"
            allowed_origins = ["https://example.com"]

            [logging]
            level = "debug"

            [email]
            service_id = "service_x"
            template_id = "template_y"
            public_key = "pk"
            to_email = "owner@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, Some(8080));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        let email = config.email.unwrap();
        assert_eq!(email.endpoint, DEFAULT_EMAILJS_ENDPOINT);
        assert_eq!(email.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(email.private_key.is_none());
        assert!(email.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_blank_email_fields_fail_validation() {
        let settings = EmailSettings {
            endpoint: DEFAULT_EMAILJS_ENDPOINT.into(),
            service_id: " ".into(),
            template_id: "t".into(),
            public_key: "".into(),
            private_key: None,
            to_email: "owner@example.com".into(),
            timeout_secs: 5,
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("service_id"));
        assert!(err.contains("public_key"));
        assert!(!err.contains("template_id"));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("  \t"));
    }
}
