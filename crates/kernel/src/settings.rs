use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::content_store::DEFAULT_STORAGE_KEY;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "WRP_ENV";
const CONFIG_DIR_ENV: &str = "WRP_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub forms: FormsSettings,
    #[serde(default)]
    pub admin: AdminSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load from an explicit config directory and environment name.
    pub fn load_from(config_dir: &std::path::Path, environment: &str) -> anyhow::Result<Self> {
        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{environment}.toml"));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(config::Environment::with_prefix("WRP").separator("__"));

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Fragment the navigator starts from.
    #[serde(default)]
    pub initial_fragment: String,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            initial_fragment: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "StorageSettings::default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "StorageSettings::default_key")]
    pub key: String,
}

impl StorageSettings {
    fn default_data_dir() -> PathBuf {
        PathBuf::from("data")
    }

    fn default_key() -> String {
        DEFAULT_STORAGE_KEY.to_string()
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            key: Self::default_key(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// Fallback filter directive when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Outbound endpoints for the visitor-facing forms.
#[derive(Debug, Clone, Deserialize)]
pub struct FormsSettings {
    #[serde(default = "FormsSettings::default_contact")]
    pub contact: Option<String>,
    #[serde(default = "FormsSettings::default_submissions")]
    pub submissions: Option<String>,
    #[serde(default = "FormsSettings::default_press")]
    pub press: Option<String>,
    #[serde(default = "FormsSettings::default_bookings")]
    pub bookings: Option<String>,
    #[serde(default)]
    pub newsletter: Option<String>,
    #[serde(default = "FormsSettings::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl FormsSettings {
    fn default_contact() -> Option<String> {
        Some("https://formspree.io/f/mykyzeye".to_string())
    }

    fn default_submissions() -> Option<String> {
        Some("https://formspree.io/f/mgoevael".to_string())
    }

    fn default_press() -> Option<String> {
        Some("https://formspree.io/f/meeqoaqk".to_string())
    }

    fn default_bookings() -> Option<String> {
        Some("https://formspree.io/f/xbdjlgjw".to_string())
    }

    fn default_timeout_ms() -> u64 {
        10000
    }
}

impl Default for FormsSettings {
    fn default() -> Self {
        Self {
            contact: Self::default_contact(),
            submissions: Self::default_submissions(),
            press: Self::default_press(),
            bookings: Self::default_bookings(),
            newsletter: None,
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminSettings {
    #[serde(default)]
    pub mode: AdminMode,
}

/// How admin mode is granted.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AdminMode {
    /// Anyone may switch admin mode on; there is no credential check.
    #[default]
    DemoToggle,
    /// Admin mode can never be enabled.
    Disabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_storage_key_is_versioned() {
        let settings = Settings::default();
        assert_eq!(settings.storage.key, "wrp_cms_data_v1");
        assert_eq!(settings.storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn newsletter_has_no_default_endpoint() {
        let forms = FormsSettings::default();
        assert!(forms.contact.is_some());
        assert!(forms.newsletter.is_none());
    }

    #[test]
    fn files_are_layered_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[server]\nport = 9090\n[admin]\nmode = \"disabled\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.toml"),
            "[storage]\nkey = \"staging_slot\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(dir.path(), "staging").unwrap();

        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.storage.key, "staging_slot");
        assert_eq!(settings.admin.mode, AdminMode::Disabled);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load_from(dir.path(), "moon").is_err());
    }
}
