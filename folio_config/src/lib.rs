use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use config::{File, FileFormat};
use folio_models::{celebration::ConfettiOptions, validation::ValidationRules};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of config files.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

/// Loads the config files listed in `FOLIO_CONFIG`, falling back to the
/// bundled `config.toml`. Later files override earlier ones.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };
    load_with_overrides(&paths, &[])
}

pub fn load_with_overrides(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let config = overrides
        .iter()
        .fold(builder, |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    config.relay.ensure_provider_configured()?;

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub relay: RelayConfig,
    pub notification: NotificationConfig,
    pub celebration: CelebrationConfig,
    pub messages: MessagesConfig,
    pub validation: ValidationRules,
}

#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    pub provider: RelayProvider,
    pub emailjs: Option<EmailJsConfig>,
    pub formspree: Option<FormspreeConfig>,
}

impl RelayConfig {
    fn ensure_provider_configured(&self) -> anyhow::Result<()> {
        let configured = match self.provider {
            RelayProvider::EmailJs => self.emailjs.is_some(),
            RelayProvider::Formspree => self.formspree.is_some(),
        };
        configured.then_some(()).ok_or_else(|| {
            anyhow!(
                "Relay provider {:?} is selected but relay.{} is missing",
                self.provider,
                self.provider.as_str()
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RelayProvider {
    #[serde(rename = "emailjs")]
    EmailJs,
    #[serde(rename = "formspree")]
    Formspree,
}

impl RelayProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmailJs => "emailjs",
            Self::Formspree => "formspree",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct FormspreeConfig {
    pub endpoint: Url,
}

#[derive(Debug, Deserialize)]
pub struct NotificationConfig {
    pub ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct CelebrationConfig {
    pub enable: bool,
    #[serde(flatten)]
    pub confetti: ConfettiOptions,
}

#[derive(Debug, Deserialize)]
pub struct MessagesConfig {
    pub success: String,
    pub failure: String,
}
