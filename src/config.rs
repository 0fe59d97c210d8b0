//! Configuration loading for classify-petition.
//!
//! Configuration is loaded from a TOML file with the following resolution order:
//! 1. `--config <path>` (CLI flag, or `PETITION_CLASSIFIER_CONFIG`)
//! 2. `<user config dir>/petition-classifier/config.toml` (if present)
//! 3. Built-in defaults
//!
//! Every field has a default, so an empty file is a valid configuration.
//! Process environment is consulted in exactly one place,
//! [`Config::backend_config`], which turns the file settings into a
//! [`BackendConfig`] for the backend constructor.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::model::{
    DEFAULT_HYPOTHESIS_TEMPLATE, DEFAULT_MAX_LENGTH, Device, LocalZeroShotModel, default_cache_dir,
};
use crate::types::DEFAULT_CATEGORIES;
use crate::{PetitionError, Result};

/// Environment variable holding the bearer token for the remote backend.
pub const DEFAULT_TOKEN_ENV: &str = "HF_TOKEN";

/// Default base URL for the HuggingFace Inference API.
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Default remote zero-shot model.
pub const DEFAULT_REMOTE_MODEL: &str = "facebook/bart-large-mnli";

/// Default remote request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which classification backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum BackendKind {
    /// Hosted HuggingFace inference API.
    #[default]
    Remote,
    /// In-process ONNX model.
    Local,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendKind,
    /// Log filter used when `RUST_LOG` is not set (default: "warn").
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub local: LocalSettings,
    #[serde(default)]
    pub classification: ClassificationSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            log_filter: default_log_filter(),
            remote: RemoteSettings::default(),
            local: LocalSettings::default(),
            classification: ClassificationSettings::default(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Remote backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSettings {
    /// Model ID on the inference API (default: facebook/bart-large-mnli).
    #[serde(default = "default_remote_model")]
    pub model: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Environment variable the token is read from (default: HF_TOKEN).
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            model: default_remote_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            token_env: default_token_env(),
        }
    }
}

fn default_remote_model() -> String {
    DEFAULT_REMOTE_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

/// Local backend settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalSettings {
    /// Built-in model name, or "custom" with explicit paths.
    #[serde(default = "default_local_model")]
    pub model: String,
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub tokenizer_path: Option<PathBuf>,
    /// Entailment logit index for custom models (default: 2, MNLI order).
    #[serde(default)]
    pub entailment_index: Option<usize>,
    /// Token limit for custom models (default: 512).
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Device to use: "cpu", "cuda" or "cuda:N" (default: "cpu").
    #[serde(default = "default_device")]
    pub device: String,
    /// Directory for model downloads.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_hypothesis_template")]
    pub hypothesis_template: String,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            model: default_local_model(),
            model_path: None,
            tokenizer_path: None,
            entailment_index: None,
            max_length: None,
            device: default_device(),
            cache_dir: None,
            hypothesis_template: default_hypothesis_template(),
        }
    }
}

fn default_local_model() -> String {
    "bart-large-mnli".to_string()
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_hypothesis_template() -> String {
    DEFAULT_HYPOTHESIS_TEMPLATE.to_string()
}

/// Classification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationSettings {
    /// Department labels used when a request carries no `categories`.
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            default_categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Command-line overrides applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<BackendKind>,
    /// Model for whichever backend ends up selected.
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved settings for the remote backend.
#[derive(Clone)]
pub struct RemoteConfig {
    pub token: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("token", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resolved settings for the local backend.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub model: LocalZeroShotModel,
    pub device: Device,
    pub cache_dir: PathBuf,
    pub hypothesis_template: String,
}

/// Everything a backend constructor needs, with environment already read.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Remote(RemoteConfig),
    Local(LocalConfig),
}

impl BackendConfig {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Remote(_) => BackendKind::Remote,
            Self::Local(_) => BackendKind::Local,
        }
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `<user config dir>/petition-classifier/config.toml`
    /// 3. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PetitionError::Configuration(format!("Failed to parse config: {e}")))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PetitionError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            PetitionError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(PetitionError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        Ok(dirs::config_dir()
            .map(|dir| dir.join("petition-classifier").join("config.toml"))
            .filter(|path| path.exists()))
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(model) = overrides.model {
            match self.backend {
                BackendKind::Remote => self.remote.model = model,
                BackendKind::Local => self.local.model = model,
            }
        }
        if let Some(base_url) = overrides.base_url {
            self.remote.base_url = base_url;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.remote.timeout_secs = timeout_secs;
        }
    }

    /// Department labels used when a request carries none.
    pub fn default_categories(&self) -> &[String] {
        &self.classification.default_categories
    }

    /// Resolve backend settings, reading the token from the process environment.
    pub fn backend_config(&self) -> Result<BackendConfig> {
        self.backend_config_with(|name| std::env::var(name).ok())
    }

    /// Resolve backend settings with an explicit environment lookup.
    ///
    /// Fails with [`PetitionError::MissingToken`] when the remote backend is
    /// selected and its token variable is unset or blank.
    pub fn backend_config_with<F>(&self, env: F) -> Result<BackendConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.classification.default_categories.is_empty() {
            return Err(PetitionError::Configuration(
                "classification.default_categories must not be empty".to_string(),
            ));
        }

        match self.backend {
            BackendKind::Remote => self.remote_config(env).map(BackendConfig::Remote),
            BackendKind::Local => self.local_config().map(BackendConfig::Local),
        }
    }

    fn remote_config<F>(&self, env: F) -> Result<RemoteConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = &self.remote;

        let token = env(&settings.token_env)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PetitionError::MissingToken(settings.token_env.clone()))?;

        if settings.timeout_secs == 0 {
            return Err(PetitionError::Configuration(
                "remote.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(RemoteConfig {
            token,
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    fn local_config(&self) -> Result<LocalConfig> {
        let settings = &self.local;

        let model = match settings.model.as_str() {
            "custom" => {
                let (Some(model_path), Some(tokenizer_path)) =
                    (&settings.model_path, &settings.tokenizer_path)
                else {
                    return Err(PetitionError::Configuration(
                        "custom local model needs local.model_path and local.tokenizer_path"
                            .to_string(),
                    ));
                };
                LocalZeroShotModel::Custom {
                    model_path: model_path.clone(),
                    tokenizer_path: tokenizer_path.clone(),
                    entailment_index: settings.entailment_index.unwrap_or(2),
                    max_length: settings.max_length.unwrap_or(DEFAULT_MAX_LENGTH),
                }
            }
            name => LocalZeroShotModel::from_name(name).ok_or_else(|| {
                PetitionError::Configuration(format!("unknown local model '{name}'"))
            })?,
        };

        Ok(LocalConfig {
            model,
            device: settings.device.parse()?,
            cache_dir: settings.cache_dir.clone().unwrap_or_else(default_cache_dir),
            hypothesis_template: settings.hypothesis_template.clone(),
        })
    }
}
