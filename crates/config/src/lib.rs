//! Configuration loading, validation, and management for UniAssist.
//!
//! Loads configuration from `~/.uniassist/config.toml` (or an explicit path)
//! and fills unset fields from environment variables. Everything is read
//! once at startup; the rest of the workspace receives plain values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The job portal the search assistant reads from unless configured otherwise.
pub const DEFAULT_PORTAL_URL: &str = "https://www.linkedin.com/jobs/search/?currentJobId=4118244113&geoId=103363366&origin=JOB_SEARCH_PAGE_LOCATION_AUTOCOMPLETE&refresh=true";

/// The root configuration structure.
///
/// Maps directly to `~/.uniassist/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Document and history file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Sender/receiver identity for the email assistant
    #[serde(default)]
    pub email: EmailConfig,

    /// Job portal settings
    #[serde(default)]
    pub job_search: JobSearchConfig,

    /// Shared assistant behavior
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "groq".into()
}
fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}

/// Debug stand-in for a secret: shows whether it is set, never its value.
struct Secret<'a>(&'a Option<String>);

impl std::fmt::Debug for Secret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.0.is_some() { "[REDACTED]" } else { "None" })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &Secret(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("paths", &self.paths)
            .field("email", &self.email)
            .field("job_search", &self.job_search)
            .field("assistant", &self.assistant)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &Secret(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("sender_passkey", &Secret(&self.sender_passkey))
            .field("receiver_email", &self.receiver_email)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// The reference document (PDF, text, or markdown)
    #[serde(default = "default_document_path")]
    pub document: PathBuf,

    /// Live conversation history (rewritten after every turn)
    #[serde(default = "default_history_path")]
    pub history: PathBuf,

    /// Read-only dataset of past seasons
    #[serde(default = "default_reference_path")]
    pub reference_dataset: PathBuf,
}

fn default_document_path() -> PathBuf {
    PathBuf::from("DIU.pdf")
}
fn default_history_path() -> PathBuf {
    PathBuf::from("conversation_history.json")
}
fn default_reference_path() -> PathBuf {
    PathBuf::from("data.json")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            document: default_document_path(),
            history: default_history_path(),
            reference_dataset: default_reference_path(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_passkey: Option<String>,

    /// The single fixed recipient of every drafted email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_email: Option<String>,

    /// SMTP server the sender authenticates against
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// 465 connects over implicit TLS; any other port upgrades with STARTTLS
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".into()
}
fn default_smtp_port() -> u16 {
    465
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_email: None,
            sender_name: None,
            sender_passkey: None,
            receiver_email: None,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchConfig {
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_portal_url() -> String {
    DEFAULT_PORTAL_URL.into()
}
fn default_fetch_timeout() -> u64 {
    30
}

impl Default for JobSearchConfig {
    fn default() -> Self {
        Self {
            portal_url: default_portal_url(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// How many earlier exchanges each assistant replays
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,

    /// Tool-call round trips allowed per run
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: u32,

    #[serde(default = "default_true")]
    pub show_tool_calls: bool,

    #[serde(default = "default_true")]
    pub markdown: bool,
}

fn default_history_turns() -> usize {
    3
}
fn default_max_tool_iterations() -> u32 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            history_turns: default_history_turns(),
            max_tool_iterations: default_max_tool_iterations(),
            show_tool_calls: true,
            markdown: true,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.uniassist/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load from `path`, then apply environment overrides.
    ///
    /// Reads, in order of precedence for unset fields:
    /// - `UNIASSIST_API_KEY`, then `GROQ_API_KEY`
    /// - `SENDER_EMAIL`, `SENDER_NAME`, `SENDER_PASSKEY`, `RECEIVER_EMAIL`
    ///
    /// `UNIASSIST_PROVIDER` and `UNIASSIST_MODEL` always win.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Fill unset fields from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = lookup("UNIASSIST_API_KEY").or_else(|| lookup("GROQ_API_KEY"));
        }

        if let Some(provider) = lookup("UNIASSIST_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = lookup("UNIASSIST_MODEL") {
            self.default_model = model;
        }

        let email = &mut self.email;
        for (slot, key) in [
            (&mut email.sender_email, "SENDER_EMAIL"),
            (&mut email.sender_name, "SENDER_NAME"),
            (&mut email.sender_passkey, "SENDER_PASSKEY"),
            (&mut email.receiver_email, "RECEIVER_EMAIL"),
        ] {
            if slot.is_none() {
                *slot = lookup(key);
            }
        }
    }

    /// `~/.uniassist`, home of `config.toml`.
    pub fn config_dir() -> PathBuf {
        home_dir().join(".uniassist")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.assistant.max_tool_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.max_tool_iterations must be at least 1".into(),
            ));
        }

        let url = &self.job_search.portal_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "job_search.portal_url must start with http:// or https://, got {url}"
            )));
        }

        Ok(())
    }

    /// Whether the default provider has a key, globally or in its own table.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
            || self
                .providers
                .get(&self.default_provider)
                .is_some_and(|p| p.api_key.is_some())
    }

    /// Defaults rendered as TOML, written by `onboard`.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            paths: PathsConfig::default(),
            email: EmailConfig::default(),
            job_search: JobSearchConfig::default(),
            assistant: AssistantConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// `$HOME` (or `%USERPROFILE%`), falling back to the working directory.
fn home_dir() -> PathBuf {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .find_map(|key| std::env::var_os(key).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
