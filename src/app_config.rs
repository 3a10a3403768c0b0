use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::labels::{LabelSet, DEFAULT_LABELS};
use crate::prompts::PromptTemplate;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Inference service settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Labeling settings
    #[serde(default)]
    pub labeling: LabelingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Inference service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Timeout seconds for a single request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Rate limit (requests per minute), 0 or null disables pacing
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: Option<u32>,

    // @field: Sampling temperature, model default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            requests_per_minute: default_requests_per_minute(),
            temperature: None,
        }
    }
}

/// What to do with a segment whose inference call failed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the segment out of the output
    #[default]
    Skip,
    /// Keep the segment, labeled `UNKNOWN`
    MarkUnknown,
}

/// Labeling configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LabelingConfig {
    /// Controlled vocabulary, in prompt order
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// Prompt template
    /// Placeholders: {labels}, {text}
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Failed segment handling
    #[serde(default)]
    pub on_failure: FailurePolicy,

    /// Probe the service before labeling
    #[serde(default = "default_true")]
    pub check_connection: bool,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            prompt_template: default_prompt_template(),
            on_failure: FailurePolicy::default(),
            check_connection: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.3:latest".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_requests_per_minute() -> Option<u32> {
    Some(60) // one request per second
}

fn default_labels() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|l| l.to_string()).collect()
}

fn default_prompt_template() -> String {
    PromptTemplate::CRICKET_CLASSIFIER.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.provider.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.provider.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!("Endpoint must use http or https: {}", self.provider.endpoint));
        }

        if self.provider.model.trim().is_empty() {
            return Err(anyhow!("Model name must not be empty"));
        }

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if let Some(temperature) = self.provider.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(anyhow!("temperature must be between 0.0 and 2.0, got {}", temperature));
            }
        }

        self.label_set()?;
        self.prompt_template()?;

        Ok(())
    }

    /// Build the controlled vocabulary
    pub fn label_set(&self) -> Result<LabelSet> {
        LabelSet::new(&self.labeling.labels).context("Invalid labeling.labels")
    }

    /// Build the prompt template
    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        PromptTemplate::new(&self.labeling.prompt_template).context("Invalid labeling.prompt_template")
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig::default(),
            labeling: LabelingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
