mod file_config;

pub use file_config::{FileConfig, LlmConfig};

use crate::llm::{ApiKeySource, CompletionOptions};
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SEC: u64 = 30;
const DEFAULT_LLM_TEMPERATURE: f32 = 0.7;
const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub profiles_path: Option<PathBuf>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file the artist profiles are loaded from.
    pub profiles_path: PathBuf,
    /// Base URL of the generative service, when one is configured.
    pub llm_base_url: Option<String>,
    /// Generative path settings (with defaults).
    pub llm: LlmSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        // TOML overrides CLI for each field
        let profiles_path = file
            .profiles_path
            .map(PathBuf::from)
            .or_else(|| cli.profiles_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "profiles_path must be specified on the command line or in the config file"
                )
            })?;

        // Validate the profiles file exists
        if !profiles_path.exists() {
            bail!("Profiles file does not exist: {:?}", profiles_path);
        }
        if !profiles_path.is_file() {
            bail!("profiles_path is not a file: {:?}", profiles_path);
        }

        // LLM settings - merge file config with defaults
        let llm_file = file.llm.unwrap_or_default();

        let llm_base_url = llm_file
            .base_url
            .clone()
            .or_else(|| cli.llm_base_url.clone());

        let api_key_source = match (llm_file.api_key, llm_file.api_key_command) {
            (Some(_), Some(_)) => {
                bail!("Set either llm.api_key or llm.api_key_command, not both")
            }
            (Some(key), None) => ApiKeySource::Static(key),
            (None, Some(cmd)) => ApiKeySource::Command(cmd),
            (None, None) => ApiKeySource::None,
        };

        let llm = LlmSettings {
            enabled: llm_base_url.is_some(),
            model: llm_file
                .model
                .or_else(|| cli.llm_model.clone())
                .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            api_key_source,
            timeout_sec: llm_file.timeout_sec.unwrap_or(DEFAULT_LLM_TIMEOUT_SEC),
            temperature: llm_file.temperature.unwrap_or(DEFAULT_LLM_TEMPERATURE),
            max_tokens: llm_file.max_tokens.unwrap_or(DEFAULT_LLM_MAX_TOKENS),
        };

        Ok(Self {
            profiles_path,
            llm_base_url,
            llm,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub enabled: bool, // true if a base URL is set
    pub model: String,
    pub api_key_source: ApiKeySource,
    pub timeout_sec: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key_source: ApiKeySource::None,
            timeout_sec: DEFAULT_LLM_TIMEOUT_SEC,
            temperature: DEFAULT_LLM_TEMPERATURE,
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
        }
    }
}

impl LlmSettings {
    /// Completion options carrying these settings.
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            timeout: Duration::from_secs(self.timeout_sec),
        }
    }
}
