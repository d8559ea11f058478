use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub profiles_path: Option<String>,

    // Feature configs
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API. Setting it enables the
    /// generative path.
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    /// Shell command that prints the API key. Mutually exclusive with
    /// `api_key`.
    pub api_key_command: Option<String>,
    pub timeout_sec: Option<u64>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            profiles_path = "/data/profiles.json"

            [llm]
            base_url = "https://api.openai.com/v1"
            model = "gpt-4o-mini"
            api_key = "sk-test"
            timeout_sec = 20
            temperature = 0.5
            max_tokens = 512
            "#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.profiles_path.as_deref(), Some("/data/profiles.json"));

        let llm = config.llm.unwrap();
        assert_eq!(llm.base_url.as_deref(), Some("https://api.openai.com/v1"));
        assert_eq!(llm.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(llm.api_key.as_deref(), Some("sk-test"));
        assert!(llm.api_key_command.is_none());
        assert_eq!(llm.timeout_sec, Some(20));
        assert_eq!(llm.temperature, Some(0.5));
        assert_eq!(llm.max_tokens, Some(512));
    }

    #[test]
    fn test_load_empty_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.profiles_path.is_none());
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = FileConfig::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "this is not toml [").unwrap();

        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
