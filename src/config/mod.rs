use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::NotesError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API settings
    pub gemini: GeminiConfig,

    /// Transcript fetching settings
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,

    /// API credential read from the environment at load time
    #[serde(skip)]
    api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model used for generation
    pub model: String,

    /// Base URL of the Generative Language API
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Preferred caption languages, in order
    pub languages: Vec<String>,

    /// Keep HTML formatting tags in caption text
    pub preserve_formatting: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Characters shown when previewing extracted document text
    pub preview_chars: usize,

    /// Default output format
    pub default_output_format: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            preserve_formatting: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_chars: 1500,
            default_output_format: "text".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            transcript: TranscriptConfig::default(),
            app: AppConfig::default(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from file (or defaults) and pick up the API key from the environment
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        config.validate()?;
        config.api_key = std::env::var(&config.gemini.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .context("Failed to parse config file")?;
        Ok(config)
    }

    /// Write the default configuration file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // A config in the current directory takes precedence
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("gemini-notes").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gemini.model.trim().is_empty() {
            return Err(NotesError::Config("Gemini model must be configured".into()).into());
        }

        if self.gemini.api_key_env.trim().is_empty() {
            return Err(NotesError::Config("API key environment variable must be named".into()).into());
        }

        if self.gemini.timeout_secs == 0 {
            return Err(NotesError::Config("Request timeout must be greater than zero".into()).into());
        }

        let base_url = Url::parse(&self.gemini.base_url).map_err(|_| {
            NotesError::Config(format!("Invalid Gemini base URL: {}", self.gemini.base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(NotesError::Config("Gemini base URL must use HTTP or HTTPS".into()).into());
        }

        if self.transcript.languages.is_empty() {
            return Err(NotesError::Config("At least one transcript language is required".into()).into());
        }

        Ok(())
    }

    /// API key, failing if none was found in the environment
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            NotesError::Config(format!(
                "Missing API key: set the {} environment variable",
                self.gemini.api_key_env
            ))
            .into()
        })
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the generation model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.gemini.model = model.into();
        self
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Gemini Model: {}", self.gemini.model);
        println!("  Gemini Base URL: {}", self.gemini.base_url);
        println!(
            "  API Key: ${} ({})",
            self.gemini.api_key_env,
            if self.api_key.is_some() { "set" } else { "not set" }
        );
        println!("  Timeout: {}s", self.gemini.timeout_secs);
        println!("  Transcript Languages: {}", self.transcript.languages.join(", "));
        println!("  Preview Length: {} chars", self.app.preview_chars);
        println!("  Default Format: {}", self.app.default_output_format);
    }
}
