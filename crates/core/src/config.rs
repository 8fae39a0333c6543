//! Configuration management for DocQA.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (.docqa/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Pipeline tuning knobs live under the `rag:` section of the same file and
//! are loaded by the knowledge crate.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Hosted inference provider name.
pub const HUGGINGFACE_PROVIDER: &str = "huggingface";

/// Default chat model when neither YAML nor environment sets one.
pub const DEFAULT_CHAT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Default embedding model (small, multilingual).
pub const DEFAULT_EMBEDDING_MODEL: &str = "intfloat/multilingual-e5-small";

/// Environment variable holding the API token by default.
pub const DEFAULT_API_KEY_ENV: &str = "HF_TOKEN";

const KNOWN_PROVIDERS: [&str; 1] = [HUGGINGFACE_PROVIDER];
const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = [HUGGINGFACE_PROVIDER, "mock"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .docqa/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Chat-completion provider
    pub provider: String,

    /// Chat model identifier
    pub model: String,

    /// Embedding provider ("huggingface" or "mock")
    pub embedding_provider: String,

    /// Embedding model identifier
    pub embedding_model: String,

    /// API token for the hosted provider
    pub api_key: Option<String>,

    /// Environment variable consulted when `api_key` is unset
    pub api_key_env: String,

    /// Optional custom endpoint for the hosted provider
    pub endpoint: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    logging: Option<LoggingSection>,
}

/// `llm:` section of config.yaml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    embedding_provider: Option<String>,
    embedding_model: Option<String>,
    api_key_env: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: HUGGINGFACE_PROVIDER.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_provider: HUGGINGFACE_PROVIDER.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            endpoint: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DOCQA_WORKSPACE`: Override workspace path
    /// - `DOCQA_CONFIG`: Path to config file
    /// - `DOCQA_PROVIDER`: Chat provider
    /// - `DOCQA_MODEL` (or `MODEL_ID`): Chat model identifier
    /// - `DOCQA_EMBEDDING_PROVIDER`: Embedding provider
    /// - `DOCQA_EMBEDDING_MODEL`: Embedding model identifier
    /// - `DOCQA_API_KEY`: API token (falls back to the `apiKeyEnv` variable, `HF_TOKEN` by default)
    /// - `DOCQA_ENDPOINT`: Custom provider endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("DOCQA_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("DOCQA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.config_path());

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("DOCQA_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_MODEL").or_else(|_| std::env::var("MODEL_ID")) {
            config.model = model;
        }

        if let Ok(provider) = std::env::var("DOCQA_EMBEDDING_PROVIDER") {
            config.embedding_provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_EMBEDDING_MODEL") {
            config.embedding_model = model;
        }

        if let Ok(endpoint) = std::env::var("DOCQA_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        config.api_key = std::env::var("DOCQA_API_KEY")
            .ok()
            .or_else(|| std::env::var(&config.api_key_env).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        self.merge_yaml_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file {:?}: {}", path, e)))
    }

    fn merge_yaml_str(&self, contents: &str) -> AppResult<Self> {
        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(contents)?
        };

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(provider) = llm.embedding_provider {
                result.embedding_provider = provider;
            }
            if let Some(model) = llm.embedding_model {
                result.embedding_model = model;
            }
            if let Some(env) = llm.api_key_env {
                result.api_key_env = env;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        embedding_provider: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(embedding_provider) = embedding_provider {
            self.embedding_provider = embedding_provider;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .docqa directory.
    pub fn docqa_dir(&self) -> PathBuf {
        self.workspace.join(".docqa")
    }

    /// Get the path of the workspace config file.
    pub fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| self.docqa_dir().join("config.yaml"))
    }

    /// Return the API token or fail with a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Config(format!(
                "API token not found. Set DOCQA_API_KEY or {}",
                self.api_key_env
            ))
        })
    }

    /// Validate configuration for the active providers.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding_provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Chat model identifier is empty".to_string()));
        }

        if self.embedding_model.trim().is_empty() {
            return Err(AppError::Config(
                "Embedding model identifier is empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.provider, "huggingface");
        assert_eq!(config.embedding_model, "intfloat/multilingual-e5-small");
        assert_eq!(config.api_key_env, "HF_TOKEN");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_docqa_dir() {
        let config = AppConfig::default();
        assert!(config.docqa_dir().ends_with(".docqa"));
        assert!(config.config_path().ends_with(".docqa/config.yaml"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            None,
            Some("mistralai/Mistral-7B-Instruct-v0.3".to_string()),
            Some("mock".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.model, "mistralai/Mistral-7B-Instruct-v0.3");
        assert_eq!(overridden.embedding_provider, "mock");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let yaml = r#"
llm:
  model: Qwen/Qwen2.5-7B-Instruct
  embeddingModel: sentence-transformers/all-MiniLM-L6-v2
  apiKeyEnv: MY_TOKEN
logging:
  level: warn
  color: false
rag:
  maxChunkLength: 600
"#;
        let merged = AppConfig::default().merge_yaml_str(yaml).unwrap();
        assert_eq!(merged.model, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(
            merged.embedding_model,
            "sentence-transformers/all-MiniLM-L6-v2"
        );
        assert_eq!(merged.api_key_env, "MY_TOKEN");
        assert_eq!(merged.log_level, Some("warn".to_string()));
        assert!(merged.no_color);
        assert_eq!(merged.provider, "huggingface");
    }

    #[test]
    fn test_merge_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "llm:\n  embeddingProvider: mock\n").unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();
        assert_eq!(merged.embedding_provider, "mock");
    }

    #[test]
    fn test_merge_invalid_yaml() {
        let result = AppConfig::default().merge_yaml_str("llm: [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_embedding_provider() {
        let mut config = AppConfig::default();
        config.embedding_provider = "word2vec".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_require_api_key() {
        let mut config = AppConfig::default();
        config.api_key = None;
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("HF_TOKEN"));

        config.api_key = Some("hf_test".to_string());
        assert_eq!(config.require_api_key().unwrap(), "hf_test");
    }
}
