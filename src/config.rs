use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::VtaError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            backtrace: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub endpoint: String,
    #[serde(default = "default_registry_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_course_collection")]
    pub course_collection: String,
    #[serde(default = "default_forum_collection")]
    pub forum_collection: String,
    #[serde(default = "default_max_per_collection")]
    pub max_per_collection: usize,
}

fn default_registry_timeout() -> u64 {
    30
}

fn default_course_collection() -> String {
    "course_site".to_string()
}

fn default_forum_collection() -> String {
    "forum_posts".to_string()
}

fn default_max_per_collection() -> usize {
    3
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8100".to_string(),
            timeout_secs: default_registry_timeout(),
            course_collection: default_course_collection(),
            forum_collection: default_forum_collection(),
            max_per_collection: default_max_per_collection(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_course_corpus")]
    pub course_path: String,
    #[serde(default = "default_forum_corpus")]
    pub forum_path: String,
}

fn default_course_corpus() -> String {
    "course_content.json".to_string()
}

fn default_forum_corpus() -> String {
    "forum_posts.json".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            course_path: default_course_corpus(),
            forum_path: default_forum_corpus(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service identity reported by the liveness probe
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Course the assistant answers questions about, used in prompts
    #[serde(default = "default_course_name")]
    pub course: String,
}

fn default_service_name() -> String {
    "Virtual TA".to_string()
}

fn default_course_name() -> String {
    "Tools in Data Science".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            course: default_course_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(VtaError::Io)?;

        let config: AppConfig = toml::from_str(&content).map_err(VtaError::TomlParsing)?;

        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            println!(
                "Warning: Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(VtaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Check endpoint URLs and credentials before the service starts
    pub fn validate(&self) -> crate::Result<()> {
        url::Url::parse(&self.registry.endpoint)
            .map_err(|e| VtaError::ConfigError(format!("Invalid registry endpoint: {e}")))?;
        url::Url::parse(&self.llm.endpoint)
            .map_err(|e| VtaError::ConfigError(format!("Invalid LLM endpoint: {e}")))?;

        if self.llm.api_key.is_empty() {
            return Err(VtaError::ConfigError(
                "LLM API key is not set".to_string(),
            ));
        }

        if self.registry.max_per_collection == 0 {
            return Err(VtaError::ConfigError(
                "registry.max_per_collection must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the bind host
    pub fn host(&self) -> &str {
        &self.server.host
    }

    /// Get the bind port
    pub fn port(&self) -> u16 {
        self.server.port
    }

    /// Get the log level
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    /// Get the registry endpoint
    pub fn registry_endpoint(&self) -> &str {
        &self.registry.endpoint
    }

    /// Get the course-site collection name
    pub fn course_collection(&self) -> &str {
        &self.registry.course_collection
    }

    /// Get the forum collection name
    pub fn forum_collection(&self) -> &str {
        &self.registry.forum_collection
    }

    /// Get the per-collection retrieval limit
    pub fn max_per_collection(&self) -> usize {
        self.registry.max_per_collection
    }

    /// Get the LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.endpoint
    }

    /// Get the LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.model
    }

    /// Get the vision model used for image analysis
    pub fn vision_model(&self) -> &str {
        &self.llm.vision_model
    }

    /// Get the service name reported by the liveness probe
    pub fn service_name(&self) -> &str {
        &self.service.name
    }

    /// Get the course name used in prompts
    pub fn course_name(&self) -> &str {
        &self.service.course
    }

    /// LLM API key with all but the last four characters masked, for display
    pub fn masked_api_key(&self) -> String {
        let key = &self.llm.api_key;
        if key.is_empty() {
            return "(not set)".to_string();
        }
        let chars = key.chars().count();
        if chars <= 4 {
            return "****".to_string();
        }
        let tail: String = key.chars().skip(chars - 4).collect();
        format!("****{tail}")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            registry: RegistryConfig::default(),
            llm: LlmConfig {
                endpoint: "https://api.openai.com/v1".to_string(),
                api_key: String::new(),
                model: default_llm_model(),
                vision_model: default_vision_model(),
                timeout_secs: default_llm_timeout(),
            },
            corpus: CorpusConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}
