use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub parsing: ParsingConfig,
    pub analysis: AnalysisConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub parse_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Model used for structured analysis
    pub model: String,
    /// Model used for chat replies and summaries
    pub chat_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    /// Override for the parsing-service base URL
    #[serde(default)]
    pub base_url: Option<String>,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub history_window: usize,
    pub summary_interval: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (with SERVER_, LLM_, PARSING_, etc. prefixes)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::default()
                    .prefix("SERVER")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("LLM")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("PARSING")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("CHAT")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("LOG")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML); the process must not start
        // without them.
        cfg.gemini_api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ConfigError::Message("GEMINI_API_KEY environment variable is required".to_string())
        })?;
        cfg.parse_api_key = std::env::var("PARSE_API_KEY").map_err(|_| {
            ConfigError::Message("PARSE_API_KEY environment variable is required".to_string())
        })?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [llm]
            model = "gemini-2.5-flash"
            chat_model = "gemini-2.5-flash"

            [parsing]
            poll_interval_secs = 2
            poll_timeout_secs = 300

            [analysis]
            max_retries = 3

            [chat]
            history_window = 10
            summary_interval = 6

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.parsing.poll_timeout_secs, 300);
        assert_eq!(config.chat.summary_interval, 6);
        assert!(config.parsing.base_url.is_none());
    }
}
