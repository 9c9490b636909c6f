use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub summarizer: SummarizerConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummarizerConfig {
    /// `huggingface` for an inference endpoint, otherwise a rig provider id.
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::load();
        assert!(config.is_ok(), "Default config should load: {config:?}");

        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.summarizer.provider, "huggingface");
        assert_eq!(config.upload.max_file_size_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn test_env_override() {
        // SAFETY: no other test reads or writes this variable.
        unsafe { std::env::set_var("APP__SUMMARIZER__MODEL", "facebook/bart-large-cnn") };

        let config = AppConfig::load().unwrap();
        assert_eq!(config.summarizer.model, "facebook/bart-large-cnn");

        unsafe { std::env::remove_var("APP__SUMMARIZER__MODEL") };
    }
}
