// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 400;

/// Backend endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: BackendConfig,
    production: BackendConfig,
}

impl BackendConfig {
    /// Resolution order: `RESUMATCH_API_URL` env var, then `config.yaml`
    /// (section picked by environment), then the local development default.
    pub fn load() -> Result<Self> {
        if let Ok(url) = std::env::var("RESUMATCH_API_URL") {
            info!("Using backend URL from RESUMATCH_API_URL");
            return Ok(Self {
                base_url: normalize_base_url(&url),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            });
        }

        let config_path = PathBuf::from("config.yaml");
        if config_path.exists() {
            let environment = Self::get_environment();
            info!("Loading config.yaml for environment: {}", environment);
            return Self::load_from_file(&config_path, &environment);
        }

        Ok(Self::default())
    }

    fn get_environment() -> String {
        std::env::var("RESUMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(config_path: &PathBuf, environment: &str) -> Result<Self> {
        let config_content =
            std::fs::read_to_string(config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(Self {
            base_url: normalize_base_url(&env_config.base_url),
            timeout_secs: env_config.timeout_secs,
        })
    }
}

/// Endpoint paths are joined with a plain format!, so the base must not end
/// with a slash.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("http://api.example.com"),
            "http://api.example.com"
        );
    }

    #[test]
    fn test_config_file_parsing() {
        let yaml = r#"
local:
  base_url: http://localhost:8000
production:
  base_url: https://api.resumatch.example.com/
  timeout_secs: 120
"#;
        let parsed: ConfigFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.local.timeout_secs, 400);
        assert_eq!(parsed.production.timeout_secs, 120);
    }

    #[test]
    fn test_default_is_local_dev() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
    }
}
