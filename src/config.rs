use serde::{Deserialize, Serialize};
use crate::v_info;
use crate::error::{ClientError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub agent: AgentConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Scheme and host every request path is appended to
    pub base_url: String,
    /// Largest response body accepted before a call fails as truncated
    pub body_capacity_bytes: usize,
    /// Whole-request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory new save files are written to and searched in
    pub save_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Faction used by `register` when none is given
    pub default_faction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// 0=quiet, 1=info, 2=debug
    pub verbosity: u8,
    /// Append every API call to this file when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_log_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: crate::API_BASE_URL.to_string(),
                body_capacity_bytes: crate::client::DEFAULT_BODY_CAPACITY,
                timeout_seconds: 30,
            },
            storage: StorageConfig {
                save_dir: crate::DEFAULT_SAVE_DIR.to_string(),
            },
            agent: AgentConfig {
                default_faction: crate::DEFAULT_FACTION.to_string(),
            },
            logging: LoggingConfig {
                verbosity: 0,
                api_log_path: None,
            },
        }
    }
}

impl ClientConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            v_info!("📋 Loading configuration from {}", config_path.display());
            let config_str = fs::read_to_string(config_path)?;
            let config: ClientConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path.display());
            let config = ClientConfig::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ClientError::Config("api.base_url must not be empty".to_string()));
        }
        if self.api.body_capacity_bytes == 0 {
            return Err(ClientError::Config("api.body_capacity_bytes must be greater than 0".to_string()));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ClientError::Config("api.timeout_seconds must be greater than 0".to_string()));
        }
        if self.storage.save_dir.trim().is_empty() {
            return Err(ClientError::Config("storage.save_dir must not be empty".to_string()));
        }
        if self.agent.default_faction.trim().is_empty() {
            return Err(ClientError::Config("agent.default_faction must not be empty".to_string()));
        }
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        v_info!("📋 Configuration Summary:");
        v_info!("   🌐 Base URL: {}", self.api.base_url);
        v_info!("   📦 Body capacity: {} bytes", self.api.body_capacity_bytes);
        v_info!("   ⏰ Timeout: {}s", self.api.timeout_seconds);
        v_info!("   💾 Save dir: {}", self.storage.save_dir);
    }
}
