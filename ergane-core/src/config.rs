//! Configuration types for the Ergane toolkit

use serde::{Deserialize, Serialize};

use crate::error::{ErganeError, Result};

/// Main configuration for an Ergane host process
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ErganeConfig {
    /// Editor project configuration
    #[serde(default)]
    pub project: ProjectConfig,

    /// Tool exposure configuration
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Editor project configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name reported by the backend
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
        }
    }
}

/// Tool exposure configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ToolsConfig {
    /// Names of tools to expose; `None` exposes every registered tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowlist: Option<Vec<String>>,
}

impl ErganeConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Loads in this order:
    /// 1. Default configuration
    /// 2. Configuration file (ergane.toml or path from ERGANE_CONFIG_PATH)
    /// 3. Environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is invalid.
    pub fn load() -> Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Toml},
        };

        let mut figment = Figment::new()
            .merge(Toml::file("ergane.toml"))
            .merge(Env::prefixed("ERGANE_").split("_"));

        // Check for custom config path
        if let Ok(path) = std::env::var("ERGANE_CONFIG_PATH") {
            figment = figment.merge(Toml::file(path));
        }

        let config: ErganeConfig = figment.extract().map_err(|e| {
            ErganeError::Configuration(format!("failed to load configuration: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Toml},
        };

        let config: ErganeConfig = Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| {
                ErganeError::Configuration(format!("failed to load configuration file: {}", e))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(ErganeError::Configuration(
                "project.name must not be empty".to_string(),
            ));
        }

        if let Some(allowlist) = &self.tools.allowlist {
            if allowlist.iter().any(|name| name.trim().is_empty()) {
                return Err(ErganeError::Configuration(
                    "tools.allowlist entries must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
