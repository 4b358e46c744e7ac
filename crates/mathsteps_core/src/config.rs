//! Solver configuration - credential and endpoint settings.
//!
//! Config file: ~/.config/mathsteps/config.toml or /etc/mathsteps/config.toml,
//! with environment overrides for scripting. The Wolfram credential is the
//! only secret; leaving it unset (or on the shipped placeholder) silently
//! disables that provider.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Placeholder credential shipped in docs and examples. Treated the same
/// as no credential at all.
pub const WOLFRAM_PLACEHOLDER_APP_ID: &str = "DEMO-APPID";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wolfram Alpha AppID. `None`, empty or the placeholder disables the
    /// Wolfram provider without error.
    #[serde(default)]
    pub wolfram_app_id: Option<String>,

    /// Base URL of the Wolfram Alpha query API.
    #[serde(default = "default_wolfram_base_url")]
    pub wolfram_base_url: String,

    /// Base URL of the algebra-steps solve service.
    #[serde(default = "default_steps_api_url")]
    pub steps_api_url: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_wolfram_base_url() -> String {
    "https://api.wolframalpha.com".to_string()
}

fn default_steps_api_url() -> String {
    "https://algebra-steps-api.onrender.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            wolfram_app_id: None,
            wolfram_base_url: default_wolfram_base_url(),
            steps_api_url: default_steps_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SolverConfig {
    /// Get default user config path: ~/.config/mathsteps/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
        Ok(config_dir.join("mathsteps").join("config.toml"))
    }

    /// Get system config path: /etc/mathsteps/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/mathsteps/config.toml")
    }

    /// Load configuration.
    ///
    /// Priority:
    /// 1. Environment overrides (MATHSTEPS_WOLFRAM_APP_ID, MATHSTEPS_STEPS_API_URL)
    /// 2. User config (~/.config/mathsteps/config.toml)
    /// 3. System config (/etc/mathsteps/config.toml)
    /// 4. Defaults
    ///
    /// A missing file is not an error; a present but unparsable one is.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;

        if let Ok(app_id) = std::env::var("MATHSTEPS_WOLFRAM_APP_ID") {
            config.wolfram_app_id = Some(app_id);
        }
        if let Ok(url) = std::env::var("MATHSTEPS_STEPS_API_URL") {
            config.steps_api_url = url;
        }

        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Ok(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        Ok(Self::default())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SolverConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the user config file, returning its path.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::user_config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(&path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// The Wolfram credential, if one is actually usable.
    pub fn active_wolfram_app_id(&self) -> Option<&str> {
        match self.wolfram_app_id.as_deref() {
            Some(id) if !id.is_empty() && id != WOLFRAM_PLACEHOLDER_APP_ID => Some(id),
            _ => None,
        }
    }
}
