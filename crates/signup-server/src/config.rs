// File: src/config.rs
// Purpose: Server configuration from signup.toml with environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use signup_validation::Profile;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "signup.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which rule set the endpoints apply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub profile: Profile,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }

    /// Load from `SIGNUP_CONFIG` (or signup.toml), then apply environment overrides
    pub fn load_default() -> Result<Self> {
        let path = std::env::var("SIGNUP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from `SIGNUP_HOST`, `SIGNUP_PORT`, and `SIGNUP_PROFILE`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("SIGNUP_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("SIGNUP_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("SIGNUP_PORT is not a valid port: {}", port))?;
        }

        if let Some(profile) = lookup("SIGNUP_PROFILE") {
            self.validation.profile = profile.parse()?;
        }

        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
