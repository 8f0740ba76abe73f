//! Configuration loading and validation for Handoff.
//!
//! Loads agent definitions from `~/.handoff/config.toml` with environment
//! variable overrides. Every agent is structurally validated at load time,
//! before any function handle is resolved.

use handoff_core::{Agent, AgentConfig, FunctionRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.handoff/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model used by agents that do not name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Agent definitions
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

fn default_model() -> String {
    handoff_core::agent::DEFAULT_MODEL.into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            agents: vec![],
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.handoff/config.toml).
    ///
    /// A missing file yields defaults. `HANDOFF_MODEL` overrides `default_model`.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_model_override(std::env::var("HANDOFF_MODEL").ok());
        Ok(config)
    }

    /// Load configuration from a path the user named explicitly.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error.
    /// `HANDOFF_MODEL` overrides `default_model`.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                reason: "file does not exist".into(),
            });
        }
        let mut config = Self::load_from(path)?;
        config.apply_model_override(std::env::var("HANDOFF_MODEL").ok());
        Ok(config)
    }

    /// Replace `default_model` when an override is present.
    pub fn apply_model_override(&mut self, model: Option<String>) {
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            tracing::debug!(model = %model, "Overriding default model");
            self.default_model = model;
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::info!(
            agents = config.agents.len(),
            "Loaded config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".handoff")
    }

    /// Validate every agent and require unique names within the file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for agent in &self.agents {
            agent.validate()?;
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate agent name '{}'",
                    agent.name
                )));
            }
        }
        Ok(())
    }

    /// Find an agent definition by name.
    pub fn agent(&self, name: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// The model an agent definition resolves to.
    pub fn model_for<'a>(&'a self, agent: &'a AgentConfig) -> &'a str {
        agent.model.as_deref().unwrap_or(&self.default_model)
    }

    /// Build every configured agent, resolving function names in `registry`.
    pub fn build_agents(&self, registry: &FunctionRegistry) -> Result<Vec<Agent>, ConfigError> {
        self.agents
            .iter()
            .map(|definition| {
                let mut definition = definition.clone();
                definition.model = Some(self.model_for(&definition).to_string());
                definition.build(registry).map_err(ConfigError::from)
            })
            .collect()
    }

    /// Generate a starter config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self {
            agents: vec![
                AgentConfig {
                    name: "Triage".into(),
                    instructions: "Decide which agent should handle the request.".into(),
                    functions: vec!["transfer_to_sales".into(), "transfer_to_refunds".into()],
                    has_reflection: true,
                    ..Default::default()
                },
                AgentConfig {
                    name: "Sales".into(),
                    instructions: "Help the user buy something.".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid agent: {0}")]
    Agent(#[from] handoff_core::Error),
}
