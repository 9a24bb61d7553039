//! Configuration system for peek.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $PEEK_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/peek/config.toml
//!   3. ~/.config/peek/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::element::ElementType;
use crate::id::NodeId;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeekConfig {
    pub node: NodeConfig,
    pub client: ClientConfig,
    pub cluster: ClusterConfig,
    /// Named layouts for structured chunk reads.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Id of this storage node. Becomes the top 16 bits of every chunk id it hosts.
    pub node_id: NodeId,
    /// Port of the HTTP API, bound on 127.0.0.1.
    pub api_port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node API used when a chunk's node is not in the cluster table.
    pub default_url: String,
    /// Per-request timeout. 0 = no timeout.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub nodes: Vec<NodeEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEndpoint {
    pub node_id: NodeId,
    pub url: String,
}

/// A flat structure read field by field from the start of a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLayout {
    pub name: String,
    pub fields: Vec<FieldLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub name: String,
    /// A `string` field consumes the rest of the chunk.
    pub kind: ElementType,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            client: ClientConfig::default(),
            cluster: ClusterConfig::default(),
            types: Vec::new(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: NodeId::new(1),
            api_port: 9101,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_url: "http://127.0.0.1:9101".to_string(),
            timeout_secs: 10,
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("peek")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl PeekConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            Self::from_toml(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            PeekConfig::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("PEEK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&PeekConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text)
                .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply PEEK_* overrides. Unparsable values are ignored.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("PEEK_NODE__NODE_ID") {
            if let Ok(id) = v.parse::<u16>() {
                self.node.node_id = NodeId::new(id);
            }
        }
        if let Some(v) = var("PEEK_NODE__API_PORT") {
            if let Ok(p) = v.parse() {
                self.node.api_port = p;
            }
        }
        if let Some(v) = var("PEEK_CLIENT__DEFAULT_URL") {
            self.client.default_url = v;
        }
        if let Some(v) = var("PEEK_CLIENT__TIMEOUT_SECS") {
            if let Ok(t) = v.parse() {
                self.client.timeout_secs = t;
            }
        }
    }
}
