//! Cluster configuration as read from a YAML file. Every node of a cluster reads the same file
//! and picks its own entry by index.

use crate::api::options::ChatNodeOptions;
use crate::api::wiring::ChatNodeConfig;
use crate::store::StoreLimits;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid server address '{0}'")]
    InvalidAddress(String),
    #[error("Node index {index} is out of range for {num_servers} servers")]
    NodeIndexOutOfRange { index: usize, num_servers: usize },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Address of every node in the cluster, `host:port`.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Where each node keeps its SQLite file.
    #[serde(default = "default_db_directory")]
    pub db_directory: PathBuf,

    #[serde(default)]
    pub raft: RaftTimingsConfig,

    #[serde(default)]
    pub limits: StoreLimits,
}

/// Raft timings in milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RaftTimingsConfig {
    pub heartbeat_ms: u64,
    pub election_timeout_min_ms: u64,
    pub election_timeout_max_ms: u64,
    pub append_entries_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            servers: default_servers(),
            db_directory: default_db_directory(),
            raft: RaftTimingsConfig::default(),
            limits: StoreLimits::default(),
        }
    }
}

impl Default for RaftTimingsConfig {
    fn default() -> Self {
        RaftTimingsConfig {
            heartbeat_ms: 100,
            election_timeout_min_ms: 500,
            election_timeout_max_ms: 1500,
            append_entries_timeout_ms: 100,
        }
    }
}

fn default_servers() -> Vec<String> {
    (0..5).map(|i| format!("127.0.0.1:{}", 50051 + i)).collect()
}

fn default_db_directory() -> PathBuf {
    PathBuf::from("./data")
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn cluster_members(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.servers
            .iter()
            .map(|server| {
                server
                    .parse::<SocketAddr>()
                    .map_err(|_| ConfigError::InvalidAddress(server.clone()))
            })
            .collect()
    }

    /// Config for the node at `node_index` of `servers`.
    pub fn node_config(&self, node_index: usize, logger: slog::Logger) -> Result<ChatNodeConfig, ConfigError> {
        let cluster_members = self.cluster_members()?;
        if node_index >= cluster_members.len() {
            return Err(ConfigError::NodeIndexOutOfRange {
                index: node_index,
                num_servers: cluster_members.len(),
            });
        }

        Ok(ChatNodeConfig {
            cluster_members,
            my_node_index: node_index,
            db_directory: Some(self.db_directory.clone()),
            logger,
            options: self.raft.to_options(),
            limits: self.limits.clone(),
        })
    }
}

impl RaftTimingsConfig {
    fn to_options(&self) -> ChatNodeOptions {
        ChatNodeOptions {
            leader_heartbeat_duration: Some(Duration::from_millis(self.heartbeat_ms)),
            follower_min_timeout: Some(Duration::from_millis(self.election_timeout_min_ms)),
            follower_max_timeout: Some(Duration::from_millis(self.election_timeout_max_ms)),
            append_entries_timeout: Some(Duration::from_millis(self.append_entries_timeout_ms)),
        }
    }
}
