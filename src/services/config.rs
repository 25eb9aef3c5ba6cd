use crate::cli::Cli;
use crate::domain::models::{ChannelTarget, NodeEndpoint, DEFAULT_CONNECTION_STRING};
use crate::services::alerts::channel_targets;
use crate::services::rpc::{RetryPolicy, RPC_TIMEOUT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub node: NodeSection,
    #[serde(default)]
    pub notify: NotifySection,
    #[serde(default)]
    pub rpc: RpcSection,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct NodeSection {
    pub connection_string: Option<String>,
    pub nickname: Option<String>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct NotifySection {
    pub slack_webhook: Option<String>,
    pub discord_webhook: Option<String>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct RpcSection {
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub backoff_factor: Option<f64>,
}

/// Everything one probe run needs, after CLI > file > default resolution.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub endpoint: NodeEndpoint,
    pub channels: Vec<ChannelTarget>,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

pub fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/nano-probe/config.toml"))
}

/// An explicit path must exist; the default path is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = match explicit {
        Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(ConfigFile::default()),
        },
    };
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
}

impl ProbeSettings {
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Result<Self, ConfigError> {
        let connection_string = pick(&cli.connection_string, file.node.connection_string)
            .unwrap_or_else(|| DEFAULT_CONNECTION_STRING.to_string());
        let nickname = pick(&cli.nickname, file.node.nickname).unwrap_or_default();
        let slack = pick(&cli.slack_webhook, file.notify.slack_webhook).unwrap_or_default();
        let discord = pick(&cli.discord_webhook, file.notify.discord_webhook).unwrap_or_default();

        let mut retry = RetryPolicy::default();
        if let Some(retries) = file.rpc.retries {
            retry.total = retries;
        }
        if let Some(factor) = file.rpc.backoff_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "rpc.backoff_factor must be a non-negative number, got {factor}"
                )));
            }
            retry.backoff_factor = factor;
        }
        let timeout = match file.rpc.timeout_ms {
            Some(0) => {
                return Err(ConfigError::Invalid(
                    "rpc.timeout_ms must be greater than 0".to_string(),
                ))
            }
            Some(ms) => Duration::from_millis(ms),
            None => RPC_TIMEOUT,
        };

        Ok(Self {
            endpoint: NodeEndpoint::new(connection_string, nickname),
            channels: channel_targets(&slack, &discord),
            retry,
            timeout,
        })
    }
}

fn pick(flag: &Option<String>, file: Option<String>) -> Option<String> {
    flag.clone().or(file)
}
