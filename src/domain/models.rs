use serde::Serialize;

pub const DEFAULT_CONNECTION_STRING: &str = "localhost:7075";

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// The node under probe. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEndpoint {
    /// `host:port` of the node RPC listener.
    pub connection_string: String,
    /// Display name for alert text. Empty means "use the host".
    pub nickname: String,
}

impl NodeEndpoint {
    pub fn new(connection_string: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            nickname: nickname.into(),
        }
    }

    /// Plaintext RPC url, no TLS.
    pub fn rpc_url(&self) -> String {
        format!("http://{}", self.connection_string)
    }

    /// Identity used in alert text: the nickname, or the host part of the
    /// connection string.
    pub fn address(&self) -> &str {
        if !self.nickname.is_empty() {
            return &self.nickname;
        }
        self.connection_string
            .split(':')
            .next()
            .unwrap_or(&self.connection_string)
    }
}

/// Result of one probe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcOutcome {
    Success { local_count: u64, network_count: u64 },
    ConnectivityFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncVerdict {
    pub in_sync: bool,
    pub local_count: u64,
    pub network_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Slack,
    Discord,
}

/// A configured notification channel with its webhook destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    pub kind: ChannelKind,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    InSync,
    OutOfSync,
    Unreachable,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub address: String,
    pub connection_string: String,
    pub local_count: Option<u64>,
    pub network_count: Option<u64>,
    pub alert: Option<String>,
    pub notified: Vec<ChannelKind>,
}
