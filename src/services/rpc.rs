use crate::domain::models::{NodeEndpoint, RpcOutcome};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const RPC_TIMEOUT: Duration = Duration::from_secs(1);
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.0;
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(120);

pub const BLOCK_COUNT_ACTION: &str = "block_count";
pub const BLOCK_COUNT_FIELD: &str = "cemented";
pub const TELEMETRY_ACTION: &str = "telemetry";
pub const TELEMETRY_FIELD: &str = "cemented_count";

#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    #[error("rpc `{action}` timed out: {detail}")]
    Timeout { action: &'static str, detail: String },
    #[error("rpc `{action}` could not reach the node: {detail}")]
    Connection { action: &'static str, detail: String },
    #[error("rpc `{action}` still answered HTTP {status} after {retries} retries")]
    RetriesExhausted {
        action: &'static str,
        status: u16,
        retries: u32,
    },
    #[error("rpc `{action}` request failed: {detail}")]
    Request { action: &'static str, detail: String },
    #[error("rpc `{action}` returned an unreadable body: {detail}")]
    InvalidResponse { action: &'static str, detail: String },
    #[error("rpc `{action}` response has no `{field}` field")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },
    #[error("rpc `{action}` field `{field}` is not a block count: {value}")]
    InvalidCount {
        action: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("failed to build rpc http client: {0}")]
    Client(String),
}

impl RpcError {
    /// Timeouts and refused/broken connections are the only failures the
    /// probe turns into an unreachable-node alert. Everything else is fatal.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection { .. })
    }

    fn from_transport(action: &'static str, err: reqwest::Error) -> Self {
        let detail = err.to_string();
        if err.is_timeout() {
            Self::Timeout { action, detail }
        } else if err.is_connect() || err.is_request() {
            Self::Connection { action, detail }
        } else if err.is_decode() || err.is_body() {
            Self::InvalidResponse { action, detail }
        } else {
            Self::Request { action, detail }
        }
    }
}

/// Retry budget shared by every call an `RpcClient` makes.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; connect failures, timeouts and
    /// retryable statuses all draw from the same budget.
    pub total: u32,
    pub status_forcelist: Vec<u16>,
    pub backoff_factor: f64,
    pub backoff_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: DEFAULT_RETRIES,
            status_forcelist: RETRYABLE_STATUSES.to_vec(),
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            backoff_max: DEFAULT_BACKOFF_MAX,
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// Sleep before retry number `retry` (1-indexed).
    ///
    /// Known quirk: the wait is `factor * 2^(retry - 2)`, so factor 1 gives
    /// 0.5, 1, 2, 4... The half-unit first wait comes from the retry
    /// convention the probe has always followed and is kept for parity.
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor.is_nan() || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX).saturating_sub(2);
        let secs = self.backoff_factor * 2f64.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.backoff_max)
            .min(self.backoff_max)
    }
}

/// Source of a single probe cycle's outcome.
pub trait NodeProbe {
    fn probe(&self, endpoint: &NodeEndpoint) -> Result<RpcOutcome, RpcError>;
}

enum FailedAttempt {
    Status(u16),
    Transport(RpcError),
}

pub struct RpcClient {
    http: reqwest::blocking::Client,
    policy: RetryPolicy,
}

impl RpcClient {
    pub fn new(policy: RetryPolicy, timeout: Duration) -> Result<Self, RpcError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| RpcError::Client(e.to_string()))?;
        Ok(Self { http, policy })
    }

    /// Both counts, or the first error. Either call failing fails the pair.
    pub fn fetch_counts(&self, endpoint: &NodeEndpoint) -> Result<(u64, u64), RpcError> {
        let local = self.call_count(endpoint, BLOCK_COUNT_ACTION, BLOCK_COUNT_FIELD)?;
        let network = self.call_count(endpoint, TELEMETRY_ACTION, TELEMETRY_FIELD)?;
        Ok((local, network))
    }

    pub fn call_count(
        &self,
        endpoint: &NodeEndpoint,
        action: &'static str,
        field: &'static str,
    ) -> Result<u64, RpcError> {
        let body = self.call(endpoint, action)?;
        let value = body
            .get(field)
            .ok_or(RpcError::MissingField { action, field })?;
        parse_count(action, field, value)
    }

    pub fn call(&self, endpoint: &NodeEndpoint, action: &'static str) -> Result<Value, RpcError> {
        let url = endpoint.rpc_url();
        let mut retry = 0u32;
        loop {
            debug!(%url, action, attempt = retry + 1, "rpc request");
            let failed = match self.http.post(&url).json(&json!({ "action": action })).send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if !self.policy.is_retryable_status(status) {
                        return resp
                            .json::<Value>()
                            .map_err(|e| RpcError::from_transport(action, e));
                    }
                    FailedAttempt::Status(status)
                }
                Err(e) => {
                    let err = RpcError::from_transport(action, e);
                    if !err.is_connectivity() {
                        return Err(err);
                    }
                    FailedAttempt::Transport(err)
                }
            };

            if retry >= self.policy.total {
                return Err(match failed {
                    FailedAttempt::Status(status) => RpcError::RetriesExhausted {
                        action,
                        status,
                        retries: retry,
                    },
                    FailedAttempt::Transport(err) => err,
                });
            }

            retry += 1;
            let delay = self.policy.backoff(retry);
            match &failed {
                FailedAttempt::Status(status) => {
                    warn!(action, status, retry, delay_ms = delay.as_millis() as u64, "rpc retryable status")
                }
                FailedAttempt::Transport(err) => {
                    warn!(action, error = %err, retry, delay_ms = delay.as_millis() as u64, "rpc transport failure")
                }
            }
            std::thread::sleep(delay);
        }
    }
}

impl NodeProbe for RpcClient {
    fn probe(&self, endpoint: &NodeEndpoint) -> Result<RpcOutcome, RpcError> {
        match self.fetch_counts(endpoint) {
            Ok((local_count, network_count)) => Ok(RpcOutcome::Success {
                local_count,
                network_count,
            }),
            Err(err) if err.is_connectivity() => {
                warn!(endpoint = %endpoint.connection_string, error = %err, "node unreachable");
                Ok(RpcOutcome::ConnectivityFailure)
            }
            Err(err) => Err(err),
        }
    }
}

/// Node RPC reports counts as decimal strings; plain JSON integers are accepted too.
pub fn parse_count(
    action: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<u64, RpcError> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| RpcError::InvalidCount {
        action,
        field,
        value: value.to_string(),
    })
}
