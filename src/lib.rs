//! Health probe for a nano node.
//!
//! One run asks the node RPC for its cemented block count and the network
//! telemetry median, decides whether the node is in sync, and alerts the
//! configured webhooks when it is not or when the node cannot be reached.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod services;

pub use cli::Cli;
pub use domain::models::{
    ChannelKind, ChannelTarget, JsonOut, NodeEndpoint, ProbeReport, ProbeStatus, RpcOutcome,
    SyncVerdict,
};
pub use services::alerts::{
    channel_targets, dispatch, out_of_sync_message, timed_out_message, HttpWebhook,
    WebhookTransport,
};
pub use services::config::{load_config, ConfigError, ConfigFile, ProbeSettings};
pub use services::output::{print_alert, print_json};
pub use services::rpc::{NodeProbe, RetryPolicy, RpcClient, RpcError};
pub use services::sync::{evaluate, SyncError};
