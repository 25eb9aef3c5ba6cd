//! Service layer containing probe logic and side-effect helpers.
//!
//! ## Service map
//! - `rpc.rs` — node RPC client, retry policy, failure classification.
//! - `sync.rs` — sync verdict from local vs network cemented counts.
//! - `alerts.rs` — alert templates and Slack/Discord webhook delivery.
//! - `config.rs` — TOML config loading and CLI/config resolution.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod alerts;
pub mod config;
pub mod output;
pub mod rpc;
pub mod sync;
