#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// `host:port` of a mock server, as passed to `--connection_string`.
pub fn connection_string(server: &MockServer) -> String {
    server.address().to_string()
}

pub fn block_count_reply(cemented: u64) -> Value {
    json!({"count": cemented.to_string(), "unchecked": "0", "cemented": cemented.to_string()})
}

/// Counts as decimal strings, the way the node sends them.
pub fn telemetry_reply(cemented_count: u64) -> Value {
    json!({
        "block_count": cemented_count.to_string(),
        "cemented_count": cemented_count.to_string(),
        "peer_count": "12"
    })
}

pub fn block_count_mock(server: &MockServer, cemented: u64) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body(json!({"action": "block_count"}));
        then.status(200).json_body(block_count_reply(cemented));
    })
}

pub fn telemetry_mock(server: &MockServer, cemented_count: u64) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .json_body(json!({"action": "telemetry"}));
        then.status(200).json_body(telemetry_reply(cemented_count));
    })
}

/// Node answering both rpc actions.
pub fn node_mocks(server: &MockServer, cemented: u64, cemented_count: u64) -> (Mock<'_>, Mock<'_>) {
    (
        block_count_mock(server, cemented),
        telemetry_mock(server, cemented_count),
    )
}

/// Webhook endpoint expecting exactly `payload` as a JSON POST.
pub fn webhook_mock<'a>(server: &'a MockServer, path: &str, payload: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST)
            .path(path)
            .header("content-type", "application/json")
            .json_body(payload);
        then.status(200).json_body(json!({"ok": true}));
    })
}

/// Webhook endpoint accepting any POST.
pub fn any_webhook_mock<'a>(server: &'a MockServer, path: &str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST).path(path);
        then.status(200).json_body(json!({"ok": true}));
    })
}

pub fn slack_payload(message: &str) -> Value {
    json!({"blocks": [{"type": "section", "text": {"type": "mrkdwn", "text": message}}]})
}

pub fn discord_payload(message: &str) -> Value {
    json!({"content": message})
}

/// Block until `mock` has been hit `n` times or `within` elapses.
pub fn wait_for_hits(mock: &Mock<'_>, n: usize, within: Duration) {
    let deadline = Instant::now() + within;
    while mock.hits() < n {
        assert!(Instant::now() < deadline, "mock saw {} of {n} hits", mock.hits());
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// An address nothing listens on.
pub fn closed_port() -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    addr.to_string()
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub config: PathBuf,
}

impl TestEnv {
    /// Isolated HOME plus a config file that disables backoff sleeps.
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).expect("create isolated home");
        let config = tmp.path().join("config.toml");
        std::fs::write(&config, "[rpc]\ntimeout_ms = 500\nbackoff_factor = 0.0\n")
            .expect("write config");
        Self {
            _tmp: tmp,
            home,
            config,
        }
    }

    /// Binary with isolated HOME and no `--config`.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("nano-probe");
        cmd.env("HOME", &self.home)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env("no_proxy", "127.0.0.1,localhost")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--config").arg(&self.config);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
