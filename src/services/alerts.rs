use crate::domain::models::{ChannelKind, ChannelTarget};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use tracing::debug;

pub fn out_of_sync_message(address: &str, local_count: u64, network_count: u64) -> String {
    format!(
        "*ALERT*: Block count on the nano node at {address} \
         is more than 0.01% behind the median network values. \
         Local nano node block count: {local_count}, \
         Median network block count: {network_count}. \
         Investigation and possible node restart is recommended."
    )
}

pub fn timed_out_message(address: &str) -> String {
    format!("*ALERT*: Local RPC calls to the nano node at {address} timed out. Investigation is recommended.")
}

/// Outbound JSON POST used to deliver webhook payloads.
pub trait WebhookTransport {
    fn post_json(&self, url: &str, payload: &Value) -> anyhow::Result<()>;
}

/// Plain reqwest client: default timeout, no retries.
pub struct HttpWebhook {
    client: reqwest::blocking::Client,
}

impl HttpWebhook {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::blocking::Client::builder().build()?,
        })
    }
}

impl WebhookTransport for HttpWebhook {
    fn post_json(&self, url: &str, payload: &Value) -> anyhow::Result<()> {
        // Status is not inspected; delivery is fire-and-forget.
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()?;
        Ok(())
    }
}

impl ChannelKind {
    pub fn payload(self, message: &str) -> Value {
        match self {
            ChannelKind::Slack => json!({
                "blocks": [
                    {"type": "section", "text": {"type": "mrkdwn", "text": message}}
                ]
            }),
            ChannelKind::Discord => json!({ "content": message }),
        }
    }

    pub fn deliver(
        self,
        transport: &dyn WebhookTransport,
        message: &str,
        url: &str,
    ) -> anyhow::Result<()> {
        transport.post_json(url, &self.payload(message))
    }
}

/// Channels with a non-empty destination, Slack first.
pub fn channel_targets(slack_webhook: &str, discord_webhook: &str) -> Vec<ChannelTarget> {
    [
        (ChannelKind::Slack, slack_webhook),
        (ChannelKind::Discord, discord_webhook),
    ]
    .into_iter()
    .filter(|(_, url)| !url.is_empty())
    .map(|(kind, url)| ChannelTarget {
        kind,
        url: url.to_string(),
    })
    .collect()
}

/// Deliver `message` once per channel. The returned list is every channel a
/// delivery was attempted on.
///
/// Delivery errors are logged at debug and swallowed on purpose, so one dead
/// webhook can neither abort the run nor skip the remaining channels.
pub fn dispatch(
    transport: &dyn WebhookTransport,
    channels: &[ChannelTarget],
    message: &str,
) -> Vec<ChannelKind> {
    let mut attempted = Vec::with_capacity(channels.len());
    for target in channels {
        match target.kind.deliver(transport, message, &target.url) {
            Ok(()) => debug!(channel = ?target.kind, "alert delivered"),
            Err(e) => debug!(channel = ?target.kind, error = %e, "alert delivery failed"),
        }
        attempted.push(target.kind);
    }
    attempted
}
