use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "nano-probe",
    version,
    about = "Nano node monitoring probe with optional Slack and Discord webhook notifications"
)]
pub struct Cli {
    #[arg(
        long = "connection_string",
        help = "RPC connection of node ex: localhost:7075 [default: localhost:7075]"
    )]
    pub connection_string: Option<String>,
    #[arg(long = "slack_webhook", help = "Slack webhook url to send alerts to")]
    pub slack_webhook: Option<String>,
    #[arg(long = "discord_webhook", help = "Discord webhook url to send alerts to")]
    pub discord_webhook: Option<String>,
    #[arg(long, help = "Endpoint nickname used in alert text (defaults to the host)")]
    pub nickname: Option<String>,
    #[arg(
        long,
        help = "TOML config file (default: ~/.config/nano-probe/config.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Output a machine-readable JSON probe report")]
    pub json: bool,
}
