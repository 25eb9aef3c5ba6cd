use crate::*;
use anyhow::Context;
use tracing::{debug, info};

pub fn handle_probe(cli: &Cli) -> anyhow::Result<ProbeReport> {
    let file = load_config(cli.config.as_deref())?;
    let settings = ProbeSettings::resolve(cli, file)?;
    let client = RpcClient::new(settings.retry.clone(), settings.timeout)
        .context("failed to set up node rpc client")?;
    let transport = HttpWebhook::new().context("failed to set up webhook client")?;
    run_probe(&client, &transport, &settings, cli.json)
}

/// One probe cycle. The alert text is printed before any channel delivery;
/// with `json` the full report is printed once dispatch is done.
pub fn run_probe(
    probe: &dyn NodeProbe,
    transport: &dyn WebhookTransport,
    settings: &ProbeSettings,
    json: bool,
) -> anyhow::Result<ProbeReport> {
    let endpoint = &settings.endpoint;
    info!(endpoint = %endpoint.connection_string, "probing node");

    let outcome = probe
        .probe(endpoint)
        .with_context(|| format!("probe of {} failed", endpoint.rpc_url()))?;
    let mut report = assess(endpoint, outcome)?;

    if let Some(alert) = report.alert.clone() {
        if !json {
            print_alert(&alert);
        }
        report.notified = dispatch(transport, &settings.channels, &alert);
    } else {
        debug!(
            local_count = ?report.local_count,
            network_count = ?report.network_count,
            "node in sync"
        );
    }

    if json {
        print_json(&report)?;
    }
    Ok(report)
}

/// Turn an rpc outcome into a report, with alert text when one is due.
pub fn assess(endpoint: &NodeEndpoint, outcome: RpcOutcome) -> Result<ProbeReport, SyncError> {
    let address = endpoint.address().to_string();
    let (status, local_count, network_count, alert) = match outcome {
        RpcOutcome::ConnectivityFailure => (
            ProbeStatus::Unreachable,
            None,
            None,
            Some(timed_out_message(&address)),
        ),
        RpcOutcome::Success {
            local_count,
            network_count,
        } => {
            let verdict = evaluate(local_count, network_count)?;
            info!(local_count, network_count, in_sync = verdict.in_sync, "sync verdict");
            if verdict.in_sync {
                (ProbeStatus::InSync, Some(local_count), Some(network_count), None)
            } else {
                (
                    ProbeStatus::OutOfSync,
                    Some(local_count),
                    Some(network_count),
                    Some(out_of_sync_message(&address, local_count, network_count)),
                )
            }
        }
    };

    Ok(ProbeReport {
        status,
        address,
        connection_string: endpoint.connection_string.clone(),
        local_count,
        network_count,
        alert,
        notified: Vec::new(),
    })
}
