use crate::domain::models::SyncVerdict;

pub const DIVERGENCE_THRESHOLD: f64 = 0.01;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SyncError {
    #[error("network block count is 0 while local count is {local_count}; divergence ratio is undefined")]
    ZeroNetworkCount { local_count: u64 },
}

/// Compare the local cemented count against the network median.
///
/// Known quirk, kept literal: divergence is only checked when the local count
/// is *ahead* of the network, and in that branch `delta` is negative, so the
/// ratio can never exceed the threshold. A node that is behind is reported as
/// in sync no matter how far behind it is.
///
/// Counts are compared as integers. The node reports them as decimal strings
/// and they used to be compared as text, where `"98" > "100"` holds and the
/// rule could fire across digit-length boundaries. Integer comparison drops
/// that behaviour so a node at or below the network count is always in sync.
pub fn evaluate(local_count: u64, network_count: u64) -> Result<SyncVerdict, SyncError> {
    let delta = i128::from(network_count) - i128::from(local_count);
    let diverged = if local_count > network_count {
        if network_count == 0 {
            return Err(SyncError::ZeroNetworkCount { local_count });
        }
        delta as f64 / network_count as f64 > DIVERGENCE_THRESHOLD
    } else {
        false
    };

    Ok(SyncVerdict {
        in_sync: !diverged,
        local_count,
        network_count,
    })
}
