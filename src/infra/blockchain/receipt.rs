//! Single-shot resolution of a broadcast transaction's outcome.

use {
    super::{ChainClient, Error, Receipt},
    crate::domain::eth,
};

/// The observable state of a transaction hash, as of one query.
///
/// `Pending` and `Unknown` are deliberately distinct: a transaction the node
/// has seen but not mined will eventually resolve, while a hash the node
/// does not know may never have been broadcast at all. Conflating the two
/// makes a caller wait forever on the latter.
#[derive(Clone, Debug)]
pub enum TxOutcome {
    /// Mined and executed successfully.
    Success(Receipt),
    /// Mined, but execution reverted.
    Failed(Receipt),
    /// Known to the node, no receipt yet.
    Pending,
    /// Not known to the node at all.
    Unknown,
}

impl TxOutcome {
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }
}

/// Queries the node once and classifies `hash`.
///
/// This is not a poller: callers wanting blocking confirmation semantics
/// layer their own retry loop with a deadline on top (see
/// `domain::wallet::wait_for_receipt`).
pub async fn resolve(client: &dyn ChainClient, hash: eth::TxHash) -> Result<TxOutcome, Error> {
    if let Some(receipt) = client.receipt(hash).await? {
        return Ok(if receipt.status {
            TxOutcome::Success(receipt)
        } else {
            TxOutcome::Failed(receipt)
        });
    }
    Ok(match client.transaction(hash).await? {
        Some(_) => TxOutcome::Pending,
        None => TxOutcome::Unknown,
    })
}
