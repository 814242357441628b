use serde::{Deserialize, Serialize};

/// An EVM chain ID.
///
/// Kept opaque rather than an enum of known networks: the wallet backend is
/// deployed against whatever chain the factory and token contracts live on,
/// including private test networks.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ChainId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
