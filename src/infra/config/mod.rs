mod file;

pub use file::load;

use {crate::domain::eth, bigdecimal::BigDecimal};

/// Runtime configuration of the wallet backend's chain core. The embedding
/// application sources these values (from its config store, environment, or
/// a TOML file via [`load`]); the core treats them as opaque inputs.
#[derive(Clone, Debug)]
pub struct Config {
    /// JSON-RPC endpoint of the node.
    pub node_url: reqwest::Url,

    /// Chain ID override. When absent, the chain ID is fetched live per
    /// transaction.
    pub chain_id: Option<eth::ChainId>,

    pub contracts: Contracts,

    /// Hex-encoded private key of the operator account that pays for
    /// deployments and funding transfers.
    pub operator_key: String,

    /// Optional human-denominated token amount newly created accounts are
    /// funded with, best-effort.
    pub funding_amount: Option<BigDecimal>,
}

/// Addresses of the deployed contracts, as raw strings normalized when the
/// bindings are constructed.
#[derive(Clone, Debug)]
pub struct Contracts {
    pub account_factory: String,
    pub token: String,
}
