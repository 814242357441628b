//! The boundary to the chain node.
//!
//! [`ChainClient`] is the minimal capability surface the rest of the crate
//! requires from a node connection; [`Rpc`] implements it over an HTTP
//! JSON-RPC transport. Tests substitute deterministic in-memory fakes.

pub mod receipt;
pub mod tx;

use {
    crate::domain::eth,
    alloy::{
        network::TransactionBuilder,
        providers::{Provider, RootProvider},
        rpc::types::TransactionRequest,
    },
    async_trait::async_trait,
};

/// A transaction as seen by the node, reduced to the fields the wallet
/// backend inspects. Presence alone distinguishes "known to the node" from
/// "never seen".
#[derive(Clone, Debug)]
pub struct TxRecord {
    pub hash: eth::TxHash,
    /// `None` while the transaction sits in the mempool.
    pub block_number: Option<u64>,
}

/// The finalized record of a mined transaction's outcome.
#[derive(Clone, Debug)]
pub struct Receipt {
    pub transaction_hash: eth::TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// `true` if execution succeeded.
    pub status: bool,
    /// Set for deployment transactions.
    pub contract_address: Option<eth::Address>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node-level failure while reading chain state. Never retried here;
    /// the caller decides retry policy.
    #[error("chain query failed: {0}")]
    Query(String),
    /// The node refused a signed transaction. The node's message is carried
    /// verbatim.
    #[error("transaction rejected by node: {0}")]
    Rejected(String),
}

/// Capabilities the wallet core requires from a chain connection.
///
/// Every call is a stateless request/response round trip, so one client may
/// be shared read-only across concurrent callers. Calls suspend the caller
/// while the request is outstanding without blocking unrelated work.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The sender's transaction count including not-yet-mined transactions.
    async fn pending_nonce(&self, address: eth::Address) -> Result<u64, Error>;

    async fn gas_price(&self) -> Result<u128, Error>;

    async fn chain_id(&self) -> Result<eth::ChainId, Error>;

    /// Executes a read-only contract call.
    async fn call(&self, to: eth::Address, data: eth::Bytes) -> Result<eth::Bytes, Error>;

    /// Broadcasts a signed, serialized transaction, returning its hash on
    /// acceptance by the node. Acceptance is not inclusion.
    async fn send_raw_transaction(&self, raw: eth::Bytes) -> Result<eth::TxHash, Error>;

    async fn transaction(&self, hash: eth::TxHash) -> Result<Option<TxRecord>, Error>;

    async fn receipt(&self, hash: eth::TxHash) -> Result<Option<Receipt>, Error>;
}

/// A [`ChainClient`] over an HTTP JSON-RPC node connection.
pub struct Rpc {
    provider: RootProvider,
}

impl Rpc {
    pub fn new(node_url: reqwest::Url) -> Self {
        Self {
            provider: RootProvider::new_http(node_url),
        }
    }
}

fn query_err(err: impl std::fmt::Display) -> Error {
    Error::Query(err.to_string())
}

#[async_trait]
impl ChainClient for Rpc {
    async fn pending_nonce(&self, address: eth::Address) -> Result<u64, Error> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(query_err)
    }

    async fn gas_price(&self) -> Result<u128, Error> {
        self.provider.get_gas_price().await.map_err(query_err)
    }

    async fn chain_id(&self) -> Result<eth::ChainId, Error> {
        self.provider
            .get_chain_id()
            .await
            .map(eth::ChainId)
            .map_err(query_err)
    }

    async fn call(&self, to: eth::Address, data: eth::Bytes) -> Result<eth::Bytes, Error> {
        let request = TransactionRequest::default().with_to(to).with_input(data);
        self.provider.call(request).await.map_err(query_err)
    }

    async fn send_raw_transaction(&self, raw: eth::Bytes) -> Result<eth::TxHash, Error> {
        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .map_err(|err| Error::Rejected(err.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn transaction(&self, hash: eth::TxHash) -> Result<Option<TxRecord>, Error> {
        let transaction = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(query_err)?;
        Ok(transaction.map(|transaction| TxRecord {
            hash,
            block_number: transaction.block_number,
        }))
    }

    async fn receipt(&self, hash: eth::TxHash) -> Result<Option<Receipt>, Error> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(query_err)?;
        Ok(receipt.map(|receipt| Receipt {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            status: receipt.status(),
            contract_address: receipt.contract_address,
        }))
    }
}
