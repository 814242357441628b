//! Bindings to the deployed contracts the wallet backend drives.
//!
//! [`Binding`] is the single path from a contract object to raw calls and
//! transactions: it normalizes the contract address once at construction
//! and funnels every invocation through the same build/sign/broadcast
//! plumbing. The typed contracts ([`Erc20`], [`SmartAccount`],
//! [`AccountFactory`]) each hold a binding and expose their own method set
//! rather than inheriting from it.

pub(crate) mod abi;
mod account;
mod erc20;
mod factory;

pub use self::{
    account::SmartAccount,
    erc20::Erc20,
    factory::{AccountFactory, AccountIdentity},
};

use {
    crate::{
        domain::{amount, eth},
        infra::blockchain::{self, ChainClient, tx},
    },
    alloy::signers::local::PrivateKeySigner,
    std::sync::Arc,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidAddress(#[from] eth::InvalidAddress),
    #[error(transparent)]
    Chain(#[from] blockchain::Error),
    #[error(transparent)]
    Sign(#[from] tx::SignError),
    #[error("could not decode contract return data: {0}")]
    Decode(#[from] alloy::sol_types::Error),
    #[error(transparent)]
    Amount(#[from] amount::Error),
}

/// An immutable association of a chain client with a deployed contract
/// address.
#[derive(Clone)]
pub struct Binding {
    client: Arc<dyn ChainClient>,
    address: eth::Address,
    chain_id: Option<eth::ChainId>,
}

impl Binding {
    /// Binds `raw_address`, normalizing it to checksummed form. Fails if the
    /// address cannot be normalized.
    pub fn new(
        client: Arc<dyn ChainClient>,
        raw_address: &str,
        chain_id: Option<eth::ChainId>,
    ) -> Result<Self, eth::InvalidAddress> {
        Ok(Self {
            client,
            address: eth::parse_address(raw_address)?,
            chain_id,
        })
    }

    pub fn address(&self) -> eth::Address {
        self.address
    }

    /// Executes a read-only call against the bound contract.
    pub async fn call(&self, calldata: Vec<u8>) -> Result<eth::Bytes, blockchain::Error> {
        self.client.call(self.address, calldata.into()).await
    }

    /// Builds, signs, and broadcasts a state-changing call against the bound
    /// contract with a fixed gas budget, returning the transaction hash.
    pub async fn transact(
        &self,
        calldata: Vec<u8>,
        gas: eth::Gas,
        value: eth::U256,
        signer: &PrivateKeySigner,
    ) -> Result<eth::TxHash, Error> {
        let mut skeleton = tx::build(
            self.client.as_ref(),
            signer.address(),
            tx::Options {
                chain_id: self.chain_id,
                gas: Some(gas),
                gas_price: None,
            },
        )
        .await?;
        skeleton.to = Some(self.address);
        skeleton.value = Some(value);
        skeleton.data = Some(calldata.into());
        Ok(tx::sign_and_send(self.client.as_ref(), skeleton, signer).await?)
    }
}
