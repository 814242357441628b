//! Transaction assembly and signing.
//!
//! A [`Skeleton`] is assembled fresh for every operation from live chain
//! state and caller overrides, then signed and broadcast in a separate step.
//! Broadcast acceptance and chain inclusion are different guarantees; see
//! [`super::receipt`] for resolving the eventual outcome.

use {
    super::{ChainClient, Error},
    crate::domain::{
        amount::{self, Amount},
        eth,
    },
    alloy::{
        consensus::{SignableTransaction, TxLegacy},
        eips::eip2718::Encodable2718,
        network::TxSignerSync,
        primitives::TxKind,
        signers::local::PrivateKeySigner,
    },
};

/// Gas limit for a native token transfer.
pub const NATIVE_TRANSFER_GAS: eth::Gas = eth::Gas(21_000);

/// Decimal precision of the chain's native token.
const NATIVE_DECIMALS: u8 = 18;

/// An unsigned transaction skeleton. Assembled per operation and never
/// reused: the nonce is only valid for the state it was fetched against.
#[derive(Clone, Debug)]
pub struct Skeleton {
    pub chain_id: eth::ChainId,
    pub gas_price: u128,
    pub nonce: u64,
    pub from: eth::Address,
    /// Populated only when the caller supplied a gas limit; estimation is
    /// not this crate's concern.
    pub gas: Option<eth::Gas>,
    pub to: Option<eth::Address>,
    pub value: Option<eth::U256>,
    pub data: Option<eth::Bytes>,
}

/// Caller-supplied overrides for [`build`]. Any field left `None` is
/// fetched live from the node.
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub chain_id: Option<eth::ChainId>,
    pub gas: Option<eth::Gas>,
    pub gas_price: Option<u128>,
}

/// Assembles a transaction skeleton for `from`.
///
/// The nonce is always the *pending* transaction count, so transactions
/// queued in quick succession from the same sender receive increasing
/// nonces. Two concurrent builds for one sender can still race to the same
/// nonce; callers needing strict per-sender ordering must serialize their
/// own builds (one in-flight transaction per sender).
pub async fn build(
    client: &dyn ChainClient,
    from: eth::Address,
    options: Options,
) -> Result<Skeleton, Error> {
    let nonce = client.pending_nonce(from).await?;
    let chain_id = match options.chain_id {
        Some(chain_id) => chain_id,
        None => client.chain_id().await?,
    };
    let gas_price = match options.gas_price {
        Some(gas_price) => gas_price,
        None => client.gas_price().await?,
    };
    Ok(Skeleton {
        chain_id,
        gas_price,
        nonce,
        from,
        gas: options.gas,
        to: None,
        value: None,
        data: None,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The skeleton carries no gas limit. Every transacting code path in
    /// this crate budgets gas explicitly, so this indicates a caller bug.
    #[error("transaction skeleton has no gas limit")]
    MissingGasLimit,
    #[error("signing failed: {0}")]
    Signer(#[from] alloy::signers::Error),
    #[error(transparent)]
    Chain(#[from] Error),
}

/// Signs `skeleton` as a legacy transaction and broadcasts it, returning
/// the transaction hash on node acceptance without waiting for inclusion.
///
/// The sender account is derived solely from `signer`; that it matches
/// `skeleton.from` is the caller's responsibility.
pub async fn sign_and_send(
    client: &dyn ChainClient,
    skeleton: Skeleton,
    signer: &PrivateKeySigner,
) -> Result<eth::TxHash, SignError> {
    let gas = skeleton.gas.ok_or(SignError::MissingGasLimit)?;
    let mut transaction = TxLegacy {
        chain_id: Some(skeleton.chain_id.0),
        nonce: skeleton.nonce,
        gas_price: skeleton.gas_price,
        gas_limit: gas.0,
        to: match skeleton.to {
            Some(to) => TxKind::Call(to),
            None => TxKind::Create,
        },
        value: skeleton.value.unwrap_or_default(),
        input: skeleton.data.unwrap_or_default(),
    };
    let signature = signer.sign_transaction_sync(&mut transaction)?;
    let raw = transaction.into_signed(signature).encoded_2718();
    let hash = client.send_raw_transaction(raw.into()).await?;
    tracing::debug!(%hash, "broadcast transaction");
    Ok(hash)
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    InvalidAddress(#[from] eth::InvalidAddress),
    #[error(transparent)]
    Amount(#[from] amount::Error),
    #[error(transparent)]
    Sign(#[from] SignError),
    #[error(transparent)]
    Chain(#[from] Error),
}

/// Transfers the chain's native token.
///
/// `amount` is a human-denominated value, scaled by the native token's 18
/// decimals.
pub async fn send_native(
    client: &dyn ChainClient,
    to: &str,
    amount: &Amount,
    signer: &PrivateKeySigner,
    options: Options,
) -> Result<eth::TxHash, TransferError> {
    let to = eth::parse_address(to)?;
    let value = amount::to_base_units(amount, NATIVE_DECIMALS)?;
    let mut skeleton = build(
        client,
        signer.address(),
        Options {
            gas: Some(options.gas.unwrap_or(NATIVE_TRANSFER_GAS)),
            ..options
        },
    )
    .await?;
    skeleton.to = Some(to);
    skeleton.value = Some(value);
    Ok(sign_and_send(client, skeleton, signer).await?)
}
