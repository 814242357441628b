use {
    super::{Binding, Error, abi::ISimpleAccount},
    crate::{domain::eth, infra::blockchain::ChainClient},
    alloy::{signers::local::PrivateKeySigner, sol_types::SolCall},
    std::sync::Arc,
};

/// Gas limit for the proxy `execute` entry point. Higher than a plain call:
/// the account validates the authorizing signature and then performs the
/// inner call.
const EXECUTE_GAS: eth::Gas = eth::Gas(1_000_000);

/// A deployed per-user smart account: a programmable proxy wallet whose one
/// on-chain entry point executes arbitrary calls authorized by the owner's
/// signature.
pub struct SmartAccount {
    binding: Binding,
}

impl SmartAccount {
    pub fn new(
        client: Arc<dyn ChainClient>,
        address: &str,
        chain_id: Option<eth::ChainId>,
    ) -> Result<Self, eth::InvalidAddress> {
        Ok(Self {
            binding: Binding::new(client, address, chain_id)?,
        })
    }

    pub fn address(&self) -> eth::Address {
        self.binding.address()
    }

    /// Calls `dest` with `value` and `calldata` through the proxy account,
    /// authorized by `signature`; `signer` pays for the outer transaction.
    pub async fn execute(
        &self,
        dest: &str,
        value: eth::U256,
        calldata: eth::Bytes,
        signature: eth::Bytes,
        signer: &PrivateKeySigner,
    ) -> Result<eth::TxHash, Error> {
        let dest = eth::parse_address(dest)?;
        let calldata = ISimpleAccount::executeCall {
            dest,
            value,
            func: calldata,
            signature,
        }
        .abi_encode();
        self.binding
            .transact(calldata, EXECUTE_GAS, eth::U256::ZERO, signer)
            .await
    }
}
