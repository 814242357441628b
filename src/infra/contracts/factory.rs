use {
    super::{Binding, Error, abi::ISimpleAccountFactory},
    crate::{domain::eth, infra::blockchain::ChainClient},
    alloy::{signers::local::PrivateKeySigner, sol_types::SolCall},
    std::sync::Arc,
};

/// Gas limit for `createAccount`, which deploys the account proxy.
const CREATE_ACCOUNT_GAS: eth::Gas = eth::Gas(1_000_000);

/// The signer identities bound to a deployed smart account.
#[derive(Clone, Copy, Debug)]
pub struct AccountIdentity {
    pub signer: eth::Address,
    pub recovery_signer: eth::Address,
    pub account: eth::Address,
}

/// The factory contract that deploys smart accounts deterministically from a
/// signer / recovery-signer pair.
pub struct AccountFactory {
    binding: Binding,
}

impl AccountFactory {
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

    /// Deploys a new smart account bound to the given signer pair and
    /// returns the deployment transaction hash.
    pub async fn create_account(
        &self,
        signer: &str,
        recovery_signer: &str,
        payer: &PrivateKeySigner,
    ) -> Result<eth::TxHash, Error> {
        let calldata = ISimpleAccountFactory::createAccountCall {
            signer: eth::parse_address(signer)?,
            recoverySigner: eth::parse_address(recovery_signer)?,
        }
        .abi_encode();
        self.binding
            .transact(calldata, CREATE_ACCOUNT_GAS, eth::U256::ZERO, payer)
            .await
    }

    /// Computes the would-be deployment address for a signer pair and
    /// deployment counter without deploying, so the address can be funded or
    /// shown before the deployment confirms.
    pub async fn get_address(
        &self,
        signer: &str,
        recovery_signer: &str,
        counter: eth::U256,
    ) -> Result<eth::Address, Error> {
        let calldata = ISimpleAccountFactory::getAddressCall {
            signer: eth::parse_address(signer)?,
            recoverySigner: eth::parse_address(recovery_signer)?,
            counter,
        }
        .abi_encode();
        let output = self.binding.call(calldata).await?;
        Ok(ISimpleAccountFactory::getAddressCall::abi_decode_returns(
            &output,
        )?)
    }

    /// Reverse lookup: the signer registered for a deployed account.
    pub async fn get_user_by_contract(&self, account: &str) -> Result<eth::Address, Error> {
        let calldata = ISimpleAccountFactory::getUserByContractCall {
            account: eth::parse_address(account)?,
        }
        .abi_encode();
        let output = self.binding.call(calldata).await?;
        Ok(ISimpleAccountFactory::getUserByContractCall::abi_decode_returns(&output)?)
    }

    /// Reverse lookup: the full identity triple registered for a signer.
    pub async fn get_user_by_signer(&self, signer: &str) -> Result<AccountIdentity, Error> {
        let calldata = ISimpleAccountFactory::getUserBySignerCall {
            signer: eth::parse_address(signer)?,
        }
        .abi_encode();
        let output = self.binding.call(calldata).await?;
        let returns = ISimpleAccountFactory::getUserBySignerCall::abi_decode_returns(&output)?;
        Ok(AccountIdentity {
            signer: returns.user,
            recovery_signer: returns.recoverySigner,
            account: returns.account,
        })
    }
}
