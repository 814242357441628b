use {
    super::{Binding, Error, abi::IErc20},
    crate::{
        domain::{
            amount::{self, Amount},
            eth,
        },
        infra::blockchain::ChainClient,
    },
    alloy::{signers::local::PrivateKeySigner, sol_types::SolCall},
    bigdecimal::BigDecimal,
    std::sync::Arc,
};

/// Gas limit for ERC-20 `transfer` and `approve` calls. A fixed budget, not
/// an estimate: both calls are bounded and well under this limit on any
/// mainstream token.
const TOKEN_CALL_GAS: eth::Gas = eth::Gas(100_000);

/// A deployed ERC-20 token.
pub struct Erc20 {
    binding: Binding,
}

impl Erc20 {
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

    /// The token's decimal precision, read live from the contract. Not
    /// cached: a failed read is surfaced, never papered over with an
    /// assumed default.
    pub async fn decimals(&self) -> Result<u8, Error> {
        let output = self.binding.call(IErc20::decimalsCall {}.abi_encode()).await?;
        Ok(IErc20::decimalsCall::abi_decode_returns(&output)?)
    }

    /// The holder's balance in base units.
    pub async fn balance_of(&self, holder: &str) -> Result<eth::U256, Error> {
        let holder = eth::parse_address(holder)?;
        let output = self
            .binding
            .call(IErc20::balanceOfCall { holder }.abi_encode())
            .await?;
        Ok(IErc20::balanceOfCall::abi_decode_returns(&output)?)
    }

    /// The holder's balance in human units, scaled by the live decimals.
    pub async fn balance_of_decimal(&self, holder: &str) -> Result<BigDecimal, Error> {
        let balance = self.balance_of(holder).await?;
        self.from_base_units(balance).await
    }

    pub async fn allowance(&self, owner: &str, spender: &str) -> Result<eth::U256, Error> {
        let owner = eth::parse_address(owner)?;
        let spender = eth::parse_address(spender)?;
        let output = self
            .binding
            .call(IErc20::allowanceCall { owner, spender }.abi_encode())
            .await?;
        Ok(IErc20::allowanceCall::abi_decode_returns(&output)?)
    }

    /// Transfers `amount` base units to `to`. Conversion from human units is
    /// the caller's responsibility via [`Erc20::to_base_units`].
    pub async fn transfer(
        &self,
        to: &str,
        amount: eth::U256,
        signer: &PrivateKeySigner,
    ) -> Result<eth::TxHash, Error> {
        let to = eth::parse_address(to)?;
        let calldata = IErc20::transferCall { to, amount }.abi_encode();
        self.binding
            .transact(calldata, TOKEN_CALL_GAS, eth::U256::ZERO, signer)
            .await
    }

    /// Approves `spender` for `amount` base units.
    pub async fn approve(
        &self,
        spender: &str,
        amount: eth::U256,
        signer: &PrivateKeySigner,
    ) -> Result<eth::TxHash, Error> {
        let spender = eth::parse_address(spender)?;
        let calldata = IErc20::approveCall { spender, amount }.abi_encode();
        self.binding
            .transact(calldata, TOKEN_CALL_GAS, eth::U256::ZERO, signer)
            .await
    }

    /// Scales a human amount into base units using the token's live
    /// decimals.
    pub async fn to_base_units(&self, amount: &Amount) -> Result<eth::U256, Error> {
        let decimals = self.decimals().await?;
        Ok(amount::to_base_units(amount, decimals)?)
    }

    /// Scales a base-unit amount into human units using the token's live
    /// decimals.
    pub async fn from_base_units(&self, amount: eth::U256) -> Result<BigDecimal, Error> {
        let decimals = self.decimals().await?;
        Ok(amount::from_base_units(amount, decimals))
    }
}
