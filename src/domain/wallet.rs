//! Orchestration of the wallet lifecycle flows: registering a smart account
//! (with an optional best-effort funding step) and executing calls through
//! it.
//!
//! These flows define the confirmation-wait policy on top of the single-shot
//! receipt resolver; the resolver itself never loops.

use {
    crate::{
        domain::{
            amount::Amount,
            eth,
        },
        infra::{
            blockchain::{self, ChainClient, Receipt, receipt::{self, TxOutcome}},
            config::Config,
            contracts::{self, AccountFactory, AccountIdentity, Erc20, SmartAccount},
        },
    },
    alloy::signers::local::PrivateKeySigner,
    bigdecimal::BigDecimal,
    std::{
        sync::Arc,
        time::{Duration, Instant},
    },
};

/// How long and how often to poll for a receipt before giving up.
#[derive(Clone, Copy, Debug)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            deadline: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("operator private key is not a valid secp256k1 key")]
    InvalidKey,
    #[error(transparent)]
    InvalidAddress(#[from] eth::InvalidAddress),
    #[error(transparent)]
    Contract(#[from] contracts::Error),
    #[error(transparent)]
    Chain(#[from] blockchain::Error),
    /// The transaction was mined but execution reverted.
    #[error("transaction {hash} reverted")]
    Reverted { hash: eth::TxHash },
    /// No receipt within the deadline. `last` distinguishes a transaction
    /// the node is still holding (Pending) from one it never saw (Unknown);
    /// the latter will not confirm no matter how long the caller waits.
    #[error("transaction {hash} unconfirmed within deadline, last state {last:?}")]
    ConfirmationTimeout { hash: eth::TxHash, last: TxOutcome },
}

/// The outcome of a successful registration.
#[derive(Clone, Debug)]
pub struct Registration {
    pub identity: AccountIdentity,
    pub create_tx: eth::TxHash,
    /// Present only if the best-effort funding transfer was broadcast.
    pub funding_tx: Option<eth::TxHash>,
}

/// The wallet service: the chain client, the bound factory and funding token
/// contracts, and the operator key paying for transactions.
pub struct Wallet {
    client: Arc<dyn ChainClient>,
    factory: AccountFactory,
    token: Erc20,
    operator: PrivateKeySigner,
    chain_id: Option<eth::ChainId>,
    funding_amount: Option<BigDecimal>,
    wait: WaitPolicy,
}

impl Wallet {
    pub fn new(client: Arc<dyn ChainClient>, config: &Config) -> Result<Self, Error> {
        let operator: PrivateKeySigner =
            config.operator_key.parse().map_err(|_| Error::InvalidKey)?;
        Ok(Self {
            factory: AccountFactory::new(
                client.clone(),
                &config.contracts.account_factory,
                config.chain_id,
            )?,
            token: Erc20::new(client.clone(), &config.contracts.token, config.chain_id)?,
            client,
            operator,
            chain_id: config.chain_id,
            funding_amount: config.funding_amount.clone(),
            wait: WaitPolicy::default(),
        })
    }

    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub fn factory(&self) -> &AccountFactory {
        &self.factory
    }

    pub fn token(&self) -> &Erc20 {
        &self.token
    }

    /// Deploys a smart account for the signer pair, waits for the deployment
    /// to confirm, resolves the deployed address, and then runs the funding
    /// step if one is configured.
    pub async fn register(
        &self,
        signer: &str,
        recovery_signer: &str,
    ) -> Result<Registration, Error> {
        let create_tx = self
            .factory
            .create_account(signer, recovery_signer, &self.operator)
            .await?;
        tracing::info!(hash = %create_tx, signer, "account creation broadcast");
        self.wait_for_receipt(create_tx).await?;

        let identity = self.factory.get_user_by_signer(signer).await?;
        let funding_tx = match &self.funding_amount {
            Some(amount) => self.fund(identity.account, amount).await,
            None => None,
        };
        Ok(Registration {
            identity,
            create_tx,
            funding_tx,
        })
    }

    /// Executes a call through the user's smart account and waits for it to
    /// confirm.
    pub async fn execute(
        &self,
        account: &str,
        dest: &str,
        value: eth::U256,
        calldata: eth::Bytes,
        signature: eth::Bytes,
    ) -> Result<eth::TxHash, Error> {
        let account = SmartAccount::new(self.client.clone(), account, self.chain_id)?;
        let hash = account
            .execute(dest, value, calldata, signature, &self.operator)
            .await?;
        tracing::info!(%hash, account = %eth::checksum(account.address()), "execute broadcast");
        self.wait_for_receipt(hash).await?;
        Ok(hash)
    }

    /// Polls the single-shot resolver until the transaction finalizes or the
    /// deadline passes. A reverted transaction is an error here; callers
    /// wanting to inspect failed receipts use [`receipt::resolve`] directly.
    pub async fn wait_for_receipt(&self, hash: eth::TxHash) -> Result<Receipt, Error> {
        let started = Instant::now();
        loop {
            match receipt::resolve(self.client.as_ref(), hash).await? {
                TxOutcome::Success(receipt) => return Ok(receipt),
                TxOutcome::Failed(_) => return Err(Error::Reverted { hash }),
                last => {
                    if started.elapsed() >= self.wait.deadline {
                        return Err(Error::ConfirmationTimeout { hash, last });
                    }
                    tokio::time::sleep(self.wait.interval).await;
                }
            }
        }
    }

    /// Best-effort initial funding of a new account. A failure here is
    /// logged and reported as absent, not propagated: the account itself
    /// was created successfully.
    async fn fund(&self, account: eth::Address, amount: &BigDecimal) -> Option<eth::TxHash> {
        let transfer = async {
            let base_units = self
                .token
                .to_base_units(&Amount::Decimal(amount.clone()))
                .await?;
            self.token
                .transfer(&eth::checksum(account), base_units, &self.operator)
                .await
        };
        match transfer.await {
            Ok(hash) => {
                tracing::info!(%hash, account = %eth::checksum(account), "funded new account");
                Some(hash)
            }
            Err(err) => {
                tracing::warn!(
                    ?err,
                    account = %eth::checksum(account),
                    "initial funding failed",
                );
                None
            }
        }
    }
}
