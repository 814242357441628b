use {
    bigdecimal::BigDecimal,
    serde::Deserialize,
    serde_with::serde_as,
    std::path::Path,
};

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// The URL of the chain node's JSON-RPC endpoint.
    #[serde_as(as = "serde_with::DisplayFromStr")]
    node_url: reqwest::Url,

    /// Optional chain ID override. When not specified, the chain ID is
    /// fetched live from the node for every transaction.
    chain_id: Option<u64>,

    /// Address of the deployed smart account factory.
    account_factory: String,

    /// Address of the token newly created accounts are funded with.
    token: String,

    /// Hex-encoded private key of the operator account.
    operator_private_key: String,

    /// Human-denominated token amount for the best-effort funding step.
    /// Absent means no funding.
    funding_amount: Option<BigDecimal>,
}

/// Load the chain core configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> super::Config {
    let data = tokio::fs::read_to_string(path)
        .await
        .unwrap_or_else(|err| panic!("I/O error while reading {path:?}: {err:?}"));
    let config: Config = toml::de::from_str(&data)
        .unwrap_or_else(|err| panic!("TOML syntax error while reading {path:?}: {err:?}"));

    super::Config {
        node_url: config.node_url,
        chain_id: config.chain_id.map(Into::into),
        contracts: super::Contracts {
            account_factory: config.account_factory,
            token: config.token,
        },
        operator_key: config.operator_private_key,
        funding_amount: config.funding_amount,
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[tokio::test]
    async fn loads_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
node-url = "http://localhost:8545"
chain-id = 31337
account-factory = "0x9406Cc6185a346906296840746125a0E44976454"
token = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
operator-private-key = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
funding-amount = "1000"
"#
        )
        .unwrap();

        let config = load(file.path()).await;
        assert_eq!(config.node_url.as_str(), "http://localhost:8545/");
        assert_eq!(config.chain_id, Some(crate::domain::eth::ChainId(31337)));
        assert_eq!(config.funding_amount, Some(1000.into()));
    }

    #[tokio::test]
    async fn funding_is_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
node-url = "http://localhost:8545"
account-factory = "0x9406Cc6185a346906296840746125a0E44976454"
token = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
operator-private-key = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
"#
        )
        .unwrap();

        let config = load(file.path()).await;
        assert_eq!(config.chain_id, None);
        assert!(config.funding_amount.is_none());
    }

    #[tokio::test]
    #[should_panic(expected = "TOML syntax error")]
    async fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
node-url = "http://localhost:8545"
account-factory = "0x9406Cc6185a346906296840746125a0E44976454"
token = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
operator-private-key = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
surprise = true
"#
        )
        .unwrap();
        load(file.path()).await;
    }
}
