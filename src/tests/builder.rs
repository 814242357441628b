//! Transaction assembly and signing against the fake node.

use {
    crate::{
        domain::{amount::Amount, eth},
        infra::blockchain::{
            Error,
            tx::{self, Options, SignError},
        },
        tests::fake::FakeChain,
    },
    alloy::{
        consensus::TxEnvelope,
        eips::eip2718::Decodable2718,
        primitives::{TxKind, U256, address},
        signers::local::PrivateKeySigner,
    },
};

const SENDER: eth::Address = address!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");

fn operator() -> PrivateKeySigner {
    "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
        .parse()
        .unwrap()
}

fn decode_legacy(raw: &eth::Bytes) -> alloy::consensus::TxLegacy {
    match TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap() {
        TxEnvelope::Legacy(signed) => signed.tx().clone(),
        other => panic!("expected legacy transaction, got {other:?}"),
    }
}

#[tokio::test]
async fn populates_skeleton_from_live_state() {
    let chain = FakeChain::new();
    chain.set_nonce(7);
    chain.set_gas_price(42);
    chain.set_chain_id(1);

    let skeleton = tx::build(&chain, SENDER, Options::default()).await.unwrap();
    assert_eq!(skeleton.nonce, 7);
    assert_eq!(skeleton.gas_price, 42);
    assert_eq!(skeleton.chain_id, eth::ChainId(1));
    assert_eq!(skeleton.from, SENDER);
    assert_eq!(skeleton.to, None);
    assert_eq!(skeleton.value, None);
    assert_eq!(skeleton.data, None);
}

#[tokio::test]
async fn caller_overrides_win_over_live_state() {
    let chain = FakeChain::new();
    chain.set_gas_price(42);
    chain.set_chain_id(1);

    let skeleton = tx::build(
        &chain,
        SENDER,
        Options {
            chain_id: Some(eth::ChainId(1337)),
            gas: None,
            gas_price: Some(7),
        },
    )
    .await
    .unwrap();
    assert_eq!(skeleton.chain_id, eth::ChainId(1337));
    assert_eq!(skeleton.gas_price, 7);
}

#[tokio::test]
async fn gas_is_populated_only_when_supplied() {
    let chain = FakeChain::new();

    let without = tx::build(&chain, SENDER, Options::default()).await.unwrap();
    assert_eq!(without.gas, None);

    let with = tx::build(
        &chain,
        SENDER,
        Options {
            gas: Some(eth::Gas(21_000)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(with.gas, Some(eth::Gas(21_000)));
}

#[tokio::test]
async fn query_failures_propagate_without_retry() {
    let chain = FakeChain::new();
    chain.fail_queries();

    let result = tx::build(&chain, SENDER, Options::default()).await;
    assert!(matches!(result, Err(Error::Query(_))));
}

/// Two concurrent builds for the same sender legitimately observe the same
/// pending nonce; only one of the resulting transactions can be mined. This
/// is a documented hazard, not a bug: callers needing strict per-sender
/// ordering serialize their own builds.
#[tokio::test]
async fn concurrent_builds_race_to_the_same_nonce() {
    let chain = FakeChain::new();
    chain.set_nonce(3);

    let (first, second) = tokio::join!(
        tx::build(&chain, SENDER, Options::default()),
        tx::build(&chain, SENDER, Options::default()),
    );
    assert_eq!(first.unwrap().nonce, 3);
    assert_eq!(second.unwrap().nonce, 3);

    // Serialized builds observe the advanced pending count.
    chain.advance_nonce();
    let third = tx::build(&chain, SENDER, Options::default()).await.unwrap();
    assert_eq!(third.nonce, 4);
}

#[tokio::test]
async fn signs_and_broadcasts_a_skeleton() {
    let chain = FakeChain::new();
    chain.set_nonce(5);
    chain.set_gas_price(42);
    chain.set_chain_id(1);
    let signer = operator();

    let mut skeleton = tx::build(
        &chain,
        signer.address(),
        Options {
            gas: Some(eth::Gas(21_000)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    skeleton.to = Some(SENDER);
    skeleton.value = Some(U256::from(1_u8));

    let hash = tx::sign_and_send(&chain, skeleton, &signer).await.unwrap();

    let broadcasts = chain.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    let transaction = decode_legacy(&broadcasts[0]);
    assert_eq!(transaction.chain_id, Some(1));
    assert_eq!(transaction.nonce, 5);
    assert_eq!(transaction.gas_price, 42);
    assert_eq!(transaction.gas_limit, 21_000);
    assert_eq!(transaction.to, TxKind::Call(SENDER));
    assert_eq!(transaction.value, U256::from(1_u8));

    // The fake derives the hash the way the chain does.
    match TxEnvelope::decode_2718(&mut broadcasts[0].as_ref()).unwrap() {
        TxEnvelope::Legacy(signed) => assert_eq!(*signed.hash(), hash),
        other => panic!("expected legacy transaction, got {other:?}"),
    }
}

#[tokio::test]
async fn refuses_to_sign_without_a_gas_limit() {
    let chain = FakeChain::new();
    let signer = operator();

    let skeleton = tx::build(&chain, signer.address(), Options::default())
        .await
        .unwrap();
    let result = tx::sign_and_send(&chain, skeleton, &signer).await;
    assert!(matches!(result, Err(SignError::MissingGasLimit)));
    assert!(chain.broadcasts().is_empty());
}

#[tokio::test]
async fn node_rejection_is_surfaced_verbatim() {
    let chain = FakeChain::new();
    chain.reject_broadcasts("nonce too low");
    let signer = operator();

    let mut skeleton = tx::build(
        &chain,
        signer.address(),
        Options {
            gas: Some(eth::Gas(21_000)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    skeleton.to = Some(SENDER);

    match tx::sign_and_send(&chain, skeleton, &signer).await {
        Err(SignError::Chain(Error::Rejected(message))) => {
            assert_eq!(message, "nonce too low")
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn native_transfer_scales_human_amounts() {
    let chain = FakeChain::new();
    let signer = operator();

    tx::send_native(
        &chain,
        &SENDER.to_checksum(None),
        &Amount::from("1.5"),
        &signer,
        Options::default(),
    )
    .await
    .unwrap();

    let transaction = decode_legacy(&chain.broadcasts()[0]);
    assert_eq!(transaction.gas_limit, 21_000);
    assert_eq!(transaction.to, TxKind::Call(SENDER));
    assert_eq!(
        transaction.value,
        U256::from(1_500_000_000_000_000_000_u128)
    );
    assert!(transaction.input.is_empty());
}
