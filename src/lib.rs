//! Chain core of an account-abstraction smart-wallet backend.
//!
//! The crate covers transaction construction against live chain state,
//! lossless conversion between human-denominated token amounts and integer
//! base units, signing and broadcasting, three-way receipt resolution, and
//! the contract-call layer built on top (generic binding, ERC-20 token,
//! smart account, account factory). HTTP routing, persistence, and secret
//! storage are the embedding application's concern.

pub mod domain;
pub mod infra;
pub mod util;

#[cfg(test)]
mod tests;

pub use crate::{
    domain::{amount, eth, wallet},
    infra::{blockchain, config, contracts},
};
