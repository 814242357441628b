mod chain;

pub use {
    self::chain::ChainId,
    alloy::primitives::{Address, B256, Bytes, U256},
};

/// A transaction hash.
pub type TxHash = B256;

/// Gas amount, as a transaction gas limit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Gas(pub u64);

/// An address string that could not be normalized to its EIP-55 checksummed
/// form.
#[derive(Debug, thiserror::Error)]
#[error("invalid address: {0:?}")]
pub struct InvalidAddress(pub String);

/// Parses an address string, normalizing it for use in calls and transaction
/// fields.
///
/// Mixed-case input is treated as EIP-55 encoded and its checksum is
/// verified; single-case input carries no checksum information and is
/// accepted as plain hex. The canonical display form is [`checksum`].
pub fn parse_address(raw: &str) -> Result<Address, InvalidAddress> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InvalidAddress(raw.to_owned()));
    }

    let mixed_case = digits.chars().any(|c| c.is_ascii_uppercase())
        && digits.chars().any(|c| c.is_ascii_lowercase());
    if mixed_case {
        Address::parse_checksummed(format!("0x{digits}"), None)
            .map_err(|_| InvalidAddress(raw.to_owned()))
    } else {
        digits
            .parse()
            .map_err(|_| InvalidAddress(raw.to_owned()))
    }
}

/// The canonical EIP-55 checksummed text form of an address.
pub fn checksum(address: Address) -> String {
    address.to_checksum(None)
}
