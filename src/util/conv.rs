//! Conversions between the `num`/`bigdecimal` arbitrary-precision types and
//! the fixed-width 256-bit integers used on the wire.

use {
    alloy::primitives::U256,
    bigdecimal::BigDecimal,
    num::{BigInt, BigUint},
};

/// Converts a `BigUint` to a `U256`. Returns `None` if the value does not
/// fit into 256 bits.
pub fn biguint_to_u256(i: &BigUint) -> Option<U256> {
    let bytes = i.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    Some(U256::from_be_slice(&bytes))
}

pub fn u256_to_biguint(i: &U256) -> BigUint {
    BigUint::from_bytes_be(&i.to_be_bytes::<32>())
}

/// Converts a `BigInt` to a `U256`. Returns `None` for negative values and
/// values that do not fit into 256 bits.
pub fn bigint_to_u256(i: &BigInt) -> Option<U256> {
    if i.sign() == num::bigint::Sign::Minus {
        return None;
    }
    biguint_to_u256(i.magnitude())
}

pub fn u256_to_bigdecimal(i: &U256) -> BigDecimal {
    BigDecimal::new(u256_to_biguint(i).into(), 0)
}
