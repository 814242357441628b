//! Conversion between human-denominated token amounts and integer base-unit
//! ("wei") amounts.
//!
//! All arithmetic is arbitrary-precision decimal, so sub-unity fractional
//! amounts survive scaling instead of being rounded away by a fixed-width
//! context, and the result is range-checked against the chain's native
//! 256-bit integer width instead of silently clamped.

use {
    crate::util::conv,
    alloy::primitives::U256,
    bigdecimal::{BigDecimal, num_bigint::ToBigInt},
    num::{BigInt, One, Zero, bigint::Sign},
};

/// A token amount in human units, in any of the representations accepted at
/// the system boundary.
#[derive(Clone, Debug)]
pub enum Amount {
    /// An integral number of whole tokens.
    Integer(U256),
    /// A binary float. Converted through its shortest decimal text form to
    /// avoid binary floating-point artifacts.
    Float(f64),
    /// A decimal string, e.g. `"1.5"`.
    Text(String),
    /// An arbitrary-precision decimal.
    Decimal(BigDecimal),
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::Integer(U256::from(value))
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<BigDecimal> for Amount {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be interpreted as a decimal number.
    #[error("unsupported amount representation: {0:?}")]
    Unsupported(String),
    /// The scaled base-unit value falls outside `[0, 2^256 - 1]`.
    #[error("amount outside the representable base-unit range [0, 2^256 - 1]")]
    OutOfRange,
}

/// Scales a human amount by `10^decimals` into base units.
///
/// Excess fractional digits beyond the token's precision are truncated
/// toward zero, matching integer conversion semantics on-chain.
pub fn to_base_units(amount: &Amount, decimals: u8) -> Result<U256, Error> {
    let value = match amount {
        Amount::Integer(n) => {
            // Integral amounts never carry fractional digits, so plain
            // checked 256-bit arithmetic suffices.
            let factor = U256::from(10_u8)
                .checked_pow(U256::from(decimals))
                .ok_or(Error::OutOfRange)?;
            return n.checked_mul(factor).ok_or(Error::OutOfRange);
        }
        Amount::Float(f) => parse_decimal(&f.to_string())?,
        Amount::Text(s) => parse_decimal(s)?,
        Amount::Decimal(d) => d.clone(),
    };

    if value.is_zero() {
        return Ok(U256::ZERO);
    }
    if value.sign() == Sign::Minus {
        return Err(Error::OutOfRange);
    }

    // Shifting the decimal exponent is exact; only digits below the token's
    // base unit remain fractional afterwards and get truncated.
    let scaled = value * BigDecimal::new(BigInt::one(), -i64::from(decimals));
    let integral = scaled.to_bigint().ok_or(Error::OutOfRange)?;
    conv::bigint_to_u256(&integral).ok_or(Error::OutOfRange)
}

/// The inverse of [`to_base_units`]: divides a base-unit amount by
/// `10^decimals`. No range check is needed, the input is already bounded by
/// the chain's integer width.
pub fn from_base_units(amount: U256, decimals: u8) -> BigDecimal {
    BigDecimal::new(conv::u256_to_biguint(&amount).into(), i64::from(decimals))
}

fn parse_decimal(s: &str) -> Result<BigDecimal, Error> {
    s.trim()
        .parse()
        .map_err(|_| Error::Unsupported(s.to_owned()))
}
