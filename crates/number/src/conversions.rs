//! Conversion utilities.

use {
    bigdecimal::BigDecimal,
    num::{BigInt, BigUint, One, Signed as _},
    primitive_types::U256,
};

pub fn u256_to_biguint(i: &U256) -> BigUint {
    let mut bytes = [0_u8; 32];
    i.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn biguint_to_u256(i: &BigUint) -> Option<U256> {
    let bytes = i.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    Some(U256::from_big_endian(&bytes))
}

pub fn u256_to_big_int(i: &U256) -> BigInt {
    BigInt::from(u256_to_biguint(i))
}

/// Lossless conversion of an integer amount into a `BigDecimal` with no
/// fractional part.
pub fn u256_to_big_decimal(i: &U256) -> BigDecimal {
    BigDecimal::new(u256_to_big_int(i), 0)
}

/// Scales a base-unit amount down by `decimals` places, e.g. `1500000` with 6
/// decimals becomes `1.5`.
pub fn to_decimal(amount: U256, decimals: u8) -> BigDecimal {
    BigDecimal::new(u256_to_big_int(&amount), i64::from(decimals))
}

/// Scales a decimal amount up into base units. Returns `None` if the value is
/// negative, has more fractional digits than `decimals` allows or does not
/// fit into a `U256`.
pub fn from_decimal(d: &BigDecimal, decimals: u8) -> Option<U256> {
    let scaled = d * BigDecimal::new(BigInt::one(), -i64::from(decimals));
    let (int, exp) = scaled.normalized().as_bigint_and_exponent();
    if int.is_negative() || exp > 0 {
        return None;
    }

    let uint = int.to_biguint()?;
    let factor = BigUint::from(10_u8).pow(exp.unsigned_abs().try_into().ok()?);
    biguint_to_u256(&(uint * factor))
}
