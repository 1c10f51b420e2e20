pub use ethereum_types::{H160, H256, U256};
use {
    serde_with::{DeserializeFromStr, SerializeDisplay},
    std::{fmt, str::FromStr},
    tiny_keccak::{Hasher as _, Keccak},
};

/// An address of a token, pool or contract.
///
/// Addresses are compared as raw bytes, so two hex strings that only differ in
/// letter case (e.g. a checksummed and a lower-case rendering) parse into the
/// same value. All token lookups go through this type.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub struct Address(pub H160);

impl Address {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<H160> for Address {
    fn from(value: H160) -> Self {
        Self(value)
    }
}

impl From<Address> for H160 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| AddressError::Length(bytes.len()))?;
        Ok(Self(H160(bytes)))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid hex address: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("address must be 20 bytes, got {0}")]
    Length(usize),
}

/// An ERC20 token, or the chain's native asset.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
    pub symbol: String,
    pub native: bool,
}

/// The chain's native asset together with the ERC20 that wraps it.
///
/// Pools only ever hold the wrapped token. The substitutions below are the
/// only place where the two are swapped for one another.
#[derive(Clone, Debug)]
pub struct NativePair {
    pub native: Token,
    pub wrapped: Token,
}

impl NativePair {
    /// The token a user receives for a pool token: the native asset in place
    /// of its wrapped form, anything else unchanged.
    pub fn to_output(&self, token: &Token) -> Token {
        if token.address == self.wrapped.address {
            self.native.clone()
        } else {
            token.clone()
        }
    }

    /// The token a pool holds for a user-facing token: the wrapped form in
    /// place of the native asset, anything else unchanged.
    pub fn to_pool(&self, token: &Token) -> Token {
        if token.address == self.native.address {
            self.wrapped.clone()
        } else {
            token.clone()
        }
    }
}

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(bytes);
    let mut hash = [0_u8; 32];
    hasher.finalize(&mut hash);
    hash
}
