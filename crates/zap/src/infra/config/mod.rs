//! Static configuration of the zap: contracts, tokens and pools.

use {
    crate::domain::eth::{Address, H256, NativePair, Token},
    url::Url,
};

pub mod file;

#[derive(Clone, Debug)]
pub struct Config {
    /// JSON-RPC node used for estimates and pool state.
    pub node_url: Url,
    /// The zap contract. Spender of every allowance.
    pub zap: Address,
    /// Pair factory and the hash of the pair init code, for deriving pair
    /// addresses.
    pub factory: Address,
    pub pair_init_code_hash: H256,
    pub native: NativePair,
    /// All known ERC20 tokens, including the wrapped native token.
    pub tokens: Vec<Token>,
    pub pools: Vec<Pool>,
}

/// A vault over a two token pool.
#[derive(Clone, Debug)]
pub struct Pool {
    pub id: String,
    pub vault: Address,
    /// The constituents in configured order.
    pub tokens: [Token; 2],
    pub fee_bps: u32,
}
