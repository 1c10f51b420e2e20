//! Finding pools and tokens by address.

use crate::domain::eth::{Address, Token};

/// Returns the first pool whose derived pair address is `deposit_token`.
///
/// `derive` computes a pool's pair address. Configurations where two pools
/// derive the same address are not detected; the first one wins.
pub fn find_pool<P>(
    pools: &[P],
    deposit_token: Address,
    derive: impl Fn(&P) -> Address,
) -> Option<&P> {
    pools.iter().find(|pool| derive(pool) == deposit_token)
}

/// Looks up a token by address.
pub fn resolve_token(tokens: &[Token], address: Address) -> Option<&Token> {
    tokens.iter().find(|token| token.address == address)
}
