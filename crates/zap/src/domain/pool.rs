//! The pool pricing model the composers simulate against.

use {
    crate::domain::eth::{Address, U256},
    bigdecimal::BigDecimal,
};

/// Result of simulating a swap.
#[derive(Clone, Debug, PartialEq)]
pub struct SwapOutcome {
    pub amount_out: U256,
    /// Fraction of value lost against the pool's spot price, `0.01` being 1%.
    pub price_impact: BigDecimal,
}

/// Result of simulating an add-liquidity call. The amounts are what the pool
/// actually takes, which can be less than what was offered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddLiquidityOutcome {
    pub amount_a: U256,
    pub amount_b: U256,
    pub liquidity: U256,
}

/// Result of simulating a remove-liquidity call, in the pool's token order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoveLiquidityOutcome {
    pub amount0: U256,
    pub amount1: U256,
    pub token0: Address,
    pub token1: Address,
}

/// A two token pool that can simulate the legs of a zap.
///
/// `refresh` replaces the whole local state with the current on-chain state.
/// The simulations then advance that local state the same way the on-chain
/// legs would, so a swap followed by an add-liquidity sees post-swap reserves.
/// An instance must be owned by a single quote request between its refresh
/// and its last simulation.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait PoolModel: Send + Sync {
    async fn refresh(&mut self) -> Result<(), PoolError>;

    fn swap(&mut self, amount_in: U256, token_in: Address) -> Result<SwapOutcome, PoolError>;

    fn add_liquidity(
        &mut self,
        amount_a: U256,
        token_a: Address,
        amount_b: U256,
    ) -> Result<AddLiquidityOutcome, PoolError>;

    fn remove_liquidity(&mut self, liquidity: U256) -> Result<RemoveLiquidityOutcome, PoolError>;
}

/// Creates a fresh, unrefreshed [`PoolModel`] for a pair. Every quote request
/// gets its own instance.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
pub trait PoolProviding: Send + Sync {
    fn create(&self, pair: Address, fee_bps: u32) -> Box<dyn PoolModel>;
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("pool state used before it was refreshed")]
    Stale,
    #[error("token {0} is not part of the pool")]
    UnknownToken(Address),
    #[error("insufficient liquidity")]
    InsufficientLiquidity,
    #[error("fee of {0} bps exceeds 100%")]
    InvalidFee(u32),
    #[error("arithmetic overflow")]
    Overflow,
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}
