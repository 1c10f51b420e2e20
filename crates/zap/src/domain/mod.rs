//! Zap quoting: simulating the legs of a zap against a pool model and
//! assembling them into a [`Quote`].

pub mod deposit;
pub mod estimator;
pub mod eth;
pub mod pool;
pub mod quote;
pub mod selection;
pub mod withdraw;

pub use {
    estimator::{EstimateError, SwapEstimate, SwapEstimating},
    pool::{PoolError, PoolModel, PoolProviding},
    quote::{Allowance, AmountQuote, Quote, QuoteId, Step},
};

/// A failure to produce a quote. None of these are retried, and no partial
/// quote is ever returned alongside them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("swap estimation failed: {0}")]
    Estimation(#[source] EstimateError),
    #[error("pool token {0} does not match any configured token")]
    UnresolvedToken(eth::Address),
    #[error("swap estimate {estimate} exceeds the input amount {amount}")]
    EstimateExceedsInput { estimate: eth::U256, amount: eth::U256 },
    #[error("{amount} is not a valid amount of a token with {decimals} decimals")]
    InvalidAmount {
        amount: bigdecimal::BigDecimal,
        decimals: u8,
    },
    #[error(transparent)]
    Pool(#[from] PoolError),
}
