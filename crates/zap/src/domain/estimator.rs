use crate::domain::eth::{Address, U256};

/// How much of an input should be swapped before adding liquidity, as
/// computed by the zap contract itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapEstimate {
    pub swap_amount_in: U256,
    pub swap_amount_out: U256,
    pub swap_token_out: Address,
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait SwapEstimating: Send + Sync {
    /// Estimates the swap leg for zapping `amount_in` of `token_in` into
    /// `vault`.
    async fn estimate_swap(
        &self,
        vault: Address,
        token_in: Address,
        amount_in: U256,
    ) -> Result<SwapEstimate, EstimateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("estimator returned no estimate")]
    Empty,
    #[error("invalid estimate: {0}")]
    Invalid(String),
    #[error(transparent)]
    Rpc(#[from] anyhow::Error),
}
