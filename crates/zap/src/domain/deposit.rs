//! Quoting a zap from a single token into a pool position.
//!
//! The input is split in two. One part is swapped for the other pool token,
//! the rest is added as liquidity together with the swap output, and the
//! minted LP tokens are deposited. How much to swap is decided by the zap
//! contract (see [`SwapEstimating`]) so the quote agrees with what the
//! transaction will do.

use {
    crate::domain::{
        Error,
        eth::{Address, Token},
        estimator::{EstimateError, SwapEstimate, SwapEstimating},
        pool::PoolModel,
        quote::{Allowance, AmountQuote, Quote, Step},
    },
    std::sync::Arc,
    tracing::instrument,
};

#[derive(Clone, Debug)]
pub struct Request {
    pub option_id: String,
    /// The vault receiving the LP tokens.
    pub vault: Address,
    /// The user's token and full amount. The token may be the native asset.
    pub input: AmountQuote,
    /// The pool token the input is swapped from, i.e. the wrapped form of a
    /// native input.
    pub swap_token_in: Token,
    /// The other pool token.
    pub swap_token_out: Token,
    pub lp_token: Token,
    /// Amounts the zap contract pulls from the user.
    pub allowance_amounts: Vec<AmountQuote>,
}

pub struct Composer {
    estimator: Arc<dyn SwapEstimating>,
    zap: Address,
}

impl Composer {
    pub fn new(estimator: Arc<dyn SwapEstimating>, zap: Address) -> Self {
        Self { estimator, zap }
    }

    /// Asks the estimator how much of the input to swap.
    pub async fn estimate(&self, request: &Request) -> Result<SwapEstimate, Error> {
        let estimate = self
            .estimator
            .estimate_swap(
                request.vault,
                request.swap_token_in.address,
                request.input.amount,
            )
            .await
            .map_err(Error::Estimation)?;
        tracing::debug!(
            swap_amount_in = %estimate.swap_amount_in,
            swap_amount_out = %estimate.swap_amount_out,
            "received swap estimate"
        );
        Ok(estimate)
    }

    /// Estimates and composes a deposit quote. `pool` is expected to be
    /// refreshed by the caller.
    #[instrument(skip_all, fields(option_id = %request.option_id))]
    pub async fn quote(
        &self,
        pool: &mut dyn PoolModel,
        request: &Request,
    ) -> Result<Quote, Error> {
        let estimate = self.estimate(request).await?;
        self.compose(&estimate, pool, request)
    }

    /// Simulates the swap and liquidity legs for a given estimate.
    pub fn compose(
        &self,
        estimate: &SwapEstimate,
        pool: &mut dyn PoolModel,
        request: &Request,
    ) -> Result<Quote, Error> {
        if estimate.swap_token_out != request.swap_token_out.address {
            return Err(Error::Estimation(EstimateError::Invalid(format!(
                "estimate swaps into {} instead of {}",
                estimate.swap_token_out, request.swap_token_out.address
            ))));
        }

        let swap_amount_in = estimate.swap_amount_in;
        let rest_amount_in = request.input.amount.checked_sub(swap_amount_in).ok_or(
            Error::EstimateExceedsInput {
                estimate: swap_amount_in,
                amount: request.input.amount,
            },
        )?;

        let swap = pool.swap(swap_amount_in, request.swap_token_in.address)?;
        tracing::debug!(
            %swap_amount_in,
            amount_out = %swap.amount_out,
            price_impact = %swap.price_impact,
            "simulated swap"
        );

        let added = pool.add_liquidity(
            rest_amount_in,
            request.swap_token_in.address,
            swap.amount_out,
        )?;
        tracing::debug!(
            %rest_amount_in,
            amount_in = %added.amount_a,
            amount_out = %added.amount_b,
            liquidity = %added.liquidity,
            "simulated add liquidity"
        );

        let steps = vec![
            Step::Swap {
                from_token: request.swap_token_in.clone(),
                from_amount: swap_amount_in,
                to_token: request.swap_token_out.clone(),
                to_amount: swap.amount_out,
                price_impact: swap.price_impact,
            },
            Step::Build {
                inputs: vec![
                    AmountQuote::new(request.swap_token_in.clone(), added.amount_a),
                    AmountQuote::new(request.swap_token_out.clone(), added.amount_b),
                ],
                output_token: request.lp_token.clone(),
                output_amount: added.liquidity,
            },
            Step::Deposit {
                token: request.lp_token.clone(),
                amount: added.liquidity,
            },
        ];

        let allowances = request
            .allowance_amounts
            .iter()
            .filter(|amount| !amount.token.native)
            .map(|amount| Allowance {
                token: amount.token.clone(),
                amount: amount.amount,
                spender: self.zap,
            })
            .collect();

        Ok(Quote::new(
            request.option_id.clone(),
            allowances,
            vec![request.input.clone()],
            vec![AmountQuote::new(request.lp_token.clone(), added.liquidity)],
            steps,
        ))
    }
}
