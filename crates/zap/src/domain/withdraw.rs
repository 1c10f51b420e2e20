//! Quoting a zap from a pool position back into one or both pool tokens.
//!
//! The LP tokens are always split into the two pool tokens first. When a
//! single output token is requested, the other pool token is then swapped
//! into it.

use {
    crate::domain::{
        Error,
        eth::{Address, NativePair, Token, U256},
        pool::{PoolError, PoolModel},
        quote::{Allowance, AmountQuote, Quote, Step},
        selection,
    },
    tracing::instrument,
};

#[derive(Clone, Debug)]
pub struct Request {
    pub option_id: String,
    /// The vault shares being redeemed.
    pub shares: AmountQuote,
    pub lp_token: Token,
    /// LP tokens released by the vault for `shares`, after withdrawal fees.
    pub withdrawn_amount_after_fee: U256,
    /// The configured pool tokens. Tokens reported by the pool are resolved
    /// against these.
    pub pool_tokens: [Token; 2],
    /// `None` to receive both pool tokens.
    pub swap: Option<SwapLeg>,
    pub native: NativePair,
}

/// The rebalancing swap of a single-token withdrawal.
#[derive(Clone, Debug)]
pub struct SwapLeg {
    /// The pool token sold.
    pub token_in: Token,
    /// The token the user asked for. Either the other pool token or, for a
    /// wrapped native pool token, the native asset.
    pub token_out: Token,
}

pub struct Composer {
    zap: Address,
}

impl Composer {
    pub fn new(zap: Address) -> Self {
        Self { zap }
    }

    /// Composes a withdraw quote. `pool` is always refreshed first.
    #[instrument(skip_all, fields(option_id = %request.option_id))]
    pub async fn quote(
        &self,
        pool: &mut dyn PoolModel,
        request: &Request,
    ) -> Result<Quote, Error> {
        pool.refresh().await?;

        let removed = pool.remove_liquidity(request.withdrawn_amount_after_fee)?;
        let token0 = selection::resolve_token(&request.pool_tokens, removed.token0)
            .ok_or(Error::UnresolvedToken(removed.token0))?;
        let token1 = selection::resolve_token(&request.pool_tokens, removed.token1)
            .ok_or(Error::UnresolvedToken(removed.token1))?;
        tracing::debug!(
            liquidity = %request.withdrawn_amount_after_fee,
            amount0 = %removed.amount0,
            amount1 = %removed.amount1,
            "simulated remove liquidity"
        );

        let split = Step::Split {
            input_token: request.lp_token.clone(),
            input_amount: request.withdrawn_amount_after_fee,
            outputs: vec![
                AmountQuote::new(token0.clone(), removed.amount0),
                AmountQuote::new(token1.clone(), removed.amount1),
            ],
        };
        let allowances = vec![Allowance {
            token: request.shares.token.clone(),
            amount: request.shares.amount,
            spender: self.zap,
        }];
        let inputs = vec![request.shares.clone()];

        let Some(leg) = &request.swap else {
            let outputs = vec![
                AmountQuote::new(request.native.to_output(token0), removed.amount0),
                AmountQuote::new(request.native.to_output(token1), removed.amount1),
            ];
            return Ok(Quote::new(
                request.option_id.clone(),
                allowances,
                inputs,
                outputs,
                vec![split],
            ));
        };

        let (withdrawn_in, withdrawn_out) = if token0.address == leg.token_in.address {
            (removed.amount0, removed.amount1)
        } else if token1.address == leg.token_in.address {
            (removed.amount1, removed.amount0)
        } else {
            return Err(Error::UnresolvedToken(leg.token_in.address));
        };

        let swap = pool.swap(withdrawn_in, leg.token_in.address)?;
        tracing::debug!(
            %withdrawn_in,
            amount_out = %swap.amount_out,
            price_impact = %swap.price_impact,
            "simulated swap"
        );
        let amount_out = withdrawn_out
            .checked_add(swap.amount_out)
            .ok_or(PoolError::Overflow)?;

        let swap = Step::Swap {
            from_token: leg.token_in.clone(),
            from_amount: withdrawn_in,
            to_token: leg.token_out.clone(),
            to_amount: swap.amount_out,
            price_impact: swap.price_impact,
        };

        Ok(Quote::new(
            request.option_id.clone(),
            allowances,
            inputs,
            vec![AmountQuote::new(leg.token_out.clone(), amount_out)],
            vec![split, swap],
        ))
    }
}
