//! Uniswap V2 style constant product pools.
//!
//! The math mirrors `UniswapV2Pair` and `UniswapV2Router02` in integer base
//! units, including their rounding, so simulated amounts match the contracts
//! exactly. The protocol fee mint (`feeOn`) is not modelled.

use {
    crate::domain::{
        eth::{self, Address, H160, H256, U256},
        pool::{
            AddLiquidityOutcome,
            PoolError,
            PoolModel,
            PoolProviding,
            RemoveLiquidityOutcome,
            SwapOutcome,
        },
    },
    bigdecimal::BigDecimal,
    num::One as _,
    number::conversions::u256_to_big_decimal,
    std::sync::Arc,
};

/// Liquidity permanently locked by the first mint of every pair.
const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Precision of reported price impacts.
const PRICE_IMPACT_SCALE: i64 = 18;

const BPS: u64 = 10_000;

/// Computes the CREATE2 address of the pair for two tokens. The order of `a`
/// and `b` does not matter.
pub fn pair_address(factory: Address, init_code_hash: H256, a: Address, b: Address) -> Address {
    let (token0, token1) = if a < b { (a, b) } else { (b, a) };

    let mut tokens = [0_u8; 40];
    tokens[..20].copy_from_slice(token0.as_bytes());
    tokens[20..].copy_from_slice(token1.as_bytes());
    let salt = eth::keccak256(&tokens);

    let mut buffer = [0_u8; 85];
    buffer[0] = 0xff;
    buffer[1..21].copy_from_slice(factory.as_bytes());
    buffer[21..53].copy_from_slice(&salt);
    buffer[53..].copy_from_slice(init_code_hash.as_bytes());
    let hash = eth::keccak256(&buffer);

    Address(H160::from_slice(&hash[12..]))
}

/// On-chain state of a pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reserves {
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    pub total_supply: U256,
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ReserveFetching: Send + Sync {
    async fn fetch_reserves(&self, pair: Address) -> anyhow::Result<Reserves>;
}

/// A constant product pool simulated locally.
pub struct Pool {
    address: Address,
    fee_bps: u32,
    fetcher: Arc<dyn ReserveFetching>,
    state: Option<Reserves>,
}

impl Pool {
    pub fn new(address: Address, fee_bps: u32, fetcher: Arc<dyn ReserveFetching>) -> Self {
        Self {
            address,
            fee_bps,
            fetcher,
            state: None,
        }
    }

    #[cfg(test)]
    fn state(&self) -> Option<&Reserves> {
        self.state.as_ref()
    }

    fn reserves(&self) -> Result<&Reserves, PoolError> {
        self.state.as_ref().ok_or(PoolError::Stale)
    }

    /// Returns the reserves as `(reserve_in, reserve_out)` for a trade selling
    /// `token_in`, and whether `token_in` is `token0`.
    fn oriented(&self, token_in: Address) -> Result<(U256, U256, bool), PoolError> {
        let state = self.reserves()?;
        if token_in == state.token0 {
            Ok((state.reserve0, state.reserve1, true))
        } else if token_in == state.token1 {
            Ok((state.reserve1, state.reserve0, false))
        } else {
            Err(PoolError::UnknownToken(token_in))
        }
    }

    fn state_mut(&mut self) -> Result<&mut Reserves, PoolError> {
        self.state.as_mut().ok_or(PoolError::Stale)
    }
}

/// Creates [`Pool`]s that all read their state through one fetcher.
pub struct Pools {
    fetcher: Arc<dyn ReserveFetching>,
}

impl Pools {
    pub fn new(fetcher: Arc<dyn ReserveFetching>) -> Self {
        Self { fetcher }
    }
}

impl PoolProviding for Pools {
    fn create(&self, pair: Address, fee_bps: u32) -> Box<dyn PoolModel> {
        Box::new(Pool::new(pair, fee_bps, self.fetcher.clone()))
    }
}

#[async_trait::async_trait]
impl PoolModel for Pool {
    async fn refresh(&mut self) -> Result<(), PoolError> {
        let reserves = self.fetcher.fetch_reserves(self.address).await?;
        tracing::trace!(pair = %self.address, ?reserves, "refreshed pair reserves");
        self.state = Some(reserves);
        Ok(())
    }

    fn swap(&mut self, amount_in: U256, token_in: Address) -> Result<SwapOutcome, PoolError> {
        let (reserve_in, reserve_out, zero_for_one) = self.oriented(token_in)?;
        let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)?;
        let price_impact = price_impact(amount_in, amount_out, reserve_in, reserve_out);

        let reserve_in = checked(reserve_in.checked_add(amount_in))?;
        let reserve_out = reserve_out - amount_out;
        let state = self.state_mut()?;
        if zero_for_one {
            (state.reserve0, state.reserve1) = (reserve_in, reserve_out);
        } else {
            (state.reserve0, state.reserve1) = (reserve_out, reserve_in);
        }

        Ok(SwapOutcome {
            amount_out,
            price_impact,
        })
    }

    fn add_liquidity(
        &mut self,
        amount_a: U256,
        token_a: Address,
        amount_b: U256,
    ) -> Result<AddLiquidityOutcome, PoolError> {
        let (reserve_a, reserve_b, a_is_token0) = self.oriented(token_a)?;
        let total_supply = self.reserves()?.total_supply;

        let (amount_a, amount_b) = optimal_amounts(amount_a, amount_b, reserve_a, reserve_b)?;
        let liquidity = if total_supply.is_zero() {
            let root = checked(amount_a.checked_mul(amount_b))?.integer_sqrt();
            checked(root.checked_sub(MINIMUM_LIQUIDITY.into()))
                .map_err(|_| PoolError::InsufficientLiquidity)?
        } else if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(PoolError::InsufficientLiquidity);
        } else {
            std::cmp::min(
                checked(amount_a.checked_mul(total_supply))? / reserve_a,
                checked(amount_b.checked_mul(total_supply))? / reserve_b,
            )
        };

        let reserve_a = checked(reserve_a.checked_add(amount_a))?;
        let reserve_b = checked(reserve_b.checked_add(amount_b))?;
        let state = self.state_mut()?;
        if a_is_token0 {
            (state.reserve0, state.reserve1) = (reserve_a, reserve_b);
        } else {
            (state.reserve0, state.reserve1) = (reserve_b, reserve_a);
        }
        // The locked minimum is part of the supply but not of `liquidity`.
        state.total_supply = if total_supply.is_zero() {
            liquidity + MINIMUM_LIQUIDITY
        } else {
            checked(total_supply.checked_add(liquidity))?
        };

        Ok(AddLiquidityOutcome {
            amount_a,
            amount_b,
            liquidity,
        })
    }

    fn remove_liquidity(&mut self, liquidity: U256) -> Result<RemoveLiquidityOutcome, PoolError> {
        let state = self.state_mut()?;
        if state.total_supply.is_zero() || liquidity > state.total_supply {
            return Err(PoolError::InsufficientLiquidity);
        }

        let amount0 = checked(liquidity.checked_mul(state.reserve0))? / state.total_supply;
        let amount1 = checked(liquidity.checked_mul(state.reserve1))? / state.total_supply;
        state.reserve0 -= amount0;
        state.reserve1 -= amount1;
        state.total_supply -= liquidity;

        Ok(RemoveLiquidityOutcome {
            amount0,
            amount1,
            token0: state.token0,
            token1: state.token1,
        })
    }
}

fn checked(value: Option<U256>) -> Result<U256, PoolError> {
    value.ok_or(PoolError::Overflow)
}

/// `UniswapV2Library.getAmountOut`, with the fee given in basis points.
fn get_amount_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee_bps: u32,
) -> Result<U256, PoolError> {
    if amount_in.is_zero() {
        return Ok(U256::zero());
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(PoolError::InsufficientLiquidity);
    }

    let fee_factor = BPS
        .checked_sub(u64::from(fee_bps))
        .ok_or(PoolError::InvalidFee(fee_bps))?;
    let amount_in_with_fee = checked(amount_in.checked_mul(U256::from(fee_factor)))?;
    let numerator = checked(amount_in_with_fee.checked_mul(reserve_out))?;
    let denominator = checked(
        checked(reserve_in.checked_mul(U256::from(BPS)))?.checked_add(amount_in_with_fee),
    )?;
    Ok(numerator / denominator)
}

/// `UniswapV2Library.quote`: the amount of the other token matching
/// `amount_a` at the current reserve ratio.
fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256, PoolError> {
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(PoolError::InsufficientLiquidity);
    }
    Ok(checked(amount_a.checked_mul(reserve_b))? / reserve_a)
}

/// `UniswapV2Router02._addLiquidity` without the minimum amount checks. Takes
/// as much of the offered amounts as fits the pool ratio.
fn optimal_amounts(
    amount_a: U256,
    amount_b: U256,
    reserve_a: U256,
    reserve_b: U256,
) -> Result<(U256, U256), PoolError> {
    if reserve_a.is_zero() && reserve_b.is_zero() {
        return Ok((amount_a, amount_b));
    }

    let amount_b_optimal = quote(amount_a, reserve_a, reserve_b)?;
    if amount_b_optimal <= amount_b {
        return Ok((amount_a, amount_b_optimal));
    }
    let amount_a_optimal = quote(amount_b, reserve_b, reserve_a)?;
    debug_assert!(amount_a_optimal <= amount_a);
    Ok((amount_a_optimal, amount_b))
}

/// Loss against the spot price: `1 - (out / in) / (reserve_out / reserve_in)`.
/// Includes the LP fee.
fn price_impact(
    amount_in: U256,
    amount_out: U256,
    reserve_in: U256,
    reserve_out: U256,
) -> BigDecimal {
    if amount_in.is_zero() {
        return BigDecimal::default();
    }

    let received = u256_to_big_decimal(&amount_out) * u256_to_big_decimal(&reserve_in);
    let spot = u256_to_big_decimal(&amount_in) * u256_to_big_decimal(&reserve_out);
    (BigDecimal::one() - received / spot).with_scale(PRICE_IMPACT_SCALE)
}
