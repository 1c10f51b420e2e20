use {
    crate::{
        boundary::uniswap_v2,
        domain::{
            Error,
            PoolProviding,
            Quote,
            SwapEstimating,
            deposit,
            eth::{Address, Token, U256},
            quote::AmountQuote,
            selection,
            withdraw,
        },
        infra::{self, config::Config},
    },
    bigdecimal::BigDecimal,
    std::sync::Arc,
    tracing::instrument,
};

/// LP tokens of constant product pairs always have 18 decimals.
const LP_DECIMALS: u8 = 18;

/// Entry point for hosts: resolves pools and tokens from the configuration,
/// wires up a fresh pool model per request and runs the composers.
///
/// Unsupported requests (no pool for the deposit token, or a token that is
/// not part of the pool) yield `Ok(None)`.
pub struct Zapper {
    config: Config,
    deposit: deposit::Composer,
    withdraw: withdraw::Composer,
    pools: Arc<dyn PoolProviding>,
}

impl Zapper {
    pub fn new(
        config: Config,
        estimator: Arc<dyn SwapEstimating>,
        pools: Arc<dyn PoolProviding>,
    ) -> Self {
        Self {
            deposit: deposit::Composer::new(estimator, config.zap),
            withdraw: withdraw::Composer::new(config.zap),
            config,
            pools,
        }
    }

    /// Builds a zapper that talks to the configured node: estimates come from
    /// the zap contract and pool state from the pair contracts.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let rpc = Arc::new(infra::Web3Call::new(&config.node_url)?);
        let estimator = Arc::new(infra::ZapContract::new(config.zap, rpc.clone()));
        let pools = Arc::new(uniswap_v2::Pools::new(Arc::new(infra::PairReader::new(
            rpc,
        ))));
        Ok(Self::new(config, estimator, pools))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Quotes zapping `amount` of `input_token` into the vault of the pool
    /// whose pair is `deposit_token`. `input_token` may be the native asset
    /// when the pool holds its wrapped form.
    #[instrument(skip_all, fields(%option_id, %input_token, %deposit_token))]
    pub async fn quote_deposit(
        &self,
        option_id: &str,
        input_token: Address,
        deposit_token: Address,
        amount: U256,
    ) -> Result<Option<Quote>, Error> {
        let Some(pool) = self.find_pool(deposit_token) else {
            tracing::debug!("no pool for deposit token");
            return Ok(None);
        };
        let Some((input, swap_token_in, swap_token_out)) = self.resolve_pair(pool, input_token)
        else {
            tracing::debug!(pool = %pool.id, "input token is not part of the pool");
            return Ok(None);
        };

        let input = AmountQuote::new(input, amount);
        let request = deposit::Request {
            option_id: option_id.to_owned(),
            vault: pool.vault,
            allowance_amounts: vec![input.clone()],
            input,
            swap_token_in,
            swap_token_out,
            lp_token: lp_token(pool, deposit_token),
        };

        let mut model = self.pools.create(deposit_token, pool.fee_bps);
        let (estimate, ()) = futures::try_join!(self.deposit.estimate(&request), async {
            model.refresh().await.map_err(Error::from)
        })?;
        self.deposit
            .compose(&estimate, model.as_mut(), &request)
            .map(Some)
    }

    /// Like [`Zapper::quote_deposit`], with `amount` given in whole tokens as
    /// entered by a user, e.g. `1.5` USDC.
    pub async fn quote_deposit_decimal(
        &self,
        option_id: &str,
        input_token: Address,
        deposit_token: Address,
        amount: &BigDecimal,
    ) -> Result<Option<Quote>, Error> {
        let Some((input, ..)) = self
            .find_pool(deposit_token)
            .and_then(|pool| self.resolve_pair(pool, input_token))
        else {
            return Ok(None);
        };
        let base_units =
            number::from_decimal(amount, input.decimals).ok_or_else(|| Error::InvalidAmount {
                amount: amount.clone(),
                decimals: input.decimals,
            })?;
        self.quote_deposit(option_id, input_token, deposit_token, base_units)
            .await
    }

    /// Quotes redeeming `shares` of the vault over the pool whose pair is
    /// `deposit_token`, releasing `withdrawn_amount_after_fee` LP tokens.
    /// With `want` set, the whole position is converted into that token,
    /// otherwise both pool tokens are returned.
    #[instrument(skip_all, fields(%option_id, %deposit_token))]
    pub async fn quote_withdraw(
        &self,
        option_id: &str,
        deposit_token: Address,
        shares: U256,
        withdrawn_amount_after_fee: U256,
        want: Option<Address>,
    ) -> Result<Option<Quote>, Error> {
        let Some(pool) = self.find_pool(deposit_token) else {
            tracing::debug!("no pool for deposit token");
            return Ok(None);
        };
        let swap = match want {
            None => None,
            Some(want) => match self.resolve_pair(pool, want) {
                Some((token_out, _, token_in)) => Some(withdraw::SwapLeg {
                    token_in,
                    token_out,
                }),
                None => {
                    tracing::debug!(
                        pool = %pool.id,
                        %want,
                        "output token is not part of the pool"
                    );
                    return Ok(None);
                }
            },
        };

        let request = withdraw::Request {
            option_id: option_id.to_owned(),
            shares: AmountQuote::new(share_token(pool), shares),
            lp_token: lp_token(pool, deposit_token),
            withdrawn_amount_after_fee,
            pool_tokens: pool.tokens.clone(),
            swap,
            native: self.config.native.clone(),
        };

        let mut model = self.pools.create(deposit_token, pool.fee_bps);
        self.withdraw.quote(model.as_mut(), &request).await.map(Some)
    }

    fn find_pool(&self, deposit_token: Address) -> Option<&infra::config::Pool> {
        selection::find_pool(&self.config.pools, deposit_token, |pool| {
            uniswap_v2::pair_address(
                self.config.factory,
                self.config.pair_init_code_hash,
                pool.tokens[0].address,
                pool.tokens[1].address,
            )
        })
    }

    /// Resolves a user facing token against a pool. Returns the user facing
    /// token, the pool token it stands for and the other pool token.
    fn resolve_pair(
        &self,
        pool: &infra::config::Pool,
        token: Address,
    ) -> Option<(Token, Token, Token)> {
        let native = &self.config.native;
        let user = if token == native.native.address {
            native.native.clone()
        } else {
            selection::resolve_token(&pool.tokens, token)?.clone()
        };
        let pooled = native.to_pool(&user);

        let [a, b] = &pool.tokens;
        if pooled.address == a.address {
            Some((user, a.clone(), b.clone()))
        } else if pooled.address == b.address {
            Some((user, b.clone(), a.clone()))
        } else {
            None
        }
    }
}

fn lp_token(pool: &infra::config::Pool, pair: Address) -> Token {
    Token {
        address: pair,
        decimals: LP_DECIMALS,
        symbol: format!("{}-{}", pool.tokens[0].symbol, pool.tokens[1].symbol),
        native: false,
    }
}

/// Vault shares are minted by the vault contract itself.
fn share_token(pool: &infra::config::Pool) -> Token {
    Token {
        address: pool.vault,
        decimals: LP_DECIMALS,
        symbol: pool.id.clone(),
        native: false,
    }
}
