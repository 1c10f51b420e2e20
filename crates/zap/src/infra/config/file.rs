use {
    crate::{
        domain::eth::{self, Address, H256, NativePair},
        infra::config,
    },
    anyhow::{Context, Result, anyhow, ensure},
    serde::Deserialize,
    std::path::Path,
    url::Url,
};

/// Uniswap V2's 0.3% swap fee.
const DEFAULT_FEE_BPS: u32 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    node_url: Url,
    zap_contract: Address,
    factory: Address,
    pair_init_code_hash: H256,
    #[serde(default = "default_fee_bps")]
    fee_bps: u32,
    native: Native,
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    pools: Vec<Pool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Native {
    /// Placeholder address used for the native asset, e.g.
    /// `0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE`.
    address: Address,
    symbol: String,
    #[serde(default = "default_decimals")]
    decimals: u8,
    /// Address of the wrapped native token. Must also be listed in `tokens`.
    wrapped: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Token {
    address: Address,
    decimals: u8,
    symbol: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Pool {
    id: String,
    vault: Address,
    tokens: [Address; 2],
    fee_bps: Option<u32>,
}

fn default_fee_bps() -> u32 {
    DEFAULT_FEE_BPS
}

fn default_decimals() -> u8 {
    18
}

/// Loads the zap configuration from a TOML file.
pub async fn load(path: &Path) -> Result<config::Config> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    parse(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Parses and validates a TOML configuration.
pub fn parse(data: &str) -> Result<config::Config> {
    let config: Config = toml::from_str(data)?;
    ensure!(
        config.fee_bps < 10_000,
        "default fee of {} bps",
        config.fee_bps
    );

    let tokens = config
        .tokens
        .into_iter()
        .map(|token| eth::Token {
            address: token.address,
            decimals: token.decimals,
            symbol: token.symbol,
            native: false,
        })
        .collect::<Vec<_>>();
    let token = |address: Address| {
        crate::domain::selection::resolve_token(&tokens, address)
            .cloned()
            .ok_or_else(|| anyhow!("token {address} is not configured"))
    };

    let native = NativePair {
        native: eth::Token {
            address: config.native.address,
            decimals: config.native.decimals,
            symbol: config.native.symbol,
            native: true,
        },
        wrapped: token(config.native.wrapped).context("wrapped native token")?,
    };

    let pools = config
        .pools
        .into_iter()
        .map(|pool| {
            let fee_bps = pool.fee_bps.unwrap_or(config.fee_bps);
            ensure!(fee_bps < 10_000, "pool {}: fee of {fee_bps} bps", pool.id);
            ensure!(
                pool.tokens[0] != pool.tokens[1],
                "pool {}: both tokens are {}",
                pool.id,
                pool.tokens[0]
            );
            let [a, b] = pool.tokens;
            let tokens = [
                token(a).with_context(|| format!("pool {}", pool.id))?,
                token(b).with_context(|| format!("pool {}", pool.id))?,
            ];
            Ok(config::Pool {
                id: pool.id,
                vault: pool.vault,
                tokens,
                fee_bps,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(config::Config {
        node_url: config.node_url,
        zap: config.zap_contract,
        factory: config.factory,
        pair_init_code_hash: config.pair_init_code_hash,
        native,
        tokens,
        pools,
    })
}
