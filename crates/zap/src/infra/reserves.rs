//! Reads Uniswap V2 pair state over `eth_call`.

use {
    crate::{
        boundary::uniswap_v2::{ReserveFetching, Reserves},
        domain::eth::{Address, U256},
        infra::rpc::{self, EthCall},
    },
    anyhow::{Context, Result, anyhow},
    ethabi::{ParamType, Token},
    std::sync::Arc,
};

pub struct PairReader {
    rpc: Arc<dyn EthCall>,
}

impl PairReader {
    pub fn new(rpc: Arc<dyn EthCall>) -> Self {
        Self { rpc }
    }

    async fn read(
        &self,
        pair: Address,
        signature: &str,
        output: &[ParamType],
    ) -> Result<Vec<Token>> {
        let data = self.rpc.call(pair, rpc::calldata(signature, &[])).await?;
        ethabi::decode(output, &data).with_context(|| format!("decoding {signature} of {pair}"))
    }

    async fn read_address(&self, pair: Address, signature: &str) -> Result<Address> {
        match self
            .read(pair, signature, &[ParamType::Address])
            .await?
            .as_slice()
        {
            [Token::Address(address)] => Ok(Address(*address)),
            tokens => Err(anyhow!("unexpected {signature} output {tokens:?}")),
        }
    }
}

#[async_trait::async_trait]
impl ReserveFetching for PairReader {
    async fn fetch_reserves(&self, pair: Address) -> Result<Reserves> {
        let (reserves, total_supply, token0, token1) = futures::try_join!(
            self.read(
                pair,
                "getReserves()",
                &[
                    ParamType::Uint(112),
                    ParamType::Uint(112),
                    ParamType::Uint(32)
                ],
            ),
            self.read(pair, "totalSupply()", &[ParamType::Uint(256)]),
            self.read_address(pair, "token0()"),
            self.read_address(pair, "token1()"),
        )?;

        let (reserve0, reserve1) = match reserves.as_slice() {
            [Token::Uint(reserve0), Token::Uint(reserve1), _] => (*reserve0, *reserve1),
            tokens => return Err(anyhow!("unexpected getReserves() output {tokens:?}")),
        };
        let total_supply: U256 = match total_supply.as_slice() {
            [Token::Uint(total_supply)] => *total_supply,
            tokens => return Err(anyhow!("unexpected totalSupply() output {tokens:?}")),
        };

        tracing::debug!(
            %pair,
            %reserve0,
            %reserve1,
            %total_supply,
            "fetched pair state"
        );
        Ok(Reserves {
            token0,
            token1,
            reserve0,
            reserve1,
            total_supply,
        })
    }
}
