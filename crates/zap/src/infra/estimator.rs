//! Swap estimates computed by the zap contract.

use {
    crate::{
        domain::{
            EstimateError,
            SwapEstimate,
            SwapEstimating,
            eth::{Address, U256},
        },
        infra::rpc::{self, EthCall},
    },
    ethabi::{ParamType, Token},
    std::sync::Arc,
};

const ESTIMATE_SWAP: &str = "estimateSwap(address,address,uint256)";

/// Asks the deployed zap contract how much of a deposit it would swap, so
/// quotes use exactly the split the transaction will use.
pub struct ZapContract {
    address: Address,
    rpc: Arc<dyn EthCall>,
}

impl ZapContract {
    pub fn new(address: Address, rpc: Arc<dyn EthCall>) -> Self {
        Self { address, rpc }
    }
}

#[async_trait::async_trait]
impl SwapEstimating for ZapContract {
    async fn estimate_swap(
        &self,
        vault: Address,
        token_in: Address,
        amount_in: U256,
    ) -> Result<SwapEstimate, EstimateError> {
        let data = rpc::calldata(
            ESTIMATE_SWAP,
            &[
                Token::Address(vault.into()),
                Token::Address(token_in.into()),
                Token::Uint(amount_in),
            ],
        );
        let output = self.rpc.call(self.address, data).await?;
        decode(&output)
    }
}

fn decode(output: &[u8]) -> Result<SwapEstimate, EstimateError> {
    if output.is_empty() {
        return Err(EstimateError::Empty);
    }

    let tokens = ethabi::decode(
        &[ParamType::Uint(256), ParamType::Uint(256), ParamType::Address],
        output,
    )
    .map_err(|err| EstimateError::Invalid(err.to_string()))?;
    match tokens.as_slice() {
        [
            Token::Uint(swap_amount_in),
            Token::Uint(swap_amount_out),
            Token::Address(swap_token_out),
        ] => Ok(SwapEstimate {
            swap_amount_in: *swap_amount_in,
            swap_amount_out: *swap_amount_out,
            swap_token_out: Address(*swap_token_out),
        }),
        _ => Err(EstimateError::Invalid(format!(
            "unexpected estimate tokens {tokens:?}"
        ))),
    }
}
