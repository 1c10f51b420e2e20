//! Read-only contract calls against a JSON-RPC node.

use {
    crate::domain::eth::{self, Address},
    anyhow::Context,
    url::Url,
    web3::{
        Web3,
        transports::Http,
        types::{Bytes, CallRequest},
    },
};

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait EthCall: Send + Sync {
    /// Executes an `eth_call` with the given calldata on the latest block.
    async fn call(&self, to: Address, data: Vec<u8>) -> anyhow::Result<Vec<u8>>;
}

pub struct Web3Call {
    web3: Web3<Http>,
}

impl Web3Call {
    pub fn new(node_url: &Url) -> anyhow::Result<Self> {
        let transport = Http::new(node_url.as_str())
            .with_context(|| format!("invalid node url {node_url}"))?;
        Ok(Self {
            web3: Web3::new(transport),
        })
    }
}

#[async_trait::async_trait]
impl EthCall for Web3Call {
    async fn call(&self, to: Address, data: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        let request = CallRequest {
            to: Some(to.into()),
            data: Some(Bytes(data)),
            ..Default::default()
        };
        let output = self
            .web3
            .eth()
            .call(request, None)
            .await
            .with_context(|| format!("eth_call to {to} failed"))?;
        Ok(output.0)
    }
}

/// The 4 byte function selector of a Solidity signature such as
/// `token0()`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = eth::keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// A function selector followed by its ABI encoded arguments.
pub fn calldata(signature: &str, args: &[ethabi::Token]) -> Vec<u8> {
    let mut data = selector(signature).to_vec();
    data.extend(ethabi::encode(args));
    data
}
