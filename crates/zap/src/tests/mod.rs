//! Scenario tests for quoting zaps end to end.

use {
    crate::{
        domain::{
            eth::{Address, H256, NativePair, Token, U256},
            quote::AmountQuote,
        },
        infra::config::{self, Config},
    },
    bigdecimal::BigDecimal,
};

mod cases;

pub fn init() {
    crate::observe::initialize("warn,zap=debug");
}

fn token(address: &str, symbol: &str, decimals: u8) -> Token {
    Token {
        address: address.parse().unwrap(),
        decimals,
        symbol: symbol.to_owned(),
        native: false,
    }
}

pub fn usdc() -> Token {
    token("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC", 6)
}

pub fn weth() -> Token {
    token("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "WETH", 18)
}

pub fn dai() -> Token {
    token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI", 18)
}

pub fn eth() -> Token {
    Token {
        native: true,
        ..token("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE", "ETH", 18)
    }
}

pub fn native() -> NativePair {
    NativePair {
        native: eth(),
        wrapped: weth(),
    }
}

/// The Uniswap V2 USDC/WETH pair.
pub fn usdc_weth_pair() -> Address {
    "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc".parse().unwrap()
}

pub fn lp() -> Token {
    token("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc", "USDC-WETH", 18)
}

pub fn vault() -> Address {
    "0x1111111111111111111111111111111111111111".parse().unwrap()
}

pub fn zap() -> Address {
    "0x7d3c1d0e2b6b2f1a8b5d1c4e9f0a3b2c1d0e9f8a".parse().unwrap()
}

pub fn amount(token: Token, amount: u64) -> AmountQuote {
    AmountQuote::new(token, U256::from(amount))
}

pub fn decimal(value: &str) -> BigDecimal {
    value.parse().unwrap()
}

pub fn config() -> Config {
    Config {
        node_url: "http://localhost:8545".parse().unwrap(),
        zap: zap(),
        factory: "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f".parse().unwrap(),
        pair_init_code_hash: H256(hex_literal::hex!(
            "96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"
        )),
        native: native(),
        tokens: vec![usdc(), weth(), dai()],
        pools: vec![
            config::Pool {
                id: "uniswap-usdc-eth".to_owned(),
                vault: vault(),
                tokens: [usdc(), weth()],
                fee_bps: 30,
            },
            config::Pool {
                id: "uniswap-dai-eth".to_owned(),
                vault: "0x2222222222222222222222222222222222222222".parse().unwrap(),
                tokens: [dai(), weth()],
                fee_bps: 30,
            },
        ],
    }
}
