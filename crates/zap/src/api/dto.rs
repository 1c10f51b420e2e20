//! JSON shape of a quote.
//!
//! Amounts are given twice: as a decimal string scaled by the token's
//! decimals for display, and in base units as `amountWei`.

use {
    crate::domain::{self, eth},
    bigdecimal::BigDecimal,
    number::serialization::DecimalU256,
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
};

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub option_id: String,
    pub allowances: Vec<Allowance>,
    pub inputs: Vec<Amount>,
    pub outputs: Vec<Amount>,
    #[serde_as(as = "DisplayFromStr")]
    pub price_impact: BigDecimal,
    pub steps: Vec<Step>,
}

impl From<&domain::Quote> for Quote {
    fn from(quote: &domain::Quote) -> Self {
        Self {
            id: quote.id().to_string(),
            option_id: quote.option_id().to_owned(),
            allowances: quote.allowances().iter().map(Allowance::from).collect(),
            inputs: amounts(quote.inputs()),
            outputs: amounts(quote.outputs()),
            price_impact: quote.price_impact().normalized(),
            steps: quote.steps().iter().map(Step::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: eth::Address,
    pub symbol: String,
    pub decimals: u8,
    pub is_native: bool,
}

impl From<&eth::Token> for Token {
    fn from(token: &eth::Token) -> Self {
        Self {
            address: token.address,
            symbol: token.symbol.clone(),
            decimals: token.decimals,
            is_native: token.native,
        }
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub token: Token,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: BigDecimal,
    #[serde_as(as = "DecimalU256")]
    pub amount_wei: eth::U256,
}

impl Amount {
    fn new(token: &eth::Token, amount: eth::U256) -> Self {
        Self {
            token: token.into(),
            amount: number::to_decimal(amount, token.decimals),
            amount_wei: amount,
        }
    }
}

impl From<&domain::AmountQuote> for Amount {
    fn from(amount: &domain::AmountQuote) -> Self {
        Self::new(&amount.token, amount.amount)
    }
}

fn amounts(amounts: &[domain::AmountQuote]) -> Vec<Amount> {
    amounts.iter().map(Amount::from).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    #[serde(flatten)]
    pub amount: Amount,
    pub spender_address: eth::Address,
}

impl From<&domain::Allowance> for Allowance {
    fn from(allowance: &domain::Allowance) -> Self {
        Self {
            amount: Amount::new(&allowance.token, allowance.amount),
            spender_address: allowance.spender,
        }
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Step {
    Swap {
        from_token: Token,
        from_amount: Amount,
        to_token: Token,
        to_amount: Amount,
        #[serde_as(as = "DisplayFromStr")]
        price_impact: BigDecimal,
    },
    Build {
        inputs: Vec<Amount>,
        output_token: Token,
        output_amount: Amount,
    },
    Deposit {
        token: Token,
        amount: Amount,
    },
    Split {
        input_token: Token,
        input_amount: Amount,
        outputs: Vec<Amount>,
    },
}

impl From<&domain::Step> for Step {
    fn from(step: &domain::Step) -> Self {
        match step {
            domain::Step::Swap {
                from_token,
                from_amount,
                to_token,
                to_amount,
                price_impact,
            } => Self::Swap {
                from_token: from_token.into(),
                from_amount: Amount::new(from_token, *from_amount),
                to_token: to_token.into(),
                to_amount: Amount::new(to_token, *to_amount),
                price_impact: price_impact.normalized(),
            },
            domain::Step::Build {
                inputs,
                output_token,
                output_amount,
            } => Self::Build {
                inputs: amounts(inputs),
                output_token: output_token.into(),
                output_amount: Amount::new(output_token, *output_amount),
            },
            domain::Step::Deposit { token, amount } => Self::Deposit {
                token: token.into(),
                amount: Amount::new(token, *amount),
            },
            domain::Step::Split {
                input_token,
                input_amount,
                outputs,
            } => Self::Split {
                input_token: input_token.into(),
                input_amount: Amount::new(input_token, *input_amount),
                outputs: amounts(outputs),
            },
        }
    }
}
