use {
    crate::domain::eth::{Address, Token, U256},
    bigdecimal::BigDecimal,
    std::fmt,
};

/// An amount of a token in base units.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmountQuote {
    pub token: Token,
    pub amount: U256,
}

impl AmountQuote {
    pub fn new(token: Token, amount: U256) -> Self {
        Self { token, amount }
    }
}

/// An ERC20 approval the user has to grant before the zap transaction can
/// pull their tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allowance {
    pub token: Token,
    pub amount: U256,
    pub spender: Address,
}

/// One leg of a zap, in the order the zap contract executes it.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Trade `from_amount` of `from_token` against the pool.
    Swap {
        from_token: Token,
        from_amount: U256,
        to_token: Token,
        to_amount: U256,
        price_impact: BigDecimal,
    },
    /// Add liquidity with both pool tokens, minting LP tokens.
    Build {
        inputs: Vec<AmountQuote>,
        output_token: Token,
        output_amount: U256,
    },
    /// Deposit LP tokens into the vault.
    Deposit { token: Token, amount: U256 },
    /// Burn LP tokens for the underlying pool tokens.
    Split {
        input_token: Token,
        input_amount: U256,
        outputs: Vec<AmountQuote>,
    },
}

impl Step {
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Swap { .. } => "swap",
            Step::Build { .. } => "build",
            Step::Deposit { .. } => "deposit",
            Step::Split { .. } => "split",
        }
    }
}

/// Random identifier attached to every quote.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QuoteId(pub u128);

impl QuoteId {
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// A fully simulated zap.
///
/// Quotes are only built by the composers and cannot be modified afterwards.
#[derive(Clone, Debug)]
pub struct Quote {
    id: QuoteId,
    option_id: String,
    allowances: Vec<Allowance>,
    inputs: Vec<AmountQuote>,
    outputs: Vec<AmountQuote>,
    price_impact: BigDecimal,
    steps: Vec<Step>,
}

impl Quote {
    /// Assembles a quote with a fresh id. The price impact is taken from the
    /// swap step, if there is one.
    pub(crate) fn new(
        option_id: String,
        allowances: Vec<Allowance>,
        inputs: Vec<AmountQuote>,
        outputs: Vec<AmountQuote>,
        steps: Vec<Step>,
    ) -> Self {
        debug_assert!(
            steps
                .iter()
                .filter(|step| matches!(step, Step::Swap { .. }))
                .count()
                <= 1,
            "at most one swap per zap"
        );
        let price_impact = steps
            .iter()
            .find_map(|step| match step {
                Step::Swap { price_impact, .. } => Some(price_impact.clone()),
                _ => None,
            })
            .unwrap_or_default();

        Self {
            id: QuoteId::random(),
            option_id,
            allowances,
            inputs,
            outputs,
            price_impact,
            steps,
        }
    }

    pub fn id(&self) -> QuoteId {
        self.id
    }

    pub fn option_id(&self) -> &str {
        &self.option_id
    }

    pub fn allowances(&self) -> &[Allowance] {
        &self.allowances
    }

    pub fn inputs(&self) -> &[AmountQuote] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[AmountQuote] {
        &self.outputs
    }

    pub fn price_impact(&self) -> &BigDecimal {
        &self.price_impact
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[cfg(test)]
    pub(crate) fn step_kinds(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::kind).collect()
    }
}
