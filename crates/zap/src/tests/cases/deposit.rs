use {
    crate::{
        domain::{
            Error,
            EstimateError,
            SwapEstimate,
            deposit::{Composer, Request},
            estimator::MockSwapEstimating,
            eth::{Token, U256},
            pool::{AddLiquidityOutcome, MockPoolModel, SwapOutcome},
            quote::{Allowance, Step},
        },
        tests::{self, amount, decimal, eth, lp, usdc, vault, weth, zap},
    },
    bigdecimal::BigDecimal,
    mockall::predicate::eq,
    std::sync::Arc,
};

fn request(input: Token, swap_token_in: Token, swap_token_out: Token, value: u64) -> Request {
    Request {
        option_id: "uniswap-usdc-eth".to_owned(),
        vault: vault(),
        input: amount(input.clone(), value),
        swap_token_in,
        swap_token_out,
        lp_token: lp(),
        allowance_amounts: vec![amount(input, value)],
    }
}

fn estimator(swap_amount_in: u64, swap_amount_out: u64, token_out: Token) -> MockSwapEstimating {
    let mut estimator = MockSwapEstimating::new();
    estimator
        .expect_estimate_swap()
        .times(1)
        .returning(move |_, _, _| {
            Ok(SwapEstimate {
                swap_amount_in: U256::from(swap_amount_in),
                swap_amount_out: U256::from(swap_amount_out),
                swap_token_out: token_out.address,
            })
        });
    estimator
}

/// A pool that swaps `swap.0` of `token_in` into `swap.1` at `impact` and
/// then accepts `add` as liquidity.
fn pool(
    token_in: &Token,
    swap: (u64, u64, &str),
    add: (u64, u64, u64, u64, u64),
) -> MockPoolModel {
    let (amount_out, impact) = (U256::from(swap.1), decimal(swap.2));
    let (amount_a, amount_b, liquidity) = (add.2.into(), add.3.into(), add.4.into());

    let mut pool = MockPoolModel::new();
    pool.expect_swap()
        .with(eq(U256::from(swap.0)), eq(token_in.address))
        .times(1)
        .returning(move |_, _| {
            Ok(SwapOutcome {
                amount_out,
                price_impact: impact.clone(),
            })
        });
    pool.expect_add_liquidity()
        .with(
            eq(U256::from(add.0)),
            eq(token_in.address),
            eq(U256::from(add.1)),
        )
        .times(1)
        .returning(move |_, _, _| {
            Ok(AddLiquidityOutcome {
                amount_a,
                amount_b,
                liquidity,
            })
        });
    pool
}

#[tokio::test]
async fn splits_input_into_swap_and_liquidity() {
    tests::init();

    let composer = Composer::new(Arc::new(estimator(400, 390, weth())), zap());
    let mut pool = pool(&usdc(), (400, 390, "0.01"), (600, 390, 600, 385, 500));

    let quote = composer
        .quote(&mut pool, &request(usdc(), usdc(), weth(), 1000))
        .await
        .unwrap();

    assert_eq!(quote.option_id(), "uniswap-usdc-eth");
    assert_eq!(quote.step_kinds(), ["swap", "build", "deposit"]);
    assert_eq!(
        quote.steps(),
        [
            Step::Swap {
                from_token: usdc(),
                from_amount: U256::from(400),
                to_token: weth(),
                to_amount: U256::from(390),
                price_impact: decimal("0.01"),
            },
            Step::Build {
                inputs: vec![amount(usdc(), 600), amount(weth(), 385)],
                output_token: lp(),
                output_amount: U256::from(500),
            },
            Step::Deposit {
                token: lp(),
                amount: U256::from(500),
            },
        ]
    );
    assert_eq!(quote.price_impact(), &decimal("0.01"));
    assert_eq!(quote.inputs(), [amount(usdc(), 1000)]);
    assert_eq!(quote.outputs(), [amount(lp(), 500)]);
    assert_eq!(
        quote.allowances(),
        [Allowance {
            token: usdc(),
            amount: U256::from(1000),
            spender: zap(),
        }]
    );
}

#[tokio::test]
async fn swap_and_rest_add_up_to_the_input() {
    for (input, estimate) in [(1000, 400), (1000, 1000), (7, 3), (u64::MAX, u64::MAX / 2)] {
        let rest = input - estimate;
        let composer = Composer::new(Arc::new(estimator(estimate, 1, weth())), zap());
        let mut pool = pool(&usdc(), (estimate, 1, "0"), (rest, 1, rest, 1, 1));

        let quote = composer
            .quote(&mut pool, &request(usdc(), usdc(), weth(), input))
            .await
            .unwrap();

        let Step::Swap { from_amount, .. } = &quote.steps()[0] else {
            panic!("first step is not a swap");
        };
        let Step::Build { inputs, .. } = &quote.steps()[1] else {
            panic!("second step is not a build");
        };
        assert_eq!(*from_amount + inputs[0].amount, U256::from(input));
    }
}

#[tokio::test]
async fn native_input_needs_no_allowance() {
    tests::init();

    let composer = Composer::new(Arc::new(estimator(400, 390, usdc())), zap());
    let mut pool = pool(&weth(), (400, 390, "0.01"), (600, 390, 600, 385, 500));

    let quote = composer
        .quote(&mut pool, &request(eth(), weth(), usdc(), 1000))
        .await
        .unwrap();

    assert!(quote.allowances().is_empty());
    assert_eq!(quote.inputs(), [amount(eth(), 1000)]);
    let Step::Swap { from_token, .. } = &quote.steps()[0] else {
        panic!("first step is not a swap");
    };
    assert_eq!(from_token, &weth());
}

#[tokio::test]
async fn only_erc20_amounts_need_allowances() {
    let composer = Composer::new(Arc::new(estimator(400, 390, weth())), zap());
    let mut pool = pool(&usdc(), (400, 390, "0.01"), (600, 390, 600, 385, 500));
    let request = Request {
        allowance_amounts: vec![amount(eth(), 5), amount(usdc(), 1000), amount(eth(), 7)],
        ..request(usdc(), usdc(), weth(), 1000)
    };

    let quote = composer.quote(&mut pool, &request).await.unwrap();

    assert_eq!(quote.allowances().len(), 1);
    assert_eq!(quote.allowances()[0].token, usdc());
    assert_eq!(quote.allowances()[0].spender, zap());
}

#[tokio::test]
async fn zero_swap_keeps_swap_step() {
    let composer = Composer::new(Arc::new(estimator(0, 0, weth())), zap());
    let mut pool = pool(&usdc(), (0, 0, "0"), (1000, 0, 0, 0, 0));

    let quote = composer
        .quote(&mut pool, &request(usdc(), usdc(), weth(), 1000))
        .await
        .unwrap();

    assert_eq!(quote.step_kinds(), ["swap", "build", "deposit"]);
    assert_eq!(
        quote.steps()[0],
        Step::Swap {
            from_token: usdc(),
            from_amount: U256::zero(),
            to_token: weth(),
            to_amount: U256::zero(),
            price_impact: BigDecimal::default(),
        }
    );
    assert_eq!(quote.price_impact(), &BigDecimal::default());
}

#[tokio::test]
async fn estimate_above_input_is_rejected() {
    let composer = Composer::new(Arc::new(estimator(1001, 990, weth())), zap());
    let mut pool = MockPoolModel::new();

    let result = composer
        .quote(&mut pool, &request(usdc(), usdc(), weth(), 1000))
        .await;

    assert!(matches!(
        result,
        Err(Error::EstimateExceedsInput { estimate, amount })
            if estimate == U256::from(1001) && amount == U256::from(1000)
    ));
}

#[tokio::test]
async fn estimate_for_other_token_is_rejected() {
    let composer = Composer::new(Arc::new(estimator(400, 390, usdc())), zap());
    let mut pool = MockPoolModel::new();

    let result = composer
        .quote(&mut pool, &request(usdc(), usdc(), weth(), 1000))
        .await;

    assert!(matches!(
        result,
        Err(Error::Estimation(EstimateError::Invalid(_)))
    ));
}

#[tokio::test]
async fn estimator_failures_propagate() {
    let mut estimator = MockSwapEstimating::new();
    estimator
        .expect_estimate_swap()
        .with(eq(vault()), eq(usdc().address), eq(U256::from(1000)))
        .times(1)
        .returning(|_, _, _| Err(EstimateError::Empty));
    let composer = Composer::new(Arc::new(estimator), zap());
    let mut pool = MockPoolModel::new();

    let result = composer
        .quote(&mut pool, &request(usdc(), usdc(), weth(), 1000))
        .await;

    assert!(matches!(
        result,
        Err(Error::Estimation(EstimateError::Empty))
    ));
}

#[tokio::test]
async fn deposit_does_not_refresh_the_pool() {
    let composer = Composer::new(Arc::new(estimator(400, 390, weth())), zap());
    let mut pool = pool(&usdc(), (400, 390, "0.01"), (600, 390, 600, 385, 500));
    pool.expect_refresh().never();

    composer
        .quote(&mut pool, &request(usdc(), usdc(), weth(), 1000))
        .await
        .unwrap();
}
