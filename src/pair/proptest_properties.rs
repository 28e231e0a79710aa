//! Property-based tests for the pair invariants.
//!
//! 1. **k growth**: every charged swap strictly increases `reserve0 × reserve1`.
//! 2. **Swap reversibility**: token0 → token1 → token0 returns at most the input.
//! 3. **Output monotonicity**: selling more never yields less, and inputs
//!    up to half of `u128::MAX` still settle.
//! 4. **Liquidity round trip**: deposit then withdraw returns at most the deposit.
//! 5. **Share conservation**: `total_shares == Σ balances` after any sequence.
//! 6. **Emptying**: burning every share leaves both reserves at zero.
//! 7. **Custody**: reserves always equal the pair's token balances.

#![allow(clippy::panic)]

use std::sync::Arc;

use proptest::prelude::*;

use super::Pair;
use crate::config::PairConfig;
use crate::domain::{Address, Amount, FeeTier, PairKey, Shares};
use crate::events::NoopSink;
use crate::token::{InMemoryLedger, TokenLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(b: u8) -> Address {
    Address::from_bytes([b; 32])
}

fn new_pair(fee: FeeTier) -> (Arc<InMemoryLedger>, Pair) {
    let ledger = Arc::new(InMemoryLedger::new());
    let Ok(key) = PairKey::new(addr(1), addr(2)) else {
        panic!("valid key");
    };
    let Ok(config) = PairConfig::new(fee) else {
        panic!("valid config");
    };
    let address = Address::derive_pair(&addr(0xfa), &key.token0(), &key.token1());
    let pair = Pair::new(address, key, config, ledger.clone(), Arc::new(NoopSink));
    (ledger, pair)
}

fn fund(ledger: &InMemoryLedger, pair: &Pair, who: &Address, amount0: u128, amount1: u128) {
    for (token, amount) in [(pair.token0(), amount0), (pair.token1(), amount1)] {
        let Ok(()) = ledger.mint(&token, who, Amount::new(amount)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.approve(&token, who, &pair.address(), Amount::MAX) else {
            panic!("approve");
        };
    }
}

fn seeded(reserve0: u128, reserve1: u128) -> (Arc<InMemoryLedger>, Pair) {
    let (ledger, mut pair) = new_pair(FeeTier::DEFAULT);
    let lp = addr(0x10);
    fund(&ledger, &pair, &lp, reserve0, reserve1);
    let Ok(_) = pair.add_liquidity(&lp, Amount::new(reserve0), Amount::new(reserve1)) else {
        panic!("seed liquidity");
    };
    (ledger, pair)
}

fn share_sum(pair: &Pair) -> u128 {
    pair.share_ledger().holders().map(|(_, s)| s.get()).sum()
}

fn custody_matches(ledger: &InMemoryLedger, pair: &Pair) -> bool {
    let (r0, r1) = pair.reserves();
    ledger.balance_of(&pair.token0(), &pair.address()) == r0
        && ledger.balance_of(&pair.token1(), &pair.address()) == r1
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserve values in `[10_000, 10_000_000_000]`.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000_000u128
}

/// Ether-scale reserves in `[1, 1_000_000]` ether.
fn wide_reserve_strategy() -> impl Strategy<Value = u128> {
    (1u128..=1_000_000u128).prop_map(|v| v * 1_000_000_000_000_000_000)
}

/// Swap inputs from `2^100` up to half of `u128::MAX`.
fn huge_input_strategy() -> impl Strategy<Value = u128> {
    (1u128 << 100)..=(u128::MAX / 2)
}

/// One step of a random liquidity workload.
#[derive(Debug, Clone)]
enum Op {
    Deposit { lp: u8, amount0: u128, amount1: u128 },
    Withdraw { lp: u8, percent: u8 },
    Transfer { from: u8, to: u8, percent: u8 },
    Swap { zero_for_one: bool, amount: u128 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 1u128..1_000_000, 1u128..1_000_000).prop_map(|(lp, amount0, amount1)| {
            Op::Deposit { lp, amount0, amount1 }
        }),
        (0u8..4, 1u8..=100).prop_map(|(lp, percent)| Op::Withdraw { lp, percent }),
        (0u8..4, 0u8..4, 1u8..=100).prop_map(|(from, to, percent)| Op::Transfer {
            from,
            to,
            percent
        }),
        (any::<bool>(), 1u128..100_000).prop_map(|(zero_for_one, amount)| Op::Swap {
            zero_for_one,
            amount
        }),
    ]
}

fn lp(index: u8) -> Address {
    addr(0x20 + index)
}

fn portion(shares: Shares, percent: u8) -> Shares {
    Shares::new(shares.get() * u128::from(percent) / 100)
}

// ---------------------------------------------------------------------------
// Properties 1-3: swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_strictly_grows(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        swaps in prop::collection::vec((any::<bool>(), 1u128..1_000_000), 1..12),
    ) {
        let (ledger, mut pair) = seeded(r0, r1);
        let trader = addr(0x30);
        for (zero_for_one, amount) in swaps {
            let (in0, in1) = if zero_for_one { (amount, 0) } else { (0, amount) };
            fund(&ledger, &pair, &trader, in0, in1);
            let k_before = pair.invariant();
            if pair.swap(&trader, Amount::new(in0), Amount::new(in1)).is_ok() {
                prop_assert!(pair.invariant() > k_before);
            } else {
                prop_assert_eq!(pair.invariant(), k_before);
            }
            prop_assert!(custody_matches(&ledger, &pair));
        }
    }

    #[test]
    fn prop_swap_round_trip_loses_value(
        r0 in wide_reserve_strategy(),
        r1 in wide_reserve_strategy(),
        divisor in 10u128..10_000,
    ) {
        let (ledger, mut pair) = seeded(r0, r1);
        let trader = addr(0x30);
        let swap_in = (r0 / divisor).max(1);
        fund(&ledger, &pair, &trader, swap_in, 0);

        let Ok(first) = pair.swap(&trader, Amount::new(swap_in), Amount::ZERO) else {
            return Ok(());
        };
        let Ok(second) = pair.swap(&trader, Amount::ZERO, first.amount_out()) else {
            return Ok(());
        };
        prop_assert!(
            second.amount_out().get() <= swap_in,
            "round trip should lose value: final={} > sold={}",
            second.amount_out(), swap_in
        );
    }

    #[test]
    fn prop_output_is_monotonic(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        small in 1u128..1_000_000,
        extra in 0u128..1_000_000,
    ) {
        let (_ledger, pair) = seeded(r0, r1);
        let large = small + extra;
        let out_small = pair
            .quote_swap(Amount::new(small), Amount::ZERO)
            .map(|r| r.amount_out().get())
            .unwrap_or(0);
        let out_large = pair
            .quote_swap(Amount::new(large), Amount::ZERO)
            .map(|r| r.amount_out().get())
            .unwrap_or(0);
        prop_assert!(out_large >= out_small);
        prop_assert!(out_large < r1);
    }

    #[test]
    fn prop_huge_swaps_settle(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        amount in huge_input_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let (ledger, mut pair) = seeded(r0, r1);
        let trader = addr(0x30);
        let (in0, in1) = if zero_for_one { (amount, 0) } else { (0, amount) };
        fund(&ledger, &pair, &trader, in0, in1);
        let k_before = pair.invariant();
        let result = pair.swap(&trader, Amount::new(in0), Amount::new(in1));
        prop_assert!(result.is_ok(), "swap of {} failed: {:?}", amount, result);
        prop_assert!(pair.invariant() > k_before);
        prop_assert!(custody_matches(&ledger, &pair));
    }
}

// ---------------------------------------------------------------------------
// Properties 4-7: liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_withdraw_round_trip(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a0 in 1u128..10_000_000,
        a1 in 1u128..10_000_000,
    ) {
        let (ledger, mut pair) = seeded(r0, r1);
        let provider = addr(0x40);
        fund(&ledger, &pair, &provider, a0, a1);
        let Ok(minted) = pair.add_liquidity(&provider, Amount::new(a0), Amount::new(a1)) else {
            return Ok(());
        };
        let Ok((out0, out1)) = pair.remove_liquidity(&provider, minted) else {
            return Ok(());
        };
        prop_assert!(out0.get() <= a0, "token0: {} > {}", out0, a0);
        prop_assert!(out1.get() <= a1, "token1: {} > {}", out1, a1);
    }

    #[test]
    fn prop_shares_are_conserved(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (ledger, mut pair) = new_pair(FeeTier::DEFAULT);
        let trader = addr(0x30);
        for op in ops {
            match op {
                Op::Deposit { lp: i, amount0, amount1 } => {
                    fund(&ledger, &pair, &lp(i), amount0, amount1);
                    let _ = pair.add_liquidity(&lp(i), Amount::new(amount0), Amount::new(amount1));
                }
                Op::Withdraw { lp: i, percent } => {
                    let shares = portion(pair.balance_of(&lp(i)), percent);
                    let _ = pair.remove_liquidity(&lp(i), shares);
                }
                Op::Transfer { from, to, percent } => {
                    let shares = portion(pair.balance_of(&lp(from)), percent);
                    let _ = pair.transfer_shares(&lp(from), &lp(to), shares);
                }
                Op::Swap { zero_for_one, amount } => {
                    let (in0, in1) = if zero_for_one { (amount, 0) } else { (0, amount) };
                    fund(&ledger, &pair, &trader, in0, in1);
                    let _ = pair.swap(&trader, Amount::new(in0), Amount::new(in1));
                }
            }
            prop_assert_eq!(share_sum(&pair), pair.total_shares().get());
            let (r0, r1) = pair.reserves();
            prop_assert_eq!(r0.is_zero(), pair.is_empty());
            prop_assert_eq!(r1.is_zero(), pair.is_empty());
            prop_assert!(custody_matches(&ledger, &pair));
        }
    }

    #[test]
    fn prop_full_withdrawal_empties(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        swaps in prop::collection::vec(1u128..1_000_000, 0..6),
    ) {
        let (ledger, mut pair) = seeded(r0, r1);
        let trader = addr(0x30);
        for amount in swaps {
            fund(&ledger, &pair, &trader, amount, 0);
            let _ = pair.swap(&trader, Amount::new(amount), Amount::ZERO);
        }
        let lp = addr(0x10);
        let (reserve0, reserve1) = pair.reserves();
        let shares = pair.balance_of(&lp);
        prop_assert_eq!(pair.remove_liquidity(&lp, shares), Ok((reserve0, reserve1)));
        prop_assert!(pair.is_empty());
        prop_assert_eq!(pair.reserves(), (Amount::ZERO, Amount::ZERO));
        prop_assert!(custody_matches(&ledger, &pair));
    }
}
