//! Property tests for budget reallocation invariants.
//!
//! Uses proptest to verify:
//! 1. Share edits keep the sum at 100 and every other channel at the floor or above,
//!    including on freshly seeded budgets
//! 2. Share edits below the epsilon change nothing
//! 3. Amount edits move the total by exactly the difference
//! 4. Total edits keep shares and scale amounts
//! 5. Setting the current total is a no-op

use proptest::prelude::*;
use planner_core::budget::{
    BudgetState, ChannelAllocation, EditPolicy, DEFAULT_CURRENCY, MAX_CHANNEL_PERCENTAGE,
    MIN_CHANNEL_PERCENTAGE, MIN_TOTAL_BUDGET, PERCENTAGE_EPSILON, RESIDUAL_TOLERANCE,
};
use planner_core::models::Channel;

// ── Strategies (proptest) ────────────────────────────────────────────

/// A consistent budget: shares from weights in 10..=20 (so every share sits
/// inside the slider range for 2..=6 channels) and amounts that sum to the
/// total exactly.
fn arb_budget() -> impl Strategy<Value = BudgetState> {
    (
        prop::collection::vec(10u32..=20, 2..=6),
        2_000.0..5_000_000.0_f64,
    )
        .prop_map(|(weights, target_total)| {
            let weight_sum: u32 = weights.iter().sum();
            let allocations: Vec<ChannelAllocation> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let percentage = f64::from(*w) / f64::from(weight_sum) * 100.0;
                    ChannelAllocation {
                        channel: Channel::STANDARD[i].clone(),
                        amount: (target_total * percentage / 100.0).round(),
                        percentage,
                    }
                })
                .collect();
            let total = allocations.iter().map(|a| a.amount).sum();
            BudgetState {
                total,
                currency: DEFAULT_CURRENCY.to_string(),
                allocations,
            }
        })
}

/// A budget as the wizard seeds it: rounded shares that may sum to 99-101.
fn arb_seeded_budget_and_index() -> impl Strategy<Value = (BudgetState, usize)> {
    (
        prop::sample::subsequence(Channel::STANDARD.to_vec(), 1..=Channel::STANDARD.len()),
        1u32..=12,
    )
        .prop_filter_map("seed needs channels", |(channels, months)| {
            BudgetState::seed(&channels, months)
        })
        .prop_flat_map(|b| {
            let len = b.allocations.len();
            (Just(b), 0..len)
        })
}

fn arb_budget_and_index() -> impl Strategy<Value = (BudgetState, usize)> {
    arb_budget().prop_flat_map(|b| {
        let len = b.allocations.len();
        (Just(b), 0..len)
    })
}

// ── 1. Share edits rebalance ─────────────────────────────────────────

proptest! {
    #[test]
    fn percentage_edit_keeps_sum_and_floor(
        (budget, index) in arb_budget_and_index(),
        new_pct in MIN_CHANNEL_PERCENTAGE..=MAX_CHANNEL_PERCENTAGE,
    ) {
        let next = budget.adjust_by_percentage(index, new_pct, EditPolicy::Clamp).unwrap().state;
        prop_assert!((next.percentage_sum() - 100.0).abs() <= RESIDUAL_TOLERANCE);
        for (i, a) in next.allocations.iter().enumerate() {
            if i != index {
                prop_assert!(a.percentage >= MIN_CHANNEL_PERCENTAGE - 1e-9,
                    "channel {} fell to {}", i, a.percentage);
            }
        }
        prop_assert_eq!(next.total, budget.total);
    }

    #[test]
    fn strict_and_clamp_agree_on_valid_input(
        (budget, index) in arb_budget_and_index(),
        new_pct in MIN_CHANNEL_PERCENTAGE..=MAX_CHANNEL_PERCENTAGE,
    ) {
        let clamp = budget.adjust_by_percentage(index, new_pct, EditPolicy::Clamp).unwrap();
        let strict = budget.adjust_by_percentage(index, new_pct, EditPolicy::Strict).unwrap();
        prop_assert_eq!(clamp, strict);
    }
}

proptest! {
    #[test]
    fn percentage_edit_on_seeded_budget_settles_drift(
        (budget, index) in arb_seeded_budget_and_index(),
        new_pct in MIN_CHANNEL_PERCENTAGE..=MAX_CHANNEL_PERCENTAGE,
    ) {
        let next = budget.adjust_by_percentage(index, new_pct, EditPolicy::Clamp).unwrap().state;
        // An edit clamped back onto the current share leaves the seed as is.
        prop_assume!(next != budget);
        prop_assert!((next.percentage_sum() - 100.0).abs() <= RESIDUAL_TOLERANCE,
            "sum {}", next.percentage_sum());
        for a in &next.allocations {
            prop_assert!(a.percentage >= MIN_CHANNEL_PERCENTAGE - 1e-9,
                "{} fell to {}", a.channel, a.percentage);
            prop_assert!(a.amount >= 0.0);
        }
        prop_assert_eq!(next.total, budget.total);
    }
}

// ── 2. Epsilon no-op ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn tiny_percentage_edit_is_noop(
        (budget, index) in arb_budget_and_index(),
        nudge in -0.0099..0.0099_f64,
    ) {
        let old = budget.allocations[index].percentage;
        prop_assume!(nudge.abs() < PERCENTAGE_EPSILON);
        let r = budget.adjust_by_percentage(index, old + nudge, EditPolicy::Clamp).unwrap();
        prop_assert_eq!(r.state, budget);
        prop_assert!(r.notice.is_none());
    }
}

// ── 3. Amount edits grow the total ───────────────────────────────────

proptest! {
    #[test]
    fn amount_edit_moves_total_by_delta(
        (budget, index) in arb_budget_and_index(),
        factor in 0.0..3.0_f64,
    ) {
        let old = budget.allocations[index].amount;
        let new_amount = (old * factor).round();
        prop_assume!((new_amount - old).abs() >= 1.0);
        let next = budget.adjust_by_amount(index, new_amount, EditPolicy::Clamp).unwrap().state;
        prop_assert_eq!(next.total, budget.total + (new_amount - old));
        prop_assert!((next.percentage_sum() - 100.0).abs() < 1e-6);
        prop_assert_eq!(next.allocations[index].amount, new_amount);
    }
}

// ── 4/5. Total edits scale amounts ───────────────────────────────────

proptest! {
    #[test]
    fn total_edit_keeps_shares_and_scales_amounts(
        budget in arb_budget(),
        new_total in MIN_TOTAL_BUDGET..10_000_000.0_f64,
    ) {
        let next = budget.set_total_budget(new_total, EditPolicy::Clamp).unwrap().state;
        prop_assert_eq!(next.total, new_total);
        for (before, after) in budget.allocations.iter().zip(&next.allocations) {
            prop_assert_eq!(before.percentage, after.percentage);
        }
        let tolerance = 0.5 * next.allocations.len() as f64;
        prop_assert!((next.amount_sum() - new_total).abs() <= tolerance);
    }

    #[test]
    fn setting_current_total_is_noop(budget in arb_budget()) {
        let r = budget.set_total_budget(budget.total, EditPolicy::Strict).unwrap();
        prop_assert_eq!(r.state, budget);
    }
}
