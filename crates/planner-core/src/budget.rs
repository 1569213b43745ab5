//! Budget allocation across channels.
//!
//! A [`BudgetState`] is seeded from the channel cost table and then edited one
//! channel at a time. Every edit is pure: it borrows the current state and
//! returns a [`Reallocation`] holding the next state, which the caller stores.
//!
//! Two edit semantics coexist and are kept distinct:
//!
//! * a percentage edit redistributes shares inside a fixed total;
//! * an amount edit grows or shrinks the total by the difference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::channels::channel_cost;
use crate::error::{PlannerError, Result, ValidationError};
use crate::models::{parse_variant, Channel};
use crate::notifications::Notice;

/// Lowest share any channel may hold, and the floor applied to channels that
/// absorb a percentage edit.
pub const MIN_CHANNEL_PERCENTAGE: f64 = 5.0;
/// Highest share a single channel may be given.
pub const MAX_CHANNEL_PERCENTAGE: f64 = 70.0;
/// Smallest accepted total budget in euros.
pub const MIN_TOTAL_BUDGET: f64 = 1000.0;
/// Percentage changes below this are ignored.
pub const PERCENTAGE_EPSILON: f64 = 0.01;
/// Amount changes below this (euros) are ignored.
pub const AMOUNT_EPSILON: f64 = 1.0;
/// Drift of the percentage sum from 100 tolerated before correction.
pub const RESIDUAL_TOLERANCE: f64 = 0.1;
/// Percentage edits at least this large produce a notice.
pub const SIGNIFICANT_CHANGE: f64 = 5.0;
pub const DEFAULT_CURRENCY: &str = "EUR";

// ── EditPolicy ────────────────────────────────────────────────────────────────

/// What to do with out-of-range budget input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditPolicy {
    /// Clamp values into range and ignore edits that cannot apply.
    #[default]
    Clamp,
    /// Reject out-of-range input with a [`ValidationError`].
    Strict,
}

impl EditPolicy {
    pub const ALL: [EditPolicy; 2] = [EditPolicy::Clamp, EditPolicy::Strict];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditPolicy::Clamp => "clamp",
            EditPolicy::Strict => "strict",
        }
    }
}

impl FromStr for EditPolicy {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "edit policy", value)
    }
}

impl fmt::Display for EditPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Budget types ──────────────────────────────────────────────────────────────

/// One channel's share of the budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAllocation {
    pub channel: Channel,
    pub amount: f64,
    pub percentage: f64,
}

/// The total budget and its split across the selected channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetState {
    pub total: f64,
    pub currency: String,
    pub allocations: Vec<ChannelAllocation>,
}

/// Result of a budget edit: the next state and an optional notice for the
/// user.
#[derive(Debug, Clone, PartialEq)]
pub struct Reallocation {
    pub state: BudgetState,
    pub notice: Option<Notice>,
}

impl Reallocation {
    fn unchanged(state: &BudgetState) -> Self {
        Self {
            state: state.clone(),
            notice: None,
        }
    }

    fn quiet(state: BudgetState) -> Self {
        Self { state, notice: None }
    }
}

fn amount_for(total: f64, percentage: f64) -> f64 {
    (total * percentage / 100.0).round()
}

/// Lowest share each of `count` channels can hold. Drops below
/// [`MIN_CHANNEL_PERCENTAGE`] once the channels cannot all reach it.
fn share_floor(count: usize) -> f64 {
    MIN_CHANNEL_PERCENTAGE.min(100.0 / count.max(1) as f64)
}

/// Highest share one of `count` channels can take while every other channel
/// keeps [`share_floor`].
fn share_ceiling(count: usize) -> f64 {
    let floor = share_floor(count);
    (100.0 - floor * count.saturating_sub(1) as f64)
        .min(MAX_CHANNEL_PERCENTAGE)
        .max(floor)
}

impl BudgetState {
    /// Derive a budget proposal for `channels` over `months` months.
    ///
    /// Each channel gets `cost * 1000 * months` euros and a whole-number share
    /// of the summed base cost. Returns `None` when no channels are selected.
    pub fn seed(channels: &[Channel], months: u32) -> Option<Self> {
        if channels.is_empty() {
            return None;
        }
        let months = f64::from(months.max(1));
        let base_total: f64 = channels.iter().map(channel_cost).sum();
        let allocations: Vec<ChannelAllocation> = channels
            .iter()
            .map(|channel| {
                let cost = channel_cost(channel);
                ChannelAllocation {
                    channel: channel.clone(),
                    amount: cost * 1000.0 * months,
                    percentage: (cost / base_total * 100.0).round(),
                }
            })
            .collect();
        let total = allocations.iter().map(|a| a.amount).sum();
        tracing::debug!(
            channels = channels.len(),
            months = months,
            total = total,
            "seeded budget"
        );
        Some(Self {
            total,
            currency: DEFAULT_CURRENCY.to_string(),
            allocations,
        })
    }

    pub fn percentage_sum(&self) -> f64 {
        self.allocations.iter().map(|a| a.percentage).sum()
    }

    pub fn amount_sum(&self) -> f64 {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Whether the shares sum to 100 within [`RESIDUAL_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        (self.percentage_sum() - 100.0).abs() <= RESIDUAL_TOLERANCE
    }

    pub fn allocation(&self, channel: &Channel) -> Option<&ChannelAllocation> {
        self.allocations.iter().find(|a| &a.channel == channel)
    }

    /// Check `index`; `Ok(false)` means the clamp policy ignores the edit.
    fn check_index(&self, index: usize, policy: EditPolicy) -> Result<bool> {
        if index < self.allocations.len() {
            return Ok(true);
        }
        let err = ValidationError::IndexOutOfRange {
            index,
            len: self.allocations.len(),
        };
        match policy {
            EditPolicy::Strict => Err(err.into()),
            EditPolicy::Clamp => {
                tracing::warn!(error = %err, "ignoring budget edit");
                Ok(false)
            }
        }
    }

    fn check_finite(value: f64, policy: EditPolicy) -> Result<bool> {
        if value.is_finite() {
            return Ok(true);
        }
        match policy {
            EditPolicy::Strict => Err(ValidationError::NotFinite.into()),
            EditPolicy::Clamp => {
                tracing::warn!(value = value, "ignoring non-finite budget input");
                Ok(false)
            }
        }
    }

    /// Set one channel's share and rebalance the others inside the fixed
    /// total.
    ///
    /// The other channels give up (or receive) the difference in proportion
    /// to their current shares, never falling below
    /// [`MIN_CHANNEL_PERCENTAGE`]. Remaining drift from 100 is settled on the
    /// last channel.
    ///
    /// The accepted range is 5-70 %, narrowed so the other channels can keep
    /// their floor: eight channels allow at most 65 %. With more than twenty
    /// channels the floor itself shrinks to an equal split.
    pub fn adjust_by_percentage(
        &self,
        index: usize,
        new_percentage: f64,
        policy: EditPolicy,
    ) -> Result<Reallocation> {
        if !self.check_index(index, policy)? || !Self::check_finite(new_percentage, policy)? {
            return Ok(Reallocation::unchanged(self));
        }
        let count = self.allocations.len();
        let floor = share_floor(count);
        let ceiling = share_ceiling(count);
        let new_percentage = if (floor..=ceiling).contains(&new_percentage) {
            new_percentage
        } else if policy == EditPolicy::Strict {
            return Err(ValidationError::PercentageOutOfRange {
                value: new_percentage,
                min: floor,
                max: ceiling,
            }
            .into());
        } else {
            new_percentage.clamp(floor, ceiling)
        };

        let old_percentage = self.allocations[index].percentage;
        let delta = new_percentage - old_percentage;
        if delta.abs() < PERCENTAGE_EPSILON {
            return Ok(Reallocation::unchanged(self));
        }

        let total = self.total;
        let mut next = self.clone();
        {
            let target = &mut next.allocations[index];
            target.percentage = new_percentage;
            target.amount = amount_for(total, new_percentage);
        }

        let other_sum: f64 = next
            .allocations
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, a)| a.percentage)
            .sum();
        if other_sum > 0.0 {
            for (i, alloc) in next.allocations.iter_mut().enumerate() {
                if i == index {
                    continue;
                }
                let ratio = alloc.percentage / other_sum;
                alloc.percentage = (alloc.percentage - delta * ratio).max(floor);
                alloc.amount = amount_for(total, alloc.percentage);
            }
        }

        settle_residual(&mut next.allocations, index, total, floor);

        let notice = (delta.abs() >= SIGNIFICANT_CHANGE).then(|| {
            Notice::info(format!(
                "{} budget adjusted to {:.0}%",
                next.allocations[index].channel, new_percentage
            ))
        });
        tracing::debug!(
            index = index,
            from = old_percentage,
            to = new_percentage,
            "channel share adjusted"
        );
        Ok(Reallocation { state: next, notice })
    }

    /// Set one channel's amount; the total moves by the same difference and
    /// every share is recomputed from the new total.
    pub fn adjust_by_amount(
        &self,
        index: usize,
        new_amount: f64,
        policy: EditPolicy,
    ) -> Result<Reallocation> {
        if !self.check_index(index, policy)? || !Self::check_finite(new_amount, policy)? {
            return Ok(Reallocation::unchanged(self));
        }
        let new_amount = if new_amount >= 0.0 {
            new_amount
        } else if policy == EditPolicy::Strict {
            return Err(ValidationError::NegativeAmount(new_amount).into());
        } else {
            0.0
        };

        let old_amount = self.allocations[index].amount;
        let delta = new_amount - old_amount;
        if delta.abs() < AMOUNT_EPSILON {
            return Ok(Reallocation::unchanged(self));
        }

        let new_total = self.total + delta;
        if new_total <= 0.0 {
            let err = ValidationError::NonPositiveTotal(new_total);
            return match policy {
                EditPolicy::Strict => Err(err.into()),
                EditPolicy::Clamp => {
                    tracing::warn!(error = %err, "ignoring budget edit");
                    Ok(Reallocation::unchanged(self))
                }
            };
        }

        let mut next = self.clone();
        next.total = new_total;
        next.allocations[index].amount = new_amount;
        for alloc in &mut next.allocations {
            alloc.percentage = alloc.amount / new_total * 100.0;
        }
        tracing::debug!(
            index = index,
            from = old_amount,
            to = new_amount,
            total = new_total,
            "channel amount adjusted"
        );
        Ok(Reallocation::quiet(next))
    }

    /// Change the total budget. Shares stay as they are and every amount is
    /// scaled by `new_total / total`.
    pub fn set_total_budget(&self, new_total: f64, policy: EditPolicy) -> Result<Reallocation> {
        if !Self::check_finite(new_total, policy)? || new_total == self.total {
            return Ok(Reallocation::unchanged(self));
        }
        // An amount edit may have taken the total under the floor; clamping
        // never raises it above the current value.
        let new_total = if new_total >= MIN_TOTAL_BUDGET {
            new_total
        } else if policy == EditPolicy::Strict {
            return Err(ValidationError::TotalBelowMinimum {
                value: new_total,
                min: MIN_TOTAL_BUDGET,
            }
            .into());
        } else {
            MIN_TOTAL_BUDGET.min(self.total.max(new_total))
        };

        if new_total == self.total {
            return Ok(Reallocation::unchanged(self));
        }

        let mut next = self.clone();
        if self.total > 0.0 {
            let ratio = new_total / self.total;
            for alloc in &mut next.allocations {
                alloc.amount = (alloc.amount * ratio).round();
            }
        } else {
            for alloc in &mut next.allocations {
                alloc.amount = amount_for(new_total, alloc.percentage);
            }
        }
        next.total = new_total;
        tracing::debug!(from = self.total, to = new_total, "total budget changed");
        Ok(Reallocation::quiet(next))
    }
}

/// Bring the share sum back to 100 when it drifted past the tolerance.
///
/// The last channel takes the correction. When the correction is negative it
/// only goes down to `floor`; the rest comes from the preceding non-target
/// channels and, last of all, from the edited channel itself, which stops at
/// `floor` as well.
fn settle_residual(allocations: &mut [ChannelAllocation], target: usize, total: f64, floor: f64) {
    let sum: f64 = allocations.iter().map(|a| a.percentage).sum();
    let mut residual = 100.0 - sum;
    if residual.abs() <= RESIDUAL_TOLERANCE {
        return;
    }
    let last = allocations.len() - 1;
    let mut order: Vec<usize> = (0..allocations.len())
        .rev()
        .filter(|&i| i != target)
        .collect();
    if target == last {
        order.insert(0, target);
    } else {
        order.push(target);
    }

    for i in order {
        if residual == 0.0 {
            break;
        }
        let alloc = &mut allocations[i];
        let before = alloc.percentage;
        let after = if residual > 0.0 {
            before + residual
        } else {
            (before + residual).max(floor)
        };
        if after != before {
            alloc.percentage = after;
            alloc.amount = amount_for(total, after);
            residual -= after - before;
        }
    }
    if residual.abs() > RESIDUAL_TOLERANCE {
        tracing::debug!(residual = residual, "share drift left at the floor");
    }
}
