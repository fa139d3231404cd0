//! Allocation rebalancing. One named strategy per mode, picked by `rebalancer_for`.
//!
//! Strategies work on a copy of the bucket values and return a plan; `adjust` commits the
//! plan only when it is a full replacement, so a rejected or failed call never leaves a
//! partially updated set behind.

use crate::error::AllocationError;
use crate::ids::BucketId;
use crate::models::{AdjustOutcome, AllocationMode, AllocationSet, Delta, Percentage, RejectReason};
use crate::rust_log;

/// What a strategy decided for one adjustment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    Commit(Vec<u8>),
    Unchanged,
    Reject(RejectReason),
}

pub trait Rebalancer {
    fn mode(&self) -> AllocationMode;

    /// `values` is the full set in bucket order, `target` an index into it.
    fn plan(&self, values: &[u8], target: usize, delta: Delta) -> Plan;
}

fn clamp_target(current: i64, delta: Delta) -> i64 {
    (current + delta.0 as i64).clamp(0, 100)
}

/// Keeps the total fixed: growth is taken proportionally from the other buckets,
/// shrinkage is handed out in equal shares with the remainder going to the last bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConservingRebalancer;

impl ConservingRebalancer {
    fn shrink_others(next: &mut [i64], others: &[usize], diff: i64) -> Result<(), RejectReason> {
        let total_others: i64 = others.iter().map(|&i| next[i]).sum();
        if total_others < diff {
            return Err(RejectReason::InsufficientHeadroom {
                needed: diff as u32,
                available: total_others as u32,
            });
        }

        let mut remaining = diff;
        for &i in others {
            if remaining <= 0 {
                break;
            }
            let cut = next[i].min(next[i] * diff / total_others);
            next[i] -= cut;
            remaining -= cut;
        }

        // Floor leftovers: one point at a time, in bucket order.
        while remaining > 0 && others.iter().any(|&i| next[i] > 0) {
            for &i in others {
                if remaining > 0 && next[i] > 0 {
                    next[i] -= 1;
                    remaining -= 1;
                }
            }
        }
        // Unreachable once the headroom guard above has passed.
        debug_assert_eq!(remaining, 0);
        Ok(())
    }

    fn grow_others(next: &mut [i64], others: &[usize], amount: i64) -> Result<(), RejectReason> {
        let Some((&last, rest)) = others.split_last() else {
            return Err(RejectReason::NoRedistributionTarget);
        };
        let share = amount / others.len() as i64;
        for &i in rest {
            next[i] += share;
        }
        next[last] += amount - share * rest.len() as i64;
        Ok(())
    }
}

impl Rebalancer for ConservingRebalancer {
    fn mode(&self) -> AllocationMode {
        AllocationMode::Conserving
    }

    fn plan(&self, values: &[u8], target: usize, delta: Delta) -> Plan {
        let current = values[target] as i64;
        let new_value = clamp_target(current, delta);
        let diff = new_value - current;
        if diff == 0 {
            return Plan::Unchanged;
        }

        let mut next: Vec<i64> = values.iter().map(|&v| v as i64).collect();
        let others: Vec<usize> = (0..values.len()).filter(|&i| i != target).collect();

        let result = if diff > 0 {
            Self::shrink_others(&mut next, &others, diff)
        } else {
            Self::grow_others(&mut next, &others, -diff)
        };
        if let Err(reason) = result {
            return Plan::Reject(reason);
        }
        next[target] = new_value;

        Plan::Commit(next.into_iter().map(|v| v as u8).collect())
    }
}

/// Guarded increment: only the target moves, and only while the total stays within 100.
#[derive(Clone, Copy, Debug, Default)]
pub struct CappedRebalancer;

impl Rebalancer for CappedRebalancer {
    fn mode(&self) -> AllocationMode {
        AllocationMode::Capped
    }

    fn plan(&self, values: &[u8], target: usize, delta: Delta) -> Plan {
        let current = values[target] as i64;
        let new_value = clamp_target(current, delta);
        let applied = new_value - current;
        if applied == 0 {
            return Plan::Unchanged;
        }

        let total: i64 = values.iter().map(|&v| v as i64).sum();
        let projected_total = total + applied;
        if projected_total > 100 {
            return Plan::Reject(RejectReason::WouldExceedCap {
                projected_total: projected_total as u32,
            });
        }

        let mut next = values.to_vec();
        next[target] = new_value as u8;
        Plan::Commit(next)
    }
}

pub fn rebalancer_for(mode: AllocationMode) -> &'static dyn Rebalancer {
    match mode {
        AllocationMode::Conserving => &ConservingRebalancer,
        AllocationMode::Capped => &CappedRebalancer,
    }
}

/// Apply `delta` to `target` under `mode`, which must be the set's own mode.
/// Unknown buckets and mismatched modes fail without touching the set;
/// rejected adjustments return `AdjustOutcome::Rejected` and leave the set as it was.
pub fn adjust(
    set: &mut AllocationSet,
    target: &BucketId,
    delta: Delta,
    mode: AllocationMode,
) -> Result<AdjustOutcome, AllocationError> {
    if mode != set.mode() {
        return Err(AllocationError::ModeMismatch {
            requested: mode,
            actual: set.mode(),
        });
    }
    let index = set
        .position(target)
        .ok_or_else(|| AllocationError::UnknownBucket(target.to_string()))?;
    let previous = set.buckets()[index].percentage;
    let values = set.values();

    match rebalancer_for(mode).plan(&values, index, delta) {
        Plan::Commit(next) => {
            let current = Percentage::clamped(next[index] as i64);
            set.commit(&next);
            rust_log!(
                "[roundup_rs] allocation adjusted bucket={} mode={} {} -> {} total={}",
                target,
                mode,
                previous,
                current,
                set.total()
            );
            Ok(AdjustOutcome::Applied {
                bucket: target.clone(),
                previous,
                current,
            })
        }
        Plan::Unchanged => Ok(AdjustOutcome::Unchanged {
            bucket: target.clone(),
        }),
        Plan::Reject(reason) => {
            rust_log!(
                "[roundup_rs] allocation rejected bucket={} mode={} delta={} reason={:?}",
                target,
                mode,
                delta.0,
                reason
            );
            Ok(AdjustOutcome::Rejected {
                bucket: target.clone(),
                reason,
            })
        }
    }
}

impl AllocationSet {
    /// `adjust` under the set's own mode.
    pub fn adjust(&mut self, target: &BucketId, delta: Delta) -> Result<AdjustOutcome, AllocationError> {
        let mode = self.mode();
        adjust(self, target, delta, mode)
    }
}
