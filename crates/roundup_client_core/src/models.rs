//! Data models for allocation sets, buckets and adjustment outcomes.
//! Wire format (FFI/JSON) uses strings for IDs; percentages are plain integers.

use crate::error::AllocationError;
use crate::ids::BucketId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Integer percentage in 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100);

    pub fn new(value: i64) -> Result<Self, AllocationError> {
        if !(0..=100).contains(&value) {
            return Err(AllocationError::PercentageOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    /// Saturates into 0..=100.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Percentage {
    type Error = AllocationError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Signed adjustment requested by the UI (stepper taps are ±1 / ±5, sliders may send anything).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta(pub i32);

impl Delta {
    /// Dart sliders hand us doubles; only finite whole numbers inside i32 are accepted.
    pub fn from_f64(value: f64) -> Result<Self, AllocationError> {
        if !value.is_finite() {
            return Err(AllocationError::InvalidDelta(format!("{} is not finite", value)));
        }
        if value.fract() != 0.0 {
            return Err(AllocationError::InvalidDelta(format!("{} is not a whole number", value)));
        }
        if value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(AllocationError::InvalidDelta(format!("{} is out of range", value)));
        }
        Ok(Self(value as i32))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationMode {
    /// Total is always exactly 100; other buckets absorb every change.
    Conserving,
    /// Total may float up to 100; over-budget adjustments are rejected.
    Capped,
}

impl AllocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationMode::Conserving => "conserving",
            AllocationMode::Capped => "capped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conserving" => Some(AllocationMode::Conserving),
            "capped" => Some(AllocationMode::Capped),
            _ => None,
        }
    }

    /// Whether `total` satisfies this mode's invariant.
    pub fn accepts_total(&self, total: u32) -> bool {
        match self {
            AllocationMode::Conserving => total == 100,
            AllocationMode::Capped => total <= 100,
        }
    }
}

impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: BucketId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Category the bucket belongs to (e.g. "Emergency Relief"); only used for subtotals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub percentage: Percentage,
}

impl Bucket {
    pub fn new(id: BucketId, percentage: Percentage) -> Self {
        Self {
            id,
            label: None,
            group: None,
            percentage,
        }
    }
}

/// Ordered bucket -> percentage mapping. Order is insertion order and drives redistribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationSet {
    mode: AllocationMode,
    buckets: Vec<Bucket>,
}

impl AllocationSet {
    /// Build a set and check the mode's invariant on the initial distribution.
    pub fn new(mode: AllocationMode, buckets: Vec<Bucket>) -> Result<Self, AllocationError> {
        if buckets.is_empty() {
            return Err(AllocationError::EmptySet);
        }
        let mut seen = HashSet::new();
        for b in &buckets {
            if !seen.insert(b.id.as_str()) {
                return Err(AllocationError::DuplicateBucket(b.id.to_string()));
            }
        }
        let set = Self { mode, buckets };
        let total = set.total();
        if !mode.accepts_total(total) {
            return Err(AllocationError::InvalidInitialState { total, mode });
        }
        Ok(set)
    }

    pub fn mode(&self) -> AllocationMode {
        self.mode
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.buckets.iter().map(|b| b.percentage.value() as u32).sum()
    }

    pub fn position(&self, id: &BucketId) -> Option<usize> {
        self.buckets.iter().position(|b| &b.id == id)
    }

    pub fn get(&self, id: &BucketId) -> Result<Percentage, AllocationError> {
        self.position(id)
            .map(|i| self.buckets[i].percentage)
            .ok_or_else(|| AllocationError::UnknownBucket(id.to_string()))
    }

    /// Sum of the buckets tagged with `group`. Unknown groups sum to 0.
    pub fn group_total(&self, group: &str) -> u32 {
        self.buckets
            .iter()
            .filter(|b| b.group.as_deref() == Some(group))
            .map(|b| b.percentage.value() as u32)
            .sum()
    }

    /// Current values in bucket order.
    pub(crate) fn values(&self) -> Vec<u8> {
        self.buckets.iter().map(|b| b.percentage.value()).collect()
    }

    /// Commit a full vector of new values. Caller guarantees len and range.
    pub(crate) fn commit(&mut self, values: &[u8]) {
        debug_assert_eq!(values.len(), self.buckets.len());
        for (bucket, v) in self.buckets.iter_mut().zip(values) {
            bucket.percentage = Percentage::clamped(*v as i64);
        }
    }

    pub fn snapshot(&self, set_id: &str) -> AllocationSnapshot {
        AllocationSnapshot {
            set_id: set_id.to_string(),
            mode: self.mode,
            total: self.total(),
            buckets: self.buckets.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// Capped mode: applying the change would push the total past 100.
    WouldExceedCap { projected_total: u32 },
    /// Conserving mode: the other buckets hold less than the target wants to take.
    InsufficientHeadroom { needed: u32, available: u32 },
    /// Conserving mode: nothing else can receive the freed percentage.
    NoRedistributionTarget,
}

/// Result of one adjustment. Rejections are values, not errors: the set is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdjustOutcome {
    Applied {
        bucket: BucketId,
        previous: Percentage,
        current: Percentage,
    },
    Unchanged {
        bucket: BucketId,
    },
    Rejected {
        bucket: BucketId,
        reason: RejectReason,
    },
}

impl AdjustOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AdjustOutcome::Applied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AdjustOutcome::Rejected { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AllocationSnapshot {
    pub set_id: String,
    pub mode: AllocationMode,
    pub total: u32,
    pub buckets: Vec<Bucket>,
}

/// Returned by save; `saved_at` is RFC 3339 UTC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SavedAllocation {
    #[serde(flatten)]
    pub snapshot: AllocationSnapshot,
    pub saved_at: String,
}
