//! Error types. FFI functions in lib.rs flatten these to `String` for Dart.

use crate::models::AllocationMode;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("Invalid initial state: total {total}% is not valid for {mode} mode")]
    InvalidInitialState { total: u32, mode: AllocationMode },

    #[error("Invalid initial state: allocation set has no buckets")]
    EmptySet,

    #[error("Duplicate bucket: {0}")]
    DuplicateBucket(String),

    #[error("Percentage out of range: {0} (expected 0-100)")]
    PercentageOutOfRange(i64),

    #[error("Mode mismatch: {requested} adjustment on a {actual} allocation set")]
    ModeMismatch {
        requested: AllocationMode,
        actual: AllocationMode,
    },

    #[error("Invalid delta: {0}")]
    InvalidDelta(String),

    #[error("Unknown allocation set: {0}")]
    UnknownAllocationSet(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Total allocation must equal 100% (currently {total}%)")]
    NotSaveable { total: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("Bank connection cannot {action} from step {from}")]
    InvalidStep { from: String, action: &'static str },

    #[error("Unknown bank: {0}")]
    UnknownBank(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Insufficient funds: up to {available} available")]
    InsufficientFunds { available: i64 },

    #[error("Minimum withdrawal amount is {minimum}")]
    BelowMinimum { minimum: i64 },

    #[error("Unknown withdrawal method: {0}")]
    UnknownMethod(String),

    #[error("Withdrawal method unavailable: {0}")]
    MethodUnavailable(String),

    #[error("Unknown project: {0}")]
    UnknownProject(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundingError {
    #[error("Unknown rounding field: {0}")]
    UnknownField(String),
}
