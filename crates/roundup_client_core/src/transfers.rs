//! Input checks for withdrawals and donations. Amounts are minor units (pence).
//! Nothing here moves money; the host's backend executes confirmed transfers.

use crate::catalog::{find_donation_project, DonationProject};
use crate::error::TransferError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// £10.00
pub const MIN_WITHDRAWAL_MINOR: i64 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawMethod {
    Bank,
    Paypal,
    Crypto,
}

impl WithdrawMethod {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bank" => Some(WithdrawMethod::Bank),
            "paypal" => Some(WithdrawMethod::Paypal),
            "crypto" => Some(WithdrawMethod::Crypto),
            _ => None,
        }
    }

    pub fn fee_bps(&self) -> i64 {
        match self {
            WithdrawMethod::Bank | WithdrawMethod::Paypal => 0,
            WithdrawMethod::Crypto => 50,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, WithdrawMethod::Crypto)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WithdrawalQuote {
    pub method: WithdrawMethod,
    pub amount: i64,
    pub fee: i64,
    pub net: i64,
}

/// Parse "12", "12.5" or "12.50" into minor units. At most two decimals.
pub fn parse_amount_minor(text: &str) -> Result<i64, TransferError> {
    let text = text.trim();
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return Err(TransferError::InvalidAmount);
    }
    let amount = Decimal::from_str(text).map_err(|_| TransferError::InvalidAmount)?;
    if amount.scale() > 2 {
        return Err(TransferError::InvalidAmount);
    }
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or(TransferError::InvalidAmount)
}

/// Checks run in order: parse, positive, balance, minimum, method.
pub fn quote_withdrawal(
    amount_text: &str,
    balance_minor: i64,
    method: WithdrawMethod,
) -> Result<WithdrawalQuote, TransferError> {
    let amount = parse_amount_minor(amount_text)?;
    if amount <= 0 {
        return Err(TransferError::NonPositiveAmount);
    }
    if amount > balance_minor {
        return Err(TransferError::InsufficientFunds {
            available: balance_minor,
        });
    }
    if amount < MIN_WITHDRAWAL_MINOR {
        return Err(TransferError::BelowMinimum {
            minimum: MIN_WITHDRAWAL_MINOR,
        });
    }
    if !method.is_available() {
        return Err(TransferError::MethodUnavailable(format!("{:?}", method).to_lowercase()));
    }
    let fee = amount * method.fee_bps() / 10_000;
    Ok(WithdrawalQuote {
        method,
        amount,
        fee,
        net: amount - fee,
    })
}

/// `project_title` must be one of the Donate screen projects.
pub fn validate_donation(
    projects: &[DonationProject],
    project_title: &str,
    amount_minor: i64,
) -> Result<i64, TransferError> {
    if find_donation_project(projects, project_title).is_none() {
        return Err(TransferError::UnknownProject(project_title.to_string()));
    }
    if amount_minor <= 0 {
        return Err(TransferError::NonPositiveAmount);
    }
    Ok(amount_minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_donation_projects;

    #[test]
    fn parse_amount_accepts_common_forms() {
        assert_eq!(parse_amount_minor("12"), Ok(1200));
        assert_eq!(parse_amount_minor("12.5"), Ok(1250));
        assert_eq!(parse_amount_minor(" 12.05 "), Ok(1205));
        assert_eq!(parse_amount_minor("0.75"), Ok(75));
        assert_eq!(parse_amount_minor("12.50"), Ok(1250));
        assert_eq!(parse_amount_minor("-3"), Ok(-300));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        for bad in ["", "  ", "abc", "1.234", "1,000", ".", "12.x", "--1"] {
            assert_eq!(parse_amount_minor(bad), Err(TransferError::InvalidAmount), "{:?}", bad);
        }
    }

    #[test]
    fn withdrawal_checks_in_order() {
        let balance = 678_920;
        assert_eq!(quote_withdrawal("", balance, WithdrawMethod::Bank), Err(TransferError::InvalidAmount));
        assert_eq!(quote_withdrawal("0", balance, WithdrawMethod::Bank), Err(TransferError::NonPositiveAmount));
        assert_eq!(
            quote_withdrawal("7000", balance, WithdrawMethod::Bank),
            Err(TransferError::InsufficientFunds { available: balance })
        );
        assert_eq!(
            quote_withdrawal("9.99", balance, WithdrawMethod::Bank),
            Err(TransferError::BelowMinimum { minimum: MIN_WITHDRAWAL_MINOR })
        );
        // Balance check wins over the minimum check.
        assert_eq!(
            quote_withdrawal("5", 100, WithdrawMethod::Bank),
            Err(TransferError::InsufficientFunds { available: 100 })
        );
    }

    #[test]
    fn withdrawal_quote_applies_fee() {
        let quote = quote_withdrawal("250", 678_920, WithdrawMethod::Paypal).unwrap();
        assert_eq!(quote, WithdrawalQuote { method: WithdrawMethod::Paypal, amount: 25_000, fee: 0, net: 25_000 });
        assert_eq!(WithdrawMethod::Crypto.fee_bps(), 50);
        assert_eq!(
            quote_withdrawal("250", 678_920, WithdrawMethod::Crypto),
            Err(TransferError::MethodUnavailable("crypto".to_string()))
        );
    }

    #[test]
    fn donation_requires_known_project_and_positive_amount() {
        let projects = builtin_donation_projects();
        for title in ["Masjid in Somalia", "Medical Aid Gaza", "Orphan Education Fund", "Clean Water Initiative"] {
            assert_eq!(validate_donation(&projects, title, 2_500), Ok(2_500), "{}", title);
        }
        assert_eq!(
            validate_donation(&projects, "Clean Water Initiative", 0),
            Err(TransferError::NonPositiveAmount)
        );
        assert_eq!(
            validate_donation(&projects, "Moon Base", 5_000),
            Err(TransferError::UnknownProject("Moon Base".to_string()))
        );
    }
}
