//! Pre-submit validation of a teller transaction.
//!
//! [`validate`] is a pure function over the header and a snapshot of the
//! entry set. Checks run in a fixed order and the first failure is the one
//! reported:
//!
//! 1. a sacco is selected
//! 2. there are valid entries at all
//! 3. both a debit and a credit leg are valid
//! 4. debits and credits balance within [`balance_tolerance`]
//!
//! On success the caller gets a [`ValidEntrySet`], the only input the
//! submitter accepts.

use thiserror::Error;

use crate::{Currency, Direction, EntrySetBuilder, Money, Totals, TransactionHeader};

/// Largest accepted `|debit_total - credit_total|`: 0.01 in major units,
/// expressed in the currency's minor units. Rounds down to zero for
/// currencies with fewer than two fraction digits.
pub fn balance_tolerance(currency: Currency) -> Money {
    Money::new(currency.scale() / 100)
}

impl Totals {
    pub fn is_balanced(&self, currency: Currency) -> bool {
        self.difference.abs() <= balance_tolerance(currency)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select a sacco before submitting")]
    MissingSacco,
    #[error("At least two entries with an account and an amount are required")]
    InsufficientEntries,
    #[error("At least one debit and one credit entry are required")]
    MissingDirection,
    #[error(
        "Debits and credits do not balance (difference {})",
        format_difference(.difference, .currency)
    )]
    Unbalanced { difference: Money, currency: Currency },
}

fn format_difference(difference: &Money, currency: &Currency) -> String {
    difference.display(*currency).to_string()
}

/// A leg that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidEntry {
    pub direction: Direction,
    pub account_ref: String,
    pub amount: Money,
}

/// Entry set that passed [`validate`]. Empty and incomplete legs are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidEntrySet {
    sacco_ref: String,
    currency: Currency,
    entries: Vec<ValidEntry>,
    totals: Totals,
}

impl ValidEntrySet {
    /// Sacco the entries were validated against.
    pub fn sacco_ref(&self) -> &str {
        &self.sacco_ref
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn entries(&self) -> &[ValidEntry] {
        &self.entries
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

pub fn validate(
    header: &TransactionHeader,
    entries: &EntrySetBuilder,
) -> Result<ValidEntrySet, ValidationError> {
    let Some(sacco_ref) = header.sacco_id() else {
        return Err(ValidationError::MissingSacco);
    };

    let valid: Vec<ValidEntry> = entries
        .valid_entries()
        .map(|entry| ValidEntry {
            direction: entry.direction(),
            account_ref: entry.account_ref().to_string(),
            amount: entry.amount().unwrap_or_default(),
        })
        .collect();

    if valid.is_empty() {
        return Err(ValidationError::InsufficientEntries);
    }

    // A single valid leg is reported as the missing opposite direction.
    let has_debit = valid.iter().any(|e| e.direction == Direction::Debit);
    let has_credit = valid.iter().any(|e| e.direction == Direction::Credit);
    if !has_debit || !has_credit {
        return Err(ValidationError::MissingDirection);
    }

    let currency = entries.currency();
    let totals = entries.totals();
    if !totals.is_balanced(currency) {
        return Err(ValidationError::Unbalanced {
            difference: totals.difference,
            currency,
        });
    }

    Ok(ValidEntrySet {
        sacco_ref: sacco_ref.to_string(),
        currency,
        entries: valid,
        totals,
    })
}
