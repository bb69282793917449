//! Ledger entries.
//!
//! An [`Entry`] is one leg of a teller transaction: a debit or a credit of an
//! amount against a single account. Entries live inside an
//! [`EntrySetBuilder`](crate::EntrySetBuilder) and are only mutated through it.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money};

/// Local identifier of an entry inside one entry set.
///
/// Ids are handed out in increasing order and never reused after removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u32);

impl EntryId {
    pub(crate) const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Sign convention used for the balance invariant: debits count positive,
    /// credits negative.
    pub fn signed(self, amount: Money) -> Money {
        match self {
            Self::Debit => amount,
            Self::Credit => -amount,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<&str> for Direction {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debit" | "dr" => Ok(Self::Debit),
            "credit" | "cr" => Ok(Self::Credit),
            other => Err(EngineError::InvalidInput(format!(
                "invalid entry direction: {other}"
            ))),
        }
    }
}

/// Editable field of an [`Entry`], see
/// [`EntrySetBuilder::update_entry`](crate::EntrySetBuilder::update_entry).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    AccountRef,
    Amount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub(crate) id: EntryId,
    pub(crate) direction: Direction,
    pub(crate) account_ref: String,
    pub(crate) account_label: Option<String>,
    pub(crate) amount: Option<Money>,
}

impl Entry {
    pub(crate) fn new(id: EntryId, direction: Direction) -> Self {
        Self {
            id,
            direction,
            account_ref: String::new(),
            account_label: None,
            amount: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Opaque account reference; empty until an account is picked.
    pub fn account_ref(&self) -> &str {
        &self.account_ref
    }

    /// Display label returned by the account lookup, if any.
    pub fn account_label(&self) -> Option<&str> {
        self.account_label.as_deref()
    }

    /// `None` when the amount field is unset.
    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    /// Whether the entry has never been filled in.
    pub fn is_empty(&self) -> bool {
        self.account_ref.trim().is_empty() && self.amount.is_none()
    }

    /// A valid entry has an account and a strictly positive amount. Only
    /// valid entries count towards totals and submission.
    pub fn is_valid(&self) -> bool {
        !self.account_ref.trim().is_empty() && self.amount.is_some_and(Money::is_positive)
    }
}
