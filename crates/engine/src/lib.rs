//! Domain core of the SACCO teller.
//!
//! The engine knows how to build a multi-leg (double-entry) transaction, how
//! to decide whether it is balanced and how a form session moves from editing
//! to submitting. It does not talk to the network: the create request goes
//! through a [`TransactionSubmitter`] supplied by the caller.
//!
//! Every monetary value is a [`Money`] in integer minor units.

pub use currency::Currency;
pub use entry::{Direction, Entry, EntryField, EntryId};
pub use entry_set::{EntrySetBuilder, Totals};
pub use error::EngineError;
pub use header::{SaccoRef, TransactionHeader, TransactionType};
pub use money::{Money, MoneyDisplay};
pub use session::{
    PendingSubmission, SessionError, SessionState, SubmitError, TellerSession, TransactionId,
    TransactionSubmitter,
};
pub use validation::{ValidEntry, ValidEntrySet, ValidationError, balance_tolerance, validate};

mod currency;
mod entry;
mod entry_set;
mod error;
mod header;
mod money;
mod session;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
