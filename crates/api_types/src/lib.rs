use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Kes,
    Ugx,
    Tzs,
    Usd,
    Eur,
}

/// Success body of every endpoint: `{"entity": ...}`.
///
/// Bodies in any other shape are treated as malformed by the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub entity: T,
}

impl<T> Envelope<T> {
    pub fn new(entity: T) -> Self {
        Self { entity }
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod account {
    use super::*;

    /// Query string of `GET /accounts/lookup`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountLookup {
        pub query: String,
        /// Restricts the search to one sacco.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sacco_ref: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccountView {
        pub account_ref: String,
        pub display_name: String,
        pub sacco_ref: String,
    }
}

pub mod sacco {
    use super::*;

    /// Query string of `GET /saccos/lookup`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaccoLookup {
        pub query: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SaccoView {
        pub sacco_ref: String,
        pub display_name: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Direction {
        Debit,
        Credit,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionType {
        Deposit,
        Withdrawal,
        Transfer,
        Journal,
        LoanDisbursement,
        LoanRepayment,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntryNew {
        pub direction: Direction,
        pub account_ref: String,
        /// Always > 0; the direction carries the sign.
        pub amount_minor: i64,
    }

    /// Body of `POST /transactions`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub sacco_ref: String,
        pub transaction_type: TransactionType,
        pub remarks: Option<String>,
        pub currency: Currency,
        pub value_date: Option<NaiveDate>,
        /// Optional idempotency key for safely retrying the same create request.
        pub idempotency_key: Option<String>,
        pub entries: Vec<EntryNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: String,
        /// Audit stamps, assigned by the server.
        pub created_by: Option<String>,
        pub created_on: Option<DateTime<Utc>>,
    }
}
