//! Transaction header metadata edited alongside the entry set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    #[default]
    Journal,
    LoanDisbursement,
    LoanRepayment,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Transfer => "transfer",
            Self::Journal => "journal",
            Self::LoanDisbursement => "loan_disbursement",
            Self::LoanRepayment => "loan_repayment",
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            "transfer" => Ok(Self::Transfer),
            "journal" => Ok(Self::Journal),
            "loan_disbursement" => Ok(Self::LoanDisbursement),
            "loan_repayment" => Ok(Self::LoanRepayment),
            other => Err(EngineError::InvalidInput(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

impl core::str::FromStr for TransactionType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Sacco picked from the sacco lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaccoRef {
    id: String,
    label: Option<String>,
}

impl SaccoRef {
    /// Never blank.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Header of the transaction being edited.
///
/// Created fresh per form session. Audit stamps (created by / created on) are
/// assigned by the server and never sent from here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionHeader {
    sacco: Option<SaccoRef>,
    pub transaction_type: TransactionType,
    pub remarks: String,
    pub value_date: Option<NaiveDate>,
    /// Sent with the create request so that a resubmit after an ambiguous
    /// failure cannot post twice. Regenerated with every new form session.
    pub idempotency_key: Uuid,
}

impl Default for TransactionHeader {
    fn default() -> Self {
        Self::new(TransactionType::default())
    }
}

impl TransactionHeader {
    pub fn new(transaction_type: TransactionType) -> Self {
        Self {
            sacco: None,
            transaction_type,
            remarks: String::new(),
            value_date: None,
            idempotency_key: Uuid::new_v4(),
        }
    }

    /// Sets the sacco scope; a blank id clears it.
    pub fn set_sacco(&mut self, id: &str, label: Option<String>) {
        let id = id.trim();
        self.sacco = (!id.is_empty()).then(|| SaccoRef {
            id: id.to_string(),
            label,
        });
    }

    pub fn sacco(&self) -> Option<&SaccoRef> {
        self.sacco.as_ref()
    }

    pub fn sacco_id(&self) -> Option<&str> {
        self.sacco.as_ref().map(|sacco| sacco.id.as_str())
    }

    /// Remarks trimmed, `None` when blank.
    pub fn remarks(&self) -> Option<&str> {
        let remarks = self.remarks.trim();
        (!remarks.is_empty()).then_some(remarks)
    }

    /// State after a successful submit: same sacco and type, remarks cleared,
    /// new idempotency key.
    pub(crate) fn next_session(&self) -> Self {
        Self {
            sacco: self.sacco.clone(),
            transaction_type: self.transaction_type,
            remarks: String::new(),
            value_date: self.value_date,
            idempotency_key: Uuid::new_v4(),
        }
    }
}
