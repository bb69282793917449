//! [`TransactionSubmitter`] over the HTTP API.

use std::future::Future;

use api_types::transaction::{
    Direction as ApiDirection, EntryNew, TransactionNew, TransactionType as ApiType,
};
use engine::{TransactionHeader, TransactionId, TransactionSubmitter, ValidEntrySet};

use crate::{ApiClient, ClientError};

fn map_direction(direction: engine::Direction) -> ApiDirection {
    match direction {
        engine::Direction::Debit => ApiDirection::Debit,
        engine::Direction::Credit => ApiDirection::Credit,
    }
}

fn map_type(kind: engine::TransactionType) -> ApiType {
    match kind {
        engine::TransactionType::Deposit => ApiType::Deposit,
        engine::TransactionType::Withdrawal => ApiType::Withdrawal,
        engine::TransactionType::Transfer => ApiType::Transfer,
        engine::TransactionType::Journal => ApiType::Journal,
        engine::TransactionType::LoanDisbursement => ApiType::LoanDisbursement,
        engine::TransactionType::LoanRepayment => ApiType::LoanRepayment,
    }
}

fn map_currency(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Kes => api_types::Currency::Kes,
        engine::Currency::Ugx => api_types::Currency::Ugx,
        engine::Currency::Tzs => api_types::Currency::Tzs,
        engine::Currency::Usd => api_types::Currency::Usd,
        engine::Currency::Eur => api_types::Currency::Eur,
    }
}

/// Builds the create request from a validated entry set and its header.
pub fn transaction_request(header: &TransactionHeader, entries: &ValidEntrySet) -> TransactionNew {
    TransactionNew {
        sacco_ref: entries.sacco_ref().to_string(),
        transaction_type: map_type(header.transaction_type),
        remarks: header.remarks().map(str::to_string),
        currency: map_currency(entries.currency()),
        value_date: header.value_date,
        idempotency_key: Some(header.idempotency_key.to_string()),
        entries: entries
            .entries()
            .iter()
            .map(|entry| EntryNew {
                direction: map_direction(entry.direction),
                account_ref: entry.account_ref.clone(),
                amount_minor: entry.amount.minor(),
            })
            .collect(),
    }
}

impl TransactionSubmitter for ApiClient {
    type Error = ClientError;

    fn submit(
        &self,
        header: &TransactionHeader,
        entries: &ValidEntrySet,
    ) -> impl Future<Output = Result<TransactionId, Self::Error>> + Send {
        let body = transaction_request(header, entries);
        async move {
            let created = self.create_transaction(&body).await?;
            tracing::info!(
                "transaction {} created by {} at {}",
                created.id,
                created.created_by.as_deref().unwrap_or("-"),
                created
                    .created_on
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string())
            );
            Ok(TransactionId::new(created.id))
        }
    }
}
