//! HTTP adapter for the SACCO back-office API.
//!
//! [`ApiClient`] implements [`engine::TransactionSubmitter`] for the
//! create-transaction endpoint and exposes the account and sacco lookups the
//! teller form needs to fill in references.

pub use api::ApiClient;
pub use auth::AuthSession;
pub use error::{ClientError, Result};
pub use submitter::transaction_request;

mod api;
mod auth;
mod error;
mod submitter;
