//! Teller form session.
//!
//! A [`TellerSession`] owns one header and one entry set and walks them through
//! the submit workflow:
//!
//! ```text
//! Editing -> Validating -> Editing                (validation failed)
//!                       -> Submitting -> Editing  (success: form reset)
//!                                     -> Editing  (error: input kept)
//! ```
//!
//! The network call itself is delegated to a [`TransactionSubmitter`]. UIs that
//! drive the request from their own event loop use [`TellerSession::begin_submit`]
//! and [`TellerSession::complete_submit`]; everyone else can just await
//! [`TellerSession::submit`].

use core::fmt;
use std::future::Future;

use thiserror::Error;

use crate::{
    Currency, EntrySetBuilder, Totals, TransactionHeader, TransactionType, ValidEntrySet,
    ValidationError, validate,
};

/// Identifier the transaction API assigned to a created transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boundary to the external transaction API.
///
/// Implementations issue exactly one create request per call: no retries, no
/// batching. Errors are whatever the API reported.
pub trait TransactionSubmitter {
    type Error: std::error::Error + Send + Sync + 'static;

    fn submit(
        &self,
        header: &TransactionHeader,
        entries: &ValidEntrySet,
    ) -> impl Future<Output = Result<TransactionId, Self::Error>> + Send;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Editing,
    Validating,
    Submitting,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        matches!(
            (self, next),
            (Self::Editing, Self::Validating)
                | (Self::Validating, Self::Editing)
                | (Self::Validating, Self::Submitting)
                | (Self::Submitting, Self::Editing)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Illegal session transition from {from:?} to {to:?}")]
    IllegalTransition {
        from: SessionState,
        to: SessionState,
    },
}

/// Error of a full submit round: either the session refused to submit, or the
/// submitter failed and its error is passed through untouched.
#[derive(Error, Debug)]
pub enum SubmitError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Submission(E),
}

/// Snapshot handed to the submitter while the session is `Submitting`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    pub header: TransactionHeader,
    pub entries: ValidEntrySet,
}

#[derive(Debug, Default)]
pub struct TellerSession {
    header: TransactionHeader,
    entries: EntrySetBuilder,
    state: SessionState,
}

impl TellerSession {
    pub fn new(currency: Currency, transaction_type: TransactionType) -> Self {
        Self {
            header: TransactionHeader::new(transaction_type),
            entries: EntrySetBuilder::new(currency),
            state: SessionState::Editing,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == SessionState::Submitting
    }

    pub fn header(&self) -> &TransactionHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut TransactionHeader {
        &mut self.header
    }

    pub fn entries(&self) -> &EntrySetBuilder {
        &self.entries
    }

    /// Entries stay editable in every state, including while a submit is in
    /// flight.
    pub fn entries_mut(&mut self) -> &mut EntrySetBuilder {
        &mut self.entries
    }

    pub fn totals(&self) -> Totals {
        self.entries.totals()
    }

    /// Runs validation without touching the state machine.
    pub fn check(&self) -> Result<ValidEntrySet, ValidationError> {
        validate(&self.header, &self.entries)
    }

    /// Whether a submit action should be enabled right now.
    pub fn can_submit(&self) -> bool {
        !self.is_in_flight() && self.check().is_ok()
    }

    /// Validates and, on success, enters `Submitting` and returns the snapshot
    /// to send. On validation failure the session goes back to `Editing`.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SessionError> {
        if self.is_in_flight() {
            tracing::warn!("submit rejected: a submission is already in flight");
            return Err(SessionError::InFlight);
        }

        self.transition(SessionState::Validating)?;
        let entries = match self.check() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!("validation failed: {err}");
                self.transition(SessionState::Editing)?;
                return Err(err.into());
            }
        };
        self.transition(SessionState::Submitting)?;

        Ok(PendingSubmission {
            header: self.header.clone(),
            entries,
        })
    }

    /// Records the outcome of the in-flight submit.
    ///
    /// Success resets the entry set to one empty debit and one empty credit,
    /// clears the remarks and rotates the idempotency key. Failure keeps every
    /// field as it is.
    pub fn complete_submit<E>(
        &mut self,
        outcome: Result<TransactionId, E>,
    ) -> Result<TransactionId, SubmitError<E>>
    where
        E: std::error::Error + 'static,
    {
        self.transition(SessionState::Editing)?;
        match outcome {
            Ok(id) => {
                tracing::info!("transaction {id} submitted");
                self.entries.reset();
                self.header = self.header.next_session();
                Ok(id)
            }
            Err(err) => {
                tracing::warn!("transaction submission failed: {err}");
                Err(SubmitError::Submission(err))
            }
        }
    }

    /// Validates, submits once through `submitter` and records the outcome.
    ///
    /// Dropping the returned future mid-request leaves the session in
    /// `Submitting`; call [`TellerSession::abandon_submit`] to recover.
    pub async fn submit<S>(&mut self, submitter: &S) -> Result<TransactionId, SubmitError<S::Error>>
    where
        S: TransactionSubmitter,
    {
        let pending = self.begin_submit()?;
        let outcome = submitter.submit(&pending.header, &pending.entries).await;
        self.complete_submit(outcome)
    }

    /// Leaves `Submitting` without an outcome, for when the request was
    /// dropped or its result is unknown. Every field and the idempotency key
    /// are kept, so a retry cannot post twice.
    pub fn abandon_submit(&mut self) -> Result<(), SessionError> {
        if !self.is_in_flight() {
            return Err(SessionError::IllegalTransition {
                from: self.state,
                to: SessionState::Editing,
            });
        }
        self.transition(SessionState::Editing)?;
        tracing::warn!("in-flight submission abandoned");
        Ok(())
    }

    /// Discards the form: fresh header of the same type, fresh entry set.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::InFlight);
        }
        self.header = TransactionHeader::new(self.header.transaction_type);
        self.entries.reset();
        self.state = SessionState::Editing;
        Ok(())
    }

    fn transition(&mut self, to: SessionState) -> Result<(), SessionError> {
        let from = self.state;
        if !from.can_transition_to(to) {
            return Err(SessionError::IllegalTransition { from, to });
        }
        tracing::debug!("session {from:?} -> {to:?}");
        self.state = to;
        Ok(())
    }
}
