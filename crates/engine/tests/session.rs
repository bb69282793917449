use std::{future::Future, sync::Mutex};

use engine::{
    Currency, Direction, EntryField, Money, SessionError, SessionState, SubmitError,
    TellerSession, TransactionHeader, TransactionId, TransactionSubmitter, TransactionType,
    ValidEntrySet, ValidationError,
};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct StubError(String);

/// Submitter that records every call and answers with a canned outcome.
struct StubSubmitter {
    outcome: Result<String, String>,
    calls: Mutex<Vec<(TransactionHeader, ValidEntrySet)>>,
}

impl StubSubmitter {
    fn accepting(id: &str) -> Self {
        Self {
            outcome: Ok(id.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl TransactionSubmitter for StubSubmitter {
    type Error = StubError;

    fn submit(
        &self,
        header: &TransactionHeader,
        entries: &ValidEntrySet,
    ) -> impl Future<Output = Result<TransactionId, Self::Error>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((header.clone(), entries.clone()));
        let outcome = self.outcome.clone();
        async move { outcome.map(TransactionId::new).map_err(StubError) }
    }
}

fn filled_session(debit: &str, credit: &str) -> TellerSession {
    let mut session = TellerSession::new(Currency::Kes, TransactionType::Deposit);
    session
        .header_mut()
        .set_sacco("SACCO-1", Some("Mwalimu SACCO".to_string()));
    session.header_mut().remarks = "counter deposit".to_string();

    let entries = session.entries_mut();
    let debit_id = entries.entries()[0].id();
    let credit_id = entries.entries()[1].id();
    entries
        .update_entry(debit_id, EntryField::AccountRef, "GL-CASH")
        .unwrap();
    entries
        .update_entry(debit_id, EntryField::Amount, debit)
        .unwrap();
    entries
        .update_entry(credit_id, EntryField::AccountRef, "MEM-0042")
        .unwrap();
    entries
        .update_entry(credit_id, EntryField::Amount, credit)
        .unwrap();
    session
}

#[tokio::test]
async fn successful_submit_resets_form() {
    let mut session = filled_session("100.00", "100.00");
    let key_before = session.header().idempotency_key;
    let submitter = StubSubmitter::accepting("TX-1001");

    let id = session.submit(&submitter).await.unwrap();

    assert_eq!(id, TransactionId::new("TX-1001"));
    assert_eq!(submitter.call_count(), 1);
    assert_eq!(session.state(), SessionState::Editing);

    let entries = session.entries().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].direction(), Direction::Debit);
    assert_eq!(entries[1].direction(), Direction::Credit);
    assert!(entries.iter().all(|e| e.account_ref().is_empty()));
    assert!(entries.iter().all(|e| e.amount().is_none()));

    assert_eq!(session.header().remarks(), None);
    assert_eq!(session.header().sacco_id(), Some("SACCO-1"));
    assert_ne!(session.header().idempotency_key, key_before);
}

#[tokio::test]
async fn submitter_receives_validated_snapshot() {
    let mut session = filled_session("250.00", "250.00");
    let submitter = StubSubmitter::accepting("TX-1");

    session.submit(&submitter).await.unwrap();

    let calls = submitter.calls.lock().unwrap();
    let (header, entries) = &calls[0];
    assert_eq!(header.remarks(), Some("counter deposit"));
    assert_eq!(header.transaction_type, TransactionType::Deposit);
    assert_eq!(entries.entries().len(), 2);
    assert_eq!(entries.totals().debit_total, Money::new(25_000));
}

#[tokio::test]
async fn failed_submit_keeps_fields() {
    let mut session = filled_session("100.00", "100.00");
    let key_before = session.header().idempotency_key;
    let submitter = StubSubmitter::rejecting("account MEM-0042 is dormant");

    let err = session.submit(&submitter).await.unwrap_err();

    match err {
        SubmitError::Submission(err) => assert_eq!(err.to_string(), "account MEM-0042 is dormant"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.header().remarks(), Some("counter deposit"));
    assert_eq!(session.header().idempotency_key, key_before);
    assert_eq!(session.entries().entries()[1].account_ref(), "MEM-0042");
    assert_eq!(session.totals().credit_total, Money::new(10_000));
}

#[tokio::test]
async fn unbalanced_form_never_reaches_submitter() {
    let mut session = filled_session("100.00", "80.00");
    let submitter = StubSubmitter::accepting("TX-1");

    let err = session.submit(&submitter).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Session(SessionError::Validation(ValidationError::Unbalanced { .. }))
    ));
    assert_eq!(submitter.call_count(), 0);
    assert_eq!(session.state(), SessionState::Editing);
    assert!(!session.can_submit());
}

#[tokio::test]
async fn missing_sacco_blocks_submit() {
    let mut session = filled_session("100.00", "100.00");
    session.header_mut().set_sacco("", None);
    let submitter = StubSubmitter::accepting("TX-1");

    let err = session.submit(&submitter).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Session(SessionError::Validation(ValidationError::MissingSacco))
    ));
    assert_eq!(submitter.call_count(), 0);
}

#[test]
fn second_submit_is_rejected_while_in_flight() {
    let mut session = filled_session("100.00", "100.00");
    assert!(session.can_submit());

    let pending = session.begin_submit().unwrap();
    assert!(session.is_in_flight());
    assert!(!session.can_submit());
    assert_eq!(session.begin_submit(), Err(SessionError::InFlight));
    assert_eq!(session.cancel(), Err(SessionError::InFlight));

    // Edits are still accepted while the request is pending.
    let extra = session.entries_mut().add_entry(Direction::Credit);
    assert!(session.entries().entry(extra).is_some());

    let id = session
        .complete_submit::<StubError>(Ok(TransactionId::new("TX-9")))
        .unwrap();
    assert_eq!(id.as_str(), "TX-9");
    assert_eq!(pending.entries.entries().len(), 2);
    assert_eq!(session.entries().len(), 2);
}

#[test]
fn cancel_discards_form() {
    let mut session = filled_session("100.00", "100.00");
    session.cancel().unwrap();

    assert_eq!(session.header().sacco_id(), None);
    assert_eq!(session.header().transaction_type, TransactionType::Deposit);
    assert!(session.entries().entries().iter().all(|e| e.is_empty()));
}

#[tokio::test]
async fn dropped_submit_can_be_abandoned() {
    let mut session = filled_session("100.00", "100.00");
    let key_before = session.header().idempotency_key;

    let pending = session.begin_submit().unwrap();
    drop(pending);
    assert!(session.is_in_flight());

    session.abandon_submit().unwrap();
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.header().idempotency_key, key_before);
    assert_eq!(session.header().remarks(), Some("counter deposit"));

    let submitter = StubSubmitter::accepting("TX-2");
    let id = session.submit(&submitter).await.unwrap();
    assert_eq!(id.as_str(), "TX-2");
    assert_eq!(submitter.calls.lock().unwrap()[0].0.idempotency_key, key_before);
}

#[test]
fn abandon_outside_submit_is_illegal() {
    let mut session = filled_session("100.00", "100.00");
    assert!(matches!(
        session.abandon_submit(),
        Err(SessionError::IllegalTransition {
            from: SessionState::Editing,
            to: SessionState::Editing,
        })
    ));
}
