use engine::{Direction, EntryField, TellerSession};

use crate::error::{AppError, Result};

/// A `--debit`/`--credit` argument, `ACCOUNT=AMOUNT`.
#[derive(Debug, PartialEq, Eq)]
pub struct LegArg<'a> {
    pub account: &'a str,
    pub amount: &'a str,
}

pub fn parse(raw: &str) -> Result<LegArg<'_>> {
    let (account, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| AppError::InvalidLeg(raw.to_string()))?;
    let (account, amount) = (account.trim(), amount.trim());
    if account.is_empty() || amount.is_empty() {
        return Err(AppError::InvalidLeg(raw.to_string()));
    }
    Ok(LegArg { account, amount })
}

/// Writes a leg into the session, filling the first untouched entry of the
/// same direction before adding new ones.
pub fn apply(session: &mut TellerSession, direction: Direction, raw: &str) -> Result<()> {
    let leg = parse(raw)?;
    let entries = session.entries_mut();
    let reusable = entries
        .entries()
        .iter()
        .find(|entry| entry.direction() == direction && entry.is_empty())
        .map(|entry| entry.id());
    let id = match reusable {
        Some(id) => id,
        None => entries.add_entry(direction),
    };
    entries.update_entry(id, EntryField::AccountRef, leg.account)?;
    entries.update_entry(id, EntryField::Amount, leg.amount)?;
    Ok(())
}
