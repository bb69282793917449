//! The entry set behind a teller form.
//!
//! [`EntrySetBuilder`] owns the ordered legs of one transaction being edited
//! and is the only way to mutate them. A fresh builder always starts with one
//! empty debit and one empty credit, and the builder never lets either
//! direction disappear completely.

use crate::{Currency, Direction, EngineError, Entry, EntryField, EntryId, Money, ResultEngine};

/// Running totals over the *valid* entries of a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub debit_total: Money,
    pub credit_total: Money,
    /// `debit_total - credit_total`.
    pub difference: Money,
}

#[derive(Clone, Debug)]
pub struct EntrySetBuilder {
    currency: Currency,
    entries: Vec<Entry>,
    next_id: u32,
}

impl Default for EntrySetBuilder {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl EntrySetBuilder {
    /// Fresh form state: one empty debit and one empty credit.
    pub fn new(currency: Currency) -> Self {
        let mut builder = Self {
            currency,
            entries: Vec::new(),
            next_id: 0,
        };
        builder.add_entry(Direction::Debit);
        builder.add_entry(Direction::Credit);
        builder
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and goes back to the fresh form state. Ids keep
    /// increasing across resets.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.add_entry(Direction::Debit);
        self.add_entry(Direction::Credit);
        tracing::debug!("entry set reset");
    }

    /// Appends an empty entry and returns its id.
    pub fn add_entry(&mut self, direction: Direction) -> EntryId {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry::new(id, direction));
        tracing::debug!("added {direction} entry {id}");
        id
    }

    /// Removes an entry, refusing to remove the last debit or the last credit
    /// row, or the last valid entry of its direction.
    pub fn remove_entry(&mut self, id: EntryId) -> ResultEngine<()> {
        let index = self.position(id)?;
        let removed = &self.entries[index];
        let direction = removed.direction;
        let same_direction = self
            .entries
            .iter()
            .filter(|entry| entry.direction == direction);
        let rows = same_direction.clone().count();
        let valid = same_direction.filter(|entry| entry.is_valid()).count();
        if rows <= 1 {
            return Err(EngineError::InvariantViolation(format!(
                "at least one {direction} entry is required"
            )));
        }
        if removed.is_valid() && valid <= 1 {
            return Err(EngineError::InvariantViolation(format!(
                "at least one valid {direction} entry is required"
            )));
        }

        self.entries.remove(index);
        tracing::debug!("removed {direction} entry {id}");
        Ok(())
    }

    /// Updates one field of an entry from raw form input.
    ///
    /// For [`EntryField::Amount`] an empty string unsets the amount, while
    /// negative or malformed input is rejected and the previous amount is
    /// kept. [`EntryField::AccountRef`] accepts any string; whether the
    /// account exists is the lookup service's business.
    pub fn update_entry(&mut self, id: EntryId, field: EntryField, value: &str) -> ResultEngine<()> {
        let index = self.position(id)?;
        match field {
            EntryField::Amount => {
                let amount = self.parse_amount(value)?;
                if let Some(amount) = amount
                    && !self.direction_total_fits(index, amount)
                {
                    return Err(EngineError::InvalidAmount(format!(
                        "{} {} total would overflow",
                        self.entries[index].direction,
                        self.currency
                    )));
                }
                self.entries[index].amount = amount;
            }
            EntryField::AccountRef => {
                let entry = &mut self.entries[index];
                entry.account_ref = value.trim().to_string();
                entry.account_label = None;
            }
        }
        tracing::debug!("updated {field:?} of entry {id}");
        Ok(())
    }

    /// Stores an account picked from the lookup together with its label.
    pub fn set_account(
        &mut self,
        id: EntryId,
        account_ref: &str,
        label: Option<String>,
    ) -> ResultEngine<()> {
        let index = self.position(id)?;
        let entry = &mut self.entries[index];
        entry.account_ref = account_ref.trim().to_string();
        entry.account_label = label;
        Ok(())
    }

    /// Sums the valid entries per direction. Cannot overflow: `update_entry`
    /// keeps every per-direction sum of amounts within `i64`.
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for entry in self.valid_entries() {
            let amount = entry.amount.unwrap_or_default();
            match entry.direction {
                Direction::Debit => totals.debit_total += amount,
                Direction::Credit => totals.credit_total += amount,
            }
        }
        totals.difference = totals.debit_total - totals.credit_total;
        totals
    }

    pub(crate) fn valid_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|entry| entry.is_valid())
    }

    fn position(&self, id: EntryId) -> ResultEngine<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("entry {id}")))
    }

    /// Whether the direction of entry `index`, with `amount` in place of its
    /// current amount, still sums without overflow. Counts entries that are
    /// not valid yet, since adding an account later makes them count.
    fn direction_total_fits(&self, index: usize, amount: Money) -> bool {
        let direction = self.entries[index].direction;
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, entry)| *i != index && entry.direction == direction)
            .filter_map(|(_, entry)| entry.amount)
            .try_fold(amount, Money::checked_add)
            .is_some()
    }

    fn parse_amount(&self, value: &str) -> ResultEngine<Option<Money>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        let amount = Money::parse_major(value, self.currency)?;
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }
        Ok(Some(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(builder: &mut EntrySetBuilder, id: EntryId, account: &str, amount: &str) {
        builder
            .update_entry(id, EntryField::AccountRef, account)
            .unwrap();
        builder.update_entry(id, EntryField::Amount, amount).unwrap();
    }

    fn ids(builder: &EntrySetBuilder) -> Vec<EntryId> {
        builder.entries().iter().map(Entry::id).collect()
    }

    #[test]
    fn new_builder_has_one_empty_debit_and_credit() {
        let builder = EntrySetBuilder::new(Currency::Kes);
        let entries = builder.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].direction(), Direction::Debit);
        assert_eq!(entries[1].direction(), Direction::Credit);
        assert!(entries.iter().all(Entry::is_empty));
        assert_eq!(builder.totals(), Totals::default());
    }

    #[test]
    fn add_entry_hands_out_fresh_ids() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let a = builder.add_entry(Direction::Debit);
        builder.remove_entry(a).unwrap();
        let b = builder.add_entry(Direction::Debit);
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn remove_keeps_other_ids_stable() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let extra = builder.add_entry(Direction::Credit);
        let last = builder.add_entry(Direction::Debit);
        let before = ids(&builder);

        builder.remove_entry(extra).unwrap();

        let expected: Vec<EntryId> = before.into_iter().filter(|id| *id != extra).collect();
        assert_eq!(ids(&builder), expected);
        assert!(builder.entry(last).is_some());
    }

    #[test]
    fn cannot_remove_last_debit_or_credit() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let fresh = ids(&builder);
        let (debit, credit) = (fresh[0], fresh[1]);

        assert!(matches!(
            builder.remove_entry(debit),
            Err(EngineError::InvariantViolation(_))
        ));
        assert!(matches!(
            builder.remove_entry(credit),
            Err(EngineError::InvariantViolation(_))
        ));
        assert_eq!(builder.len(), 2);

        let second_credit = builder.add_entry(Direction::Credit);
        builder.remove_entry(credit).unwrap();
        assert!(builder.remove_entry(second_credit).is_err());
    }

    #[test]
    fn cannot_remove_last_valid_entry_of_a_direction() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let fresh = ids(&builder);
        let (debit, credit) = (fresh[0], fresh[1]);
        fill(&mut builder, debit, "GL-CASH", "100");
        fill(&mut builder, credit, "MEM-1", "100");
        let spare = builder.add_entry(Direction::Debit);

        assert!(matches!(
            builder.remove_entry(debit),
            Err(EngineError::InvariantViolation(_))
        ));
        assert!(builder.entry(debit).is_some());

        let second = builder.add_entry(Direction::Debit);
        fill(&mut builder, second, "GL-BANK", "0.50");
        builder.remove_entry(debit).unwrap();
        builder.remove_entry(spare).unwrap();
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn amount_overflowing_direction_total_is_rejected() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let fresh = ids(&builder);
        let (debit, credit) = (fresh[0], fresh[1]);
        fill(&mut builder, debit, "GL-A", "92233720368547758.07");
        fill(&mut builder, credit, "MEM-1", "1");

        let second = builder.add_entry(Direction::Debit);
        builder
            .update_entry(second, EntryField::AccountRef, "GL-B")
            .unwrap();
        let err = builder
            .update_entry(second, EntryField::Amount, "92233720368547758.07")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
        assert_eq!(builder.entry(second).unwrap().amount(), None);

        // Replacing an entry's own amount does not count it twice.
        builder
            .update_entry(debit, EntryField::Amount, "92233720368547758.07")
            .unwrap();

        let totals = builder.totals();
        assert_eq!(totals.debit_total, Money::new(i64::MAX));
        assert_eq!(totals.credit_total, Money::new(100));
        assert_eq!(totals.difference, Money::new(i64::MAX - 100));
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let err = builder.remove_entry(EntryId::new(99)).unwrap_err();
        assert_eq!(err, EngineError::NotFound("entry #99".to_string()));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let err = builder
            .update_entry(EntryId::new(7), EntryField::Amount, "10")
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn negative_amount_is_rejected_and_previous_kept() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let debit = ids(&builder)[0];
        fill(&mut builder, debit, "ACC-1", "25.50");

        let err = builder
            .update_entry(debit, EntryField::Amount, "-3")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
        assert_eq!(builder.entry(debit).unwrap().amount(), Some(Money::new(2550)));

        assert!(builder
            .update_entry(debit, EntryField::Amount, "abc")
            .is_err());
        assert_eq!(builder.entry(debit).unwrap().amount(), Some(Money::new(2550)));
    }

    #[test]
    fn empty_amount_unsets() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let debit = ids(&builder)[0];
        fill(&mut builder, debit, "ACC-1", "10");
        builder.update_entry(debit, EntryField::Amount, "  ").unwrap();
        assert_eq!(builder.entry(debit).unwrap().amount(), None);
    }

    #[test]
    fn account_update_clears_lookup_label() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let debit = ids(&builder)[0];
        builder
            .set_account(debit, "ACC-1", Some("Jane Wanjiku - Savings".to_string()))
            .unwrap();
        assert_eq!(
            builder.entry(debit).unwrap().account_label(),
            Some("Jane Wanjiku - Savings")
        );

        builder
            .update_entry(debit, EntryField::AccountRef, "ACC-2")
            .unwrap();
        let entry = builder.entry(debit).unwrap();
        assert_eq!(entry.account_ref(), "ACC-2");
        assert_eq!(entry.account_label(), None);
    }

    #[test]
    fn totals_only_count_valid_entries() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let fresh = ids(&builder);
        let (debit, credit) = (fresh[0], fresh[1]);
        fill(&mut builder, debit, "ACC-A", "100.00");
        fill(&mut builder, credit, "ACC-B", "60.00");

        let no_account = builder.add_entry(Direction::Credit);
        builder
            .update_entry(no_account, EntryField::Amount, "40")
            .unwrap();
        let zero = builder.add_entry(Direction::Debit);
        fill(&mut builder, zero, "ACC-C", "0");

        assert_eq!(
            builder.totals(),
            Totals {
                debit_total: Money::new(10_000),
                credit_total: Money::new(6_000),
                difference: Money::new(4_000),
            }
        );
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut builder = EntrySetBuilder::new(Currency::Kes);
        let debit = ids(&builder)[0];
        fill(&mut builder, debit, "ACC-1", "10");
        builder.add_entry(Direction::Credit);

        builder.reset();

        assert_eq!(builder.len(), 2);
        assert!(builder.entries().iter().all(Entry::is_empty));
        assert!(builder.entry(debit).is_none());
    }
}
