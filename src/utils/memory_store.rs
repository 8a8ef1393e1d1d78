//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    cost_centers: HashMap<Uuid, CostCenter>,
    entries: HashMap<Uuid, JournalEntry>,
    periods: HashMap<Uuid, FiscalPeriod>,
    entry_numbers: HashMap<String, u64>,
    period_audit: Vec<PeriodAuditEvent>,
}

/// In-memory [`LedgerStore`] for tests and development.
///
/// A single lock guards all state, so the commit operations are naturally
/// atomic and balance writes to the same account are serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        *inner = Inner::default();
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()> {
        self.inner
            .write()
            .unwrap()
            .accounts
            .insert(account.id, account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: Uuid) -> LedgerResult<Option<Account>> {
        Ok(self.inner.read().unwrap().accounts.get(&account_id).cloned())
    }

    async fn get_account_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> LedgerResult<Option<Account>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .accounts
            .values()
            .find(|a| a.tenant_id == tenant_id && a.code == code)
            .cloned())
    }

    async fn list_accounts(&self, tenant_id: &str) -> LedgerResult<Vec<Account>> {
        let inner = self.inner.read().unwrap();
        let mut accounts: Vec<Account> = inner
            .accounts
            .values()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.accounts.contains_key(&account.id) {
            inner.accounts.insert(account.id, account.clone());
            Ok(())
        } else {
            Err(LedgerError::UnknownAccount(account.id.to_string()))
        }
    }

    async fn save_cost_center(&mut self, cost_center: &CostCenter) -> LedgerResult<()> {
        self.inner
            .write()
            .unwrap()
            .cost_centers
            .insert(cost_center.id, cost_center.clone());
        Ok(())
    }

    async fn get_cost_center(&self, cost_center_id: Uuid) -> LedgerResult<Option<CostCenter>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .cost_centers
            .get(&cost_center_id)
            .cloned())
    }

    async fn list_cost_centers(&self, tenant_id: &str) -> LedgerResult<Vec<CostCenter>> {
        let inner = self.inner.read().unwrap();
        let mut cost_centers: Vec<CostCenter> = inner
            .cost_centers
            .values()
            .filter(|cc| cc.tenant_id == tenant_id)
            .cloned()
            .collect();
        cost_centers.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(cost_centers)
    }

    async fn update_cost_center(&mut self, cost_center: &CostCenter) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.cost_centers.contains_key(&cost_center.id) {
            inner.cost_centers.insert(cost_center.id, cost_center.clone());
            Ok(())
        } else {
            Err(LedgerError::UnknownCostCenter(cost_center.id.to_string()))
        }
    }

    async fn next_entry_number(&mut self, tenant_id: &str) -> LedgerResult<u64> {
        let mut inner = self.inner.write().unwrap();
        let counter = inner
            .entry_numbers
            .entry(tenant_id.to_string())
            .or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn save_entry(&mut self, entry: &JournalEntry) -> LedgerResult<()> {
        self.inner
            .write()
            .unwrap()
            .entries
            .insert(entry.id, entry.clone());
        Ok(())
    }

    async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>> {
        Ok(self.inner.read().unwrap().entries.get(&entry_id).cloned())
    }

    async fn update_entry(&mut self, entry: &JournalEntry) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.entries.contains_key(&entry.id) {
            inner.entries.insert(entry.id, entry.clone());
            Ok(())
        } else {
            Err(LedgerError::EntryNotFound(entry.id))
        }
    }

    async fn delete_entry(&mut self, entry_id: Uuid) -> LedgerResult<()> {
        if self
            .inner
            .write()
            .unwrap()
            .entries
            .remove(&entry_id)
            .is_some()
        {
            Ok(())
        } else {
            Err(LedgerError::EntryNotFound(entry_id))
        }
    }

    async fn list_entries(
        &self,
        tenant_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        let inner = self.inner.read().unwrap();
        let mut entries: Vec<JournalEntry> = inner
            .entries
            .values()
            .filter(|e| {
                e.tenant_id == tenant_id
                    && start_date.is_none_or(|s| e.date >= s)
                    && end_date.is_none_or(|end| e.date <= end)
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.number.cmp(&b.number)));
        Ok(entries)
    }

    async fn has_draft_entries_in_period(&self, period_id: Uuid) -> LedgerResult<bool> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .entries
            .values()
            .any(|e| e.period_id == period_id && e.status == EntryStatus::Draft))
    }

    async fn commit_posting(&mut self, entry: &JournalEntry) -> LedgerResult<()> {
        // one write guard for the whole unit: all-or-nothing by construction
        let mut inner = self.inner.write().unwrap();

        // re-assert status under the lock: a racing commit of the same draft
        // must lose, never double-apply
        let stored = inner
            .entries
            .get(&entry.id)
            .ok_or(LedgerError::EntryNotFound(entry.id))?;
        match stored.status {
            EntryStatus::Draft => {}
            EntryStatus::Posted => return Err(LedgerError::AlreadyPosted(entry.id)),
            EntryStatus::Reversed => {
                return Err(LedgerError::ConcurrentModification(format!(
                    "entry {} changed state during commit",
                    entry.id
                )))
            }
        }
        for line in &entry.lines {
            if !inner.accounts.contains_key(&line.account_id) {
                return Err(LedgerError::UnknownAccount(line.account_id.to_string()));
            }
        }

        // deltas are applied to the stored balances, not copied over them,
        // so interleaved commits against the same account both land
        for line in &entry.lines {
            if let Some(account) = inner.accounts.get_mut(&line.account_id) {
                account.apply_delta(&line.debit, &line.credit);
            }
        }
        inner.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn commit_reversal(
        &mut self,
        reversal: &JournalEntry,
        original: &JournalEntry,
    ) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();

        let stored_reversal = inner
            .entries
            .get(&reversal.id)
            .ok_or(LedgerError::EntryNotFound(reversal.id))?;
        if stored_reversal.status != EntryStatus::Draft {
            return Err(LedgerError::ConcurrentModification(format!(
                "reversal entry {} changed state during commit",
                reversal.id
            )));
        }
        // the original must still be Posted under the lock, or a second
        // racing reversal would cancel the same entry twice
        let stored_original = inner
            .entries
            .get(&original.id)
            .ok_or(LedgerError::EntryNotFound(original.id))?;
        match stored_original.status {
            EntryStatus::Posted => {}
            EntryStatus::Reversed => return Err(LedgerError::AlreadyReversed(original.id)),
            EntryStatus::Draft => {
                return Err(LedgerError::ConcurrentModification(format!(
                    "entry {} changed state during commit",
                    original.id
                )))
            }
        }
        for line in &reversal.lines {
            if !inner.accounts.contains_key(&line.account_id) {
                return Err(LedgerError::UnknownAccount(line.account_id.to_string()));
            }
        }

        for line in &reversal.lines {
            if let Some(account) = inner.accounts.get_mut(&line.account_id) {
                account.apply_delta(&line.debit, &line.credit);
            }
        }
        inner.entries.insert(reversal.id, reversal.clone());
        inner.entries.insert(original.id, original.clone());
        Ok(())
    }

    async fn save_period(&mut self, period: &FiscalPeriod) -> LedgerResult<()> {
        self.inner
            .write()
            .unwrap()
            .periods
            .insert(period.id, period.clone());
        Ok(())
    }

    async fn get_period(&self, period_id: Uuid) -> LedgerResult<Option<FiscalPeriod>> {
        Ok(self.inner.read().unwrap().periods.get(&period_id).cloned())
    }

    async fn find_period_by_date(
        &self,
        tenant_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<FiscalPeriod>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .periods
            .values()
            .find(|p| p.tenant_id == tenant_id && p.contains(date))
            .cloned())
    }

    async fn list_periods(&self, tenant_id: &str) -> LedgerResult<Vec<FiscalPeriod>> {
        let inner = self.inner.read().unwrap();
        let mut periods: Vec<FiscalPeriod> = inner
            .periods
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect();
        periods.sort_by(|a, b| a.start.cmp(&b.start));
        Ok(periods)
    }

    async fn update_period(&mut self, period: &FiscalPeriod) -> LedgerResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.periods.contains_key(&period.id) {
            inner.periods.insert(period.id, period.clone());
            Ok(())
        } else {
            Err(LedgerError::PeriodNotFound(period.id))
        }
    }

    async fn record_period_audit(&mut self, event: &PeriodAuditEvent) -> LedgerResult<()> {
        self.inner.write().unwrap().period_audit.push(event.clone());
        Ok(())
    }

    async fn list_period_audit(&self, period_id: Uuid) -> LedgerResult<Vec<PeriodAuditEvent>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .period_audit
            .iter()
            .filter(|e| e.period_id == period_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn account_round_trip_and_tenant_scoping() {
        let mut store = MemoryStore::new();
        let account = Account::new(
            "t1".to_string(),
            "1000".to_string(),
            "Cash".to_string(),
            AccountNature::Debit,
            None,
            BigDecimal::from(0),
        );
        store.save_account(&account).await.unwrap();

        let found = store.get_account_by_code("t1", "1000").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));
        assert!(store.get_account_by_code("t2", "1000").await.unwrap().is_none());
        assert_eq!(store.list_accounts("t1").await.unwrap().len(), 1);
        assert!(store.list_accounts("t2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn entry_numbers_are_sequential_per_tenant() {
        let mut store = MemoryStore::new();
        assert_eq!(store.next_entry_number("t1").await.unwrap(), 1);
        assert_eq!(store.next_entry_number("t1").await.unwrap(), 2);
        assert_eq!(store.next_entry_number("t2").await.unwrap(), 1);
    }

    fn entry_with(status: EntryStatus, lines: Vec<JournalLine>) -> JournalEntry {
        JournalEntry {
            id: Uuid::new_v4(),
            tenant_id: "t1".to_string(),
            number: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            period_id: Uuid::new_v4(),
            kind: EntryKind::Manual,
            description: "test".to_string(),
            source_ref: None,
            status,
            lines,
            reverses: None,
            reversed_by: None,
            created_by: "tester".to_string(),
            posted_by: None,
            created_at: chrono::Utc::now().naive_utc(),
            posted_at: None,
        }
    }

    #[tokio::test]
    async fn commit_reversal_rechecks_original_under_the_lock() {
        let mut store = MemoryStore::new();
        let cash = Account::new(
            "t1".to_string(),
            "1000".to_string(),
            "Cash".to_string(),
            AccountNature::Debit,
            None,
            BigDecimal::from(0),
        );
        let sales = Account::new(
            "t1".to_string(),
            "4000".to_string(),
            "Energy Sales".to_string(),
            AccountNature::Credit,
            None,
            BigDecimal::from(0),
        );
        store.save_account(&cash).await.unwrap();
        store.save_account(&sales).await.unwrap();

        let original = entry_with(
            EntryStatus::Posted,
            vec![
                JournalLine::debit(cash.id, BigDecimal::from(100)),
                JournalLine::credit(sales.id, BigDecimal::from(100)),
            ],
        );
        store.save_entry(&original).await.unwrap();

        let mirror_lines: Vec<JournalLine> =
            original.lines.iter().map(JournalLine::mirrored).collect();

        // two reversal attempts prepared against the same Posted snapshot
        let mut first = entry_with(EntryStatus::Draft, mirror_lines.clone());
        first.reverses = Some(original.id);
        let mut second = entry_with(EntryStatus::Draft, mirror_lines);
        second.reverses = Some(original.id);
        store.save_entry(&first).await.unwrap();
        store.save_entry(&second).await.unwrap();

        let mut first_posted = first.clone();
        first_posted.status = EntryStatus::Posted;
        let mut flipped = original.clone();
        flipped.status = EntryStatus::Reversed;
        flipped.reversed_by = Some(first.id);
        store.commit_reversal(&first_posted, &flipped).await.unwrap();

        // the loser carries a stale Posted view of the original; the store
        // must refuse it with nothing applied
        let mut second_posted = second.clone();
        second_posted.status = EntryStatus::Posted;
        let mut stale = original.clone();
        stale.status = EntryStatus::Reversed;
        stale.reversed_by = Some(second.id);
        let err = store
            .commit_reversal(&second_posted, &stale)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyReversed(_)));

        let balance = store.get_account(cash.id).await.unwrap().unwrap().balance;
        assert_eq!(balance, BigDecimal::from(-100));
        let stored = store.get_entry(original.id).await.unwrap().unwrap();
        assert_eq!(stored.reversed_by, Some(first.id));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mut store = MemoryStore::new();
        let clone = store.clone();
        let period = FiscalPeriod::new(
            "t1".to_string(),
            2024,
            1,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        store.save_period(&period).await.unwrap();

        let found = clone
            .find_period_by_date("t1", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.id), Some(period.id));
    }
}
