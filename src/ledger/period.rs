//! Fiscal period lifecycle and posting-date gating

use chrono::NaiveDate;
use uuid::Uuid;

use crate::traits::{LedgerStore, PeriodAction, PeriodAuditEvent};
use crate::types::*;

/// Tracks accounting periods and gates every posting and reversal against
/// period status. Single source of truth for "is this date postable".
pub struct PeriodManager<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> PeriodManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new open period. Date ranges may not overlap an existing
    /// period of the same tenant.
    pub async fn create_period(
        &mut self,
        tenant_id: String,
        year: i32,
        period_no: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<FiscalPeriod> {
        if end < start {
            return Err(LedgerError::Validation(format!(
                "period end {} precedes start {}",
                end, start
            )));
        }

        let period = FiscalPeriod::new(tenant_id, year, period_no, start, end);
        for existing in self.store.list_periods(&period.tenant_id).await? {
            if existing.overlaps(&period) {
                return Err(LedgerError::Validation(format!(
                    "period {}..{} overlaps existing period {}..{}",
                    start, end, existing.start, existing.end
                )));
            }
        }

        self.store.save_period(&period).await?;
        Ok(period)
    }

    /// Get a period by ID
    pub async fn get_period(&self, period_id: Uuid) -> LedgerResult<Option<FiscalPeriod>> {
        self.store.get_period(period_id).await
    }

    /// Find the tenant's period containing the given date
    pub async fn find_period_for(
        &self,
        tenant_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<FiscalPeriod>> {
        self.store.find_period_by_date(tenant_id, date).await
    }

    /// List a tenant's periods ordered by start date
    pub async fn list_periods(&self, tenant_id: &str) -> LedgerResult<Vec<FiscalPeriod>> {
        self.store.list_periods(tenant_id).await
    }

    /// Close a period, blocking further postings dated inside it.
    ///
    /// Fails with [`LedgerError::HasDraftEntries`] while draft entries still
    /// reference the period: a draft stranded in a closed period could never
    /// be posted.
    pub async fn close(&mut self, period_id: Uuid, actor: &str) -> LedgerResult<FiscalPeriod> {
        let mut period = self.get_period_required(period_id).await?;
        match period.status {
            PeriodStatus::Open => {}
            PeriodStatus::Closed => {
                return Err(LedgerError::Validation(format!(
                    "period {} is already closed",
                    period_id
                )))
            }
        }

        if self.store.has_draft_entries_in_period(period_id).await? {
            return Err(LedgerError::HasDraftEntries(period_id));
        }

        period.status = PeriodStatus::Closed;
        period.closed_by = Some(actor.to_string());
        period.closed_at = Some(chrono::Utc::now().naive_utc());
        self.store.update_period(&period).await?;
        self.store
            .record_period_audit(&PeriodAuditEvent::new(
                period_id,
                PeriodAction::Closed,
                actor.to_string(),
            ))
            .await?;

        tracing::info!(
            period_id = %period_id,
            tenant_id = %period.tenant_id,
            year = period.year,
            period_no = period.period_no,
            actor = %actor,
            "fiscal period closed"
        );
        Ok(period)
    }

    /// Reopen a closed period. An administrative override: always permitted,
    /// always audited, and cleared of closer metadata.
    pub async fn reopen(&mut self, period_id: Uuid, actor: &str) -> LedgerResult<FiscalPeriod> {
        let mut period = self.get_period_required(period_id).await?;
        match period.status {
            PeriodStatus::Closed => {}
            PeriodStatus::Open => {
                return Err(LedgerError::Validation(format!(
                    "period {} is already open",
                    period_id
                )))
            }
        }

        period.status = PeriodStatus::Open;
        period.closed_by = None;
        period.closed_at = None;
        self.store.update_period(&period).await?;
        self.store
            .record_period_audit(&PeriodAuditEvent::new(
                period_id,
                PeriodAction::Reopened,
                actor.to_string(),
            ))
            .await?;

        tracing::warn!(
            period_id = %period_id,
            tenant_id = %period.tenant_id,
            year = period.year,
            period_no = period.period_no,
            actor = %actor,
            "fiscal period reopened"
        );
        Ok(period)
    }

    /// Audit trail of close/reopen actions for a period, oldest first
    pub async fn audit_trail(&self, period_id: Uuid) -> LedgerResult<Vec<PeriodAuditEvent>> {
        self.store.list_period_audit(period_id).await
    }

    async fn get_period_required(&self, period_id: Uuid) -> LedgerResult<FiscalPeriod> {
        self.store
            .get_period(period_id)
            .await?
            .ok_or(LedgerError::PeriodNotFound(period_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::{AccountRegistry, AccountSpec};
    use crate::ledger::entry::EntryBuilder;
    use crate::utils::memory_store::MemoryStore;
    use bigdecimal::BigDecimal;

    fn jan() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn period_lifecycle_close_reopen_audited() {
        let store = MemoryStore::new();
        let mut manager = PeriodManager::new(store);
        let (start, end) = jan();
        let period = manager
            .create_period("t1".to_string(), 2024, 1, start, end)
            .await
            .unwrap();
        assert!(period.is_open());

        let closed = manager.close(period.id, "controller").await.unwrap();
        assert_eq!(closed.status, PeriodStatus::Closed);
        assert_eq!(closed.closed_by.as_deref(), Some("controller"));
        assert!(closed.closed_at.is_some());

        let reopened = manager.reopen(period.id, "cfo").await.unwrap();
        assert_eq!(reopened.status, PeriodStatus::Open);
        assert!(reopened.closed_by.is_none());
        assert!(reopened.closed_at.is_none());

        let trail = manager.audit_trail(period.id).await.unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].action, PeriodAction::Closed);
        assert_eq!(trail[1].action, PeriodAction::Reopened);
        assert_eq!(trail[1].actor, "cfo");
    }

    #[tokio::test]
    async fn overlapping_periods_rejected() {
        let store = MemoryStore::new();
        let mut manager = PeriodManager::new(store);
        let (start, end) = jan();
        manager
            .create_period("t1".to_string(), 2024, 1, start, end)
            .await
            .unwrap();

        let err = manager
            .create_period(
                "t1".to_string(),
                2024,
                2,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        // adjacent is fine, and another tenant may overlap freely
        manager
            .create_period(
                "t1".to_string(),
                2024,
                2,
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            )
            .await
            .unwrap();
        manager
            .create_period("t2".to_string(), 2024, 1, start, end)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn close_blocked_by_draft_entries() {
        let store = MemoryStore::new();
        let mut manager = PeriodManager::new(store.clone());
        let (start, end) = jan();
        let period = manager
            .create_period("t1".to_string(), 2024, 1, start, end)
            .await
            .unwrap();

        let mut accounts = AccountRegistry::new(store.clone());
        let cash = accounts
            .create_account(AccountSpec::new("t1", "1000", "Cash", AccountNature::Debit))
            .await
            .unwrap();
        let revenue = accounts
            .create_account(AccountSpec::new("t1", "4000", "Energy Sales", AccountNature::Credit))
            .await
            .unwrap();

        let mut builder = EntryBuilder::new(store);
        let draft = builder
            .build_draft(
                "t1".to_string(),
                vec![
                    JournalLine::debit(cash.id, BigDecimal::from(10)),
                    JournalLine::credit(revenue.id, BigDecimal::from(10)),
                ],
                EntryMetadata {
                    date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    kind: EntryKind::Manual,
                    description: "Pending entry".to_string(),
                    source_ref: None,
                    created_by: "ops".to_string(),
                },
            )
            .await
            .unwrap();

        let err = manager.close(period.id, "controller").await.unwrap_err();
        assert!(matches!(err, LedgerError::HasDraftEntries(_)));

        builder.discard_draft(draft.id).await.unwrap();
        manager.close(period.id, "controller").await.unwrap();
    }

    #[tokio::test]
    async fn closed_period_blocks_new_drafts() {
        let store = MemoryStore::new();
        let mut manager = PeriodManager::new(store.clone());
        let (start, end) = jan();
        let period = manager
            .create_period("t1".to_string(), 2024, 1, start, end)
            .await
            .unwrap();
        manager.close(period.id, "controller").await.unwrap();

        let mut accounts = AccountRegistry::new(store.clone());
        let cash = accounts
            .create_account(AccountSpec::new("t1", "1000", "Cash", AccountNature::Debit))
            .await
            .unwrap();
        let revenue = accounts
            .create_account(AccountSpec::new("t1", "4000", "Energy Sales", AccountNature::Credit))
            .await
            .unwrap();

        let mut builder = EntryBuilder::new(store);
        let err = builder
            .build_draft(
                "t1".to_string(),
                vec![
                    JournalLine::debit(cash.id, BigDecimal::from(10)),
                    JournalLine::credit(revenue.id, BigDecimal::from(10)),
                ],
                EntryMetadata {
                    date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    kind: EntryKind::Manual,
                    description: "Late entry".to_string(),
                    source_ref: None,
                    created_by: "ops".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ClosedPeriod { .. }));
    }
}
