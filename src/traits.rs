//! Storage abstraction for the ledger engine

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::*;

/// Administrative action recorded against a fiscal period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodAction {
    Closed,
    Reopened,
}

/// Audit record for a period close or reopen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAuditEvent {
    pub id: Uuid,
    pub period_id: Uuid,
    pub action: PeriodAction,
    pub actor: String,
    pub at: NaiveDateTime,
}

impl PeriodAuditEvent {
    pub fn new(period_id: Uuid, action: PeriodAction, actor: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            period_id,
            action,
            actor,
            at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Storage abstraction for the ledger engine.
///
/// Lets the engine run against any durable backend (PostgreSQL, MySQL,
/// SQLite, in-memory, ...). Implementations must provide all-or-nothing
/// semantics for [`commit_posting`](LedgerStore::commit_posting) and
/// [`commit_reversal`](LedgerStore::commit_reversal): inside one unit of
/// isolation they re-assert the stored entry's status and apply the entry's
/// line deltas to the *stored* balances, so interleaved commits can neither
/// drop a delta nor apply one twice. Contention resolved as failure is
/// reported as [`LedgerError::ConcurrentModification`] and retried by the
/// caller.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    // Accounts

    /// Save a newly created account
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Get an account by ID
    async fn get_account(&self, account_id: Uuid) -> LedgerResult<Option<Account>>;

    /// Get an account by tenant-scoped code
    async fn get_account_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> LedgerResult<Option<Account>>;

    /// List a tenant's accounts ordered by code
    async fn list_accounts(&self, tenant_id: &str) -> LedgerResult<Vec<Account>>;

    /// Update account metadata (name, active flag); balances travel only
    /// through the commit operations below
    async fn update_account(&mut self, account: &Account) -> LedgerResult<()>;

    // Cost centers

    /// Save a newly created cost center
    async fn save_cost_center(&mut self, cost_center: &CostCenter) -> LedgerResult<()>;

    /// Get a cost center by ID
    async fn get_cost_center(&self, cost_center_id: Uuid) -> LedgerResult<Option<CostCenter>>;

    /// List a tenant's cost centers ordered by code
    async fn list_cost_centers(&self, tenant_id: &str) -> LedgerResult<Vec<CostCenter>>;

    /// Update a cost center
    async fn update_cost_center(&mut self, cost_center: &CostCenter) -> LedgerResult<()>;

    // Journal entries

    /// Next value of the tenant's sequential entry number
    async fn next_entry_number(&mut self, tenant_id: &str) -> LedgerResult<u64>;

    /// Save a draft entry
    async fn save_entry(&mut self, entry: &JournalEntry) -> LedgerResult<()>;

    /// Get an entry by ID
    async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>>;

    /// Replace a stored entry (draft edits)
    async fn update_entry(&mut self, entry: &JournalEntry) -> LedgerResult<()>;

    /// Delete an entry (draft discard only)
    async fn delete_entry(&mut self, entry_id: Uuid) -> LedgerResult<()>;

    /// List a tenant's entries within an optional date range, ordered by
    /// date then entry number
    async fn list_entries(
        &self,
        tenant_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>>;

    /// Whether any draft entry references the given period
    async fn has_draft_entries_in_period(&self, period_id: Uuid) -> LedgerResult<bool>;

    /// Atomically mark an entry posted and apply its line deltas to the
    /// stored account balances, as a single all-or-nothing unit.
    ///
    /// Must re-assert, inside the unit, that the stored entry is still
    /// `Draft`; fails with [`LedgerError::AlreadyPosted`] (or
    /// [`LedgerError::ConcurrentModification`]) otherwise, applying nothing.
    async fn commit_posting(&mut self, entry: &JournalEntry) -> LedgerResult<()>;

    /// Atomically post a reversal entry, apply its line deltas to the stored
    /// balances, and flip the original entry to reversed, as a single
    /// all-or-nothing unit.
    ///
    /// Must re-assert, inside the unit, that the stored reversal is still
    /// `Draft` and the stored original still `Posted`; fails with
    /// [`LedgerError::AlreadyReversed`] (or
    /// [`LedgerError::ConcurrentModification`]) otherwise, applying nothing.
    async fn commit_reversal(
        &mut self,
        reversal: &JournalEntry,
        original: &JournalEntry,
    ) -> LedgerResult<()>;

    // Fiscal periods

    /// Save a newly created period
    async fn save_period(&mut self, period: &FiscalPeriod) -> LedgerResult<()>;

    /// Get a period by ID
    async fn get_period(&self, period_id: Uuid) -> LedgerResult<Option<FiscalPeriod>>;

    /// Find the tenant's period containing the given date
    async fn find_period_by_date(
        &self,
        tenant_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<FiscalPeriod>>;

    /// List a tenant's periods ordered by start date
    async fn list_periods(&self, tenant_id: &str) -> LedgerResult<Vec<FiscalPeriod>>;

    /// Update a period's status and closer metadata
    async fn update_period(&mut self, period: &FiscalPeriod) -> LedgerResult<()>;

    /// Append a close/reopen audit record
    async fn record_period_audit(&mut self, event: &PeriodAuditEvent) -> LedgerResult<()>;

    /// List audit records for a period, oldest first
    async fn list_period_audit(&self, period_id: Uuid) -> LedgerResult<Vec<PeriodAuditEvent>>;
}
