//! Ledger facade orchestrating accounts, entries, periods, and reports

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::account::{AccountRegistry, AccountSpec};
use crate::ledger::cost_center::CostCenterRegistry;
use crate::ledger::entry::EntryBuilder;
use crate::ledger::period::PeriodManager;
use crate::ledger::posting::PostingEngine;
use crate::ledger::reversal::ReversalEngine;
use crate::reports::{
    BalanceSheet, CostCenterSummary, DashboardSummary, GeneralLedger, IncomeStatement, Reports,
    TrialBalance,
};
use crate::traits::{LedgerStore, PeriodAuditEvent};
use crate::types::*;

/// The external write/read surface of the ledger core.
///
/// Collaborating modules (billing, payroll, diesel, field operations)
/// interact with the ledger only through this facade: build a draft, post
/// it, reverse it, and read the derived reports.
pub struct Ledger<S: LedgerStore + Clone> {
    accounts: AccountRegistry<S>,
    cost_centers: CostCenterRegistry<S>,
    entries: EntryBuilder<S>,
    posting: PostingEngine<S>,
    reversal: ReversalEngine<S>,
    periods: PeriodManager<S>,
    reports: Reports<S>,
}

impl<S: LedgerStore + Clone> Ledger<S> {
    /// Create a ledger over the given storage backend
    pub fn new(store: S) -> Self {
        Self {
            accounts: AccountRegistry::new(store.clone()),
            cost_centers: CostCenterRegistry::new(store.clone()),
            entries: EntryBuilder::new(store.clone()),
            posting: PostingEngine::new(store.clone()),
            reversal: ReversalEngine::new(store.clone()),
            periods: PeriodManager::new(store.clone()),
            reports: Reports::new(store),
        }
    }

    // Chart of accounts

    pub async fn create_account(&mut self, spec: AccountSpec) -> LedgerResult<Account> {
        self.accounts.create_account(spec).await
    }

    pub async fn get_account(&self, account_id: Uuid) -> LedgerResult<Option<Account>> {
        self.accounts.get_account(account_id).await
    }

    pub async fn get_account_by_code(
        &self,
        tenant_id: &str,
        code: &str,
    ) -> LedgerResult<Option<Account>> {
        self.accounts.get_account_by_code(tenant_id, code).await
    }

    pub async fn list_accounts(&self, tenant_id: &str) -> LedgerResult<Vec<Account>> {
        self.accounts.list_accounts(tenant_id).await
    }

    /// O(1) read of the stored running balance
    pub async fn get_balance(&self, account_id: Uuid) -> LedgerResult<BigDecimal> {
        self.accounts.get_balance(account_id).await
    }

    pub async fn deactivate_account(&mut self, account_id: Uuid) -> LedgerResult<Account> {
        self.accounts.deactivate(account_id).await
    }

    /// Seed the standard energy-utility chart of accounts, keyed by slug
    pub async fn setup_standard_chart(
        &mut self,
        tenant_id: &str,
    ) -> LedgerResult<HashMap<String, Account>> {
        crate::ledger::account::seed::create_standard_chart(&mut self.accounts, tenant_id).await
    }

    // Cost centers

    pub async fn create_cost_center(
        &mut self,
        tenant_id: String,
        code: String,
        name: String,
        parent_id: Option<Uuid>,
    ) -> LedgerResult<CostCenter> {
        self.cost_centers
            .create_cost_center(tenant_id, code, name, parent_id)
            .await
    }

    pub async fn list_cost_centers(&self, tenant_id: &str) -> LedgerResult<Vec<CostCenter>> {
        self.cost_centers.list_cost_centers(tenant_id).await
    }

    // Journal entries

    /// Construct a validated draft entry; nothing persists on failure
    pub async fn build_draft(
        &mut self,
        tenant_id: String,
        lines: Vec<JournalLine>,
        metadata: EntryMetadata,
    ) -> LedgerResult<JournalEntry> {
        self.entries.build_draft(tenant_id, lines, metadata).await
    }

    /// Replace a draft's lines wholesale, re-running full validation
    pub async fn update_draft(
        &mut self,
        entry_id: Uuid,
        lines: Vec<JournalLine>,
    ) -> LedgerResult<JournalEntry> {
        self.entries.update_draft(entry_id, lines).await
    }

    /// Discard a draft with no side effects
    pub async fn discard_draft(&mut self, entry_id: Uuid) -> LedgerResult<()> {
        self.entries.discard_draft(entry_id).await
    }

    pub async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>> {
        self.entries.get_entry(entry_id).await
    }

    pub async fn list_entries(
        &self,
        tenant_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        self.entries.list_entries(tenant_id, start_date, end_date).await
    }

    /// Atomically post a draft, applying its balance deltas exactly once
    pub async fn post(&mut self, entry_id: Uuid, actor: &str) -> LedgerResult<JournalEntry> {
        self.posting.post(entry_id, actor).await
    }

    /// Cancel a posted entry with a mirror entry posted into the currently
    /// open period
    pub async fn reverse(
        &mut self,
        entry_id: Uuid,
        actor: &str,
        reason: &str,
    ) -> LedgerResult<JournalEntry> {
        self.reversal.reverse(entry_id, actor, reason).await
    }

    // Fiscal periods

    pub async fn create_period(
        &mut self,
        tenant_id: String,
        year: i32,
        period_no: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<FiscalPeriod> {
        self.periods
            .create_period(tenant_id, year, period_no, start, end)
            .await
    }

    pub async fn close_period(&mut self, period_id: Uuid, actor: &str) -> LedgerResult<FiscalPeriod> {
        self.periods.close(period_id, actor).await
    }

    pub async fn reopen_period(
        &mut self,
        period_id: Uuid,
        actor: &str,
    ) -> LedgerResult<FiscalPeriod> {
        self.periods.reopen(period_id, actor).await
    }

    pub async fn find_period_for(
        &self,
        tenant_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<FiscalPeriod>> {
        self.periods.find_period_for(tenant_id, date).await
    }

    pub async fn period_audit_trail(
        &self,
        period_id: Uuid,
    ) -> LedgerResult<Vec<PeriodAuditEvent>> {
        self.periods.audit_trail(period_id).await
    }

    // Reports

    pub async fn trial_balance(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<TrialBalance> {
        self.reports.trial_balance(tenant_id, start, end).await
    }

    pub async fn general_ledger(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> LedgerResult<GeneralLedger> {
        self.reports.general_ledger(account_id, start, end).await
    }

    pub async fn income_statement(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<IncomeStatement> {
        self.reports.income_statement(tenant_id, start, end).await
    }

    pub async fn balance_sheet(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> LedgerResult<BalanceSheet> {
        self.reports.balance_sheet(tenant_id, as_of).await
    }

    pub async fn dashboard(&self, tenant_id: &str) -> LedgerResult<DashboardSummary> {
        self.reports.dashboard(tenant_id).await
    }

    pub async fn cost_center_summary(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<CostCenterSummary> {
        self.reports.cost_center_summary(tenant_id, start, end).await
    }

    /// Check the standing invariants of the ledger and package the result
    /// for callers.
    pub async fn validate_integrity(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> LedgerResult<LedgerIntegrityReport> {
        let trial = self
            .trial_balance(tenant_id, NaiveDate::MIN, as_of)
            .await?;

        let mut issues = Vec::new();
        if !trial.is_balanced {
            issues.push(format!(
                "trial balance out of balance: debit-nature = {}, credit-nature = {}",
                trial.total_debit_nature, trial.total_credit_nature
            ));
        }

        for entry in self.list_entries(tenant_id, None, Some(as_of)).await? {
            if !entry.is_balanced() {
                issues.push(format!(
                    "entry {} is unbalanced: debits = {}, credits = {}",
                    entry.display_number(),
                    entry.total_debits(),
                    entry.total_credits()
                ));
            }
        }

        Ok(LedgerIntegrityReport {
            tenant_id: tenant_id.to_string(),
            as_of,
            is_valid: issues.is_empty(),
            issues,
            total_debit_nature: trial.total_debit_nature,
            total_credit_nature: trial.total_credit_nature,
        })
    }
}

/// Result of an integrity sweep over a tenant's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub tenant_id: String,
    pub as_of: NaiveDate,
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub total_debit_nature: BigDecimal,
    pub total_credit_nature: BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_store::MemoryStore;

    #[tokio::test]
    async fn facade_round_trip() {
        let mut ledger = Ledger::new(MemoryStore::new());
        ledger
            .create_period(
                "t1".to_string(),
                2024,
                1,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();
        let cash = ledger
            .create_account(AccountSpec::new("t1", "1000", "Cash", AccountNature::Debit))
            .await
            .unwrap();
        let revenue = ledger
            .create_account(AccountSpec::new("t1", "4000", "Energy Sales", AccountNature::Credit))
            .await
            .unwrap();

        let entry = ledger
            .build_draft(
                "t1".to_string(),
                vec![
                    JournalLine::debit(cash.id, BigDecimal::from(500)),
                    JournalLine::credit(revenue.id, BigDecimal::from(500)),
                ],
                EntryMetadata {
                    date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                    kind: EntryKind::System,
                    description: "Energy billing".to_string(),
                    source_ref: Some("invoice-1".to_string()),
                    created_by: "billing".to_string(),
                },
            )
            .await
            .unwrap();
        ledger.post(entry.id, "billing").await.unwrap();

        assert_eq!(ledger.get_balance(cash.id).await.unwrap(), BigDecimal::from(500));

        let report = ledger
            .validate_integrity("t1", NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            .await
            .unwrap();
        assert!(report.is_valid, "issues: {:?}", report.issues);
    }
}
