//! Read-only report derivation over posted ledger state.
//!
//! Every report here is a pure projection: drafts are invisible, balances
//! are never mutated, and the trial-balance equality is the standing
//! correctness signal for the whole engine.
//!
//! Reversed entries remain part of posted history; the `Reversed` status
//! only marks that a mirror entry exists, so reports fold in both `Posted`
//! and `Reversed` entries.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::LedgerStore;
use crate::types::*;

fn is_applied(status: EntryStatus) -> bool {
    matches!(status, EntryStatus::Posted | EntryStatus::Reversed)
}

/// Per-account row of a trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account_id: Uuid,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    /// Balance entering the range: opening balance plus posted movement
    /// before the range start
    pub opening: BigDecimal,
    /// Posted debits within the range
    pub debits: BigDecimal,
    /// Posted credits within the range
    pub credits: BigDecimal,
    /// Balance leaving the range, per the account's nature
    pub closing: BigDecimal,
}

/// Trial balance: proof that total debit-nature balances equal total
/// credit-nature balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub tenant_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Rows ordered by account code
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit_nature: BigDecimal,
    pub total_credit_nature: BigDecimal,
    pub is_balanced: bool,
}

/// One posted line in an account's general ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralLedgerLine {
    pub date: NaiveDate,
    pub entry_id: Uuid,
    pub entry_number: String,
    pub description: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub running_balance: BigDecimal,
}

/// Chronological posted-line detail for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralLedger {
    pub account_id: Uuid,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub opening: BigDecimal,
    pub lines: Vec<GeneralLedgerLine>,
    pub closing: BigDecimal,
}

/// Per-account line of an income statement or balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub account_id: Uuid,
    pub code: String,
    pub name: String,
    pub amount: BigDecimal,
}

/// Revenue-like vs expense-like aggregation over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub tenant_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Credit-nature accounts: net posted credits within the range
    pub revenue: Vec<StatementLine>,
    /// Debit-nature accounts: net posted debits within the range
    pub expenses: Vec<StatementLine>,
    pub total_revenue: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net: BigDecimal,
}

/// Nature-partitioned balance snapshot.
///
/// `net_position` is reported, not asserted against an equity bucket;
/// equity classification is a chart-of-accounts concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub tenant_id: String,
    pub as_of: NaiveDate,
    /// Debit-nature accounts (asset-like)
    pub assets: Vec<StatementLine>,
    /// Credit-nature accounts (liability-like)
    pub liabilities: Vec<StatementLine>,
    pub total_assets: BigDecimal,
    pub total_liabilities: BigDecimal,
    pub net_position: BigDecimal,
}

/// High-level aggregates for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub tenant_id: String,
    pub account_count: usize,
    pub active_account_count: usize,
    pub draft_entries: usize,
    pub posted_entries: usize,
    pub reversed_entries: usize,
    pub total_posted_debits: BigDecimal,
    pub total_posted_credits: BigDecimal,
    pub open_periods: usize,
    pub closed_periods: usize,
}

/// Posted activity attributed to one cost center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterRow {
    pub cost_center_id: Uuid,
    pub code: String,
    pub name: String,
    pub debits: BigDecimal,
    pub credits: BigDecimal,
    /// debits − credits
    pub net: BigDecimal,
}

/// Derived balance-by-cost-center report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterSummary {
    pub tenant_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Rows ordered by cost-center code
    pub rows: Vec<CostCenterRow>,
}

/// Report derivation service
pub struct Reports<S: LedgerStore> {
    store: S,
}

#[derive(Default)]
struct Movement {
    debits_before: BigDecimal,
    credits_before: BigDecimal,
    debits_in: BigDecimal,
    credits_in: BigDecimal,
}

impl<S: LedgerStore> Reports<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Trial balance for a date range.
    ///
    /// The sum of all debit-nature closing balances must equal the sum of
    /// all credit-nature closing balances after any sequence of successful
    /// postings and reversals.
    pub async fn trial_balance(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<TrialBalance> {
        let accounts = self.store.list_accounts(tenant_id).await?;
        let entries = self.store.list_entries(tenant_id, None, Some(end)).await?;

        let mut movement: HashMap<Uuid, Movement> = HashMap::new();
        for entry in entries.iter().filter(|e| is_applied(e.status)) {
            for line in &entry.lines {
                let m = movement.entry(line.account_id).or_default();
                if entry.date < start {
                    m.debits_before += &line.debit;
                    m.credits_before += &line.credit;
                } else {
                    m.debits_in += &line.debit;
                    m.credits_in += &line.credit;
                }
            }
        }

        let zero = Movement::default();
        let mut rows = Vec::with_capacity(accounts.len());
        let mut total_debit_nature = BigDecimal::from(0);
        let mut total_credit_nature = BigDecimal::from(0);

        for account in accounts {
            let m = movement.get(&account.id).unwrap_or(&zero);
            let (opening, closing) = match account.nature {
                AccountNature::Debit => {
                    let opening =
                        &account.opening_balance + &m.debits_before - &m.credits_before;
                    let closing = &opening + &m.debits_in - &m.credits_in;
                    (opening, closing)
                }
                AccountNature::Credit => {
                    let opening =
                        &account.opening_balance + &m.credits_before - &m.debits_before;
                    let closing = &opening + &m.credits_in - &m.debits_in;
                    (opening, closing)
                }
            };

            match account.nature {
                AccountNature::Debit => total_debit_nature += &closing,
                AccountNature::Credit => total_credit_nature += &closing,
            }

            rows.push(TrialBalanceRow {
                account_id: account.id,
                code: account.code,
                name: account.name,
                nature: account.nature,
                opening,
                debits: m.debits_in.clone(),
                credits: m.credits_in.clone(),
                closing,
            });
        }

        rows.sort_by(|a, b| a.code.cmp(&b.code));
        let is_balanced = total_debit_nature == total_credit_nature;

        Ok(TrialBalance {
            tenant_id: tenant_id.to_string(),
            start,
            end,
            rows,
            total_debit_nature,
            total_credit_nature,
            is_balanced,
        })
    }

    /// Chronological posted-line detail for one account, with running
    /// balance.
    pub async fn general_ledger(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> LedgerResult<GeneralLedger> {
        let account = self
            .store
            .get_account(account_id)
            .await?
            .ok_or_else(|| LedgerError::UnknownAccount(account_id.to_string()))?;

        let entries = self
            .store
            .list_entries(&account.tenant_id, None, end)
            .await?;

        let mut opening = account.opening_balance.clone();
        let mut lines = Vec::new();
        for entry in entries.iter().filter(|e| is_applied(e.status)) {
            for line in entry.lines.iter().filter(|l| l.account_id == account_id) {
                let in_range = start.is_none_or(|s| entry.date >= s);
                if !in_range {
                    match account.nature {
                        AccountNature::Debit => opening += &line.debit - &line.credit,
                        AccountNature::Credit => opening += &line.credit - &line.debit,
                    }
                    continue;
                }
                lines.push((entry, line));
            }
        }

        let mut running = opening.clone();
        let lines: Vec<GeneralLedgerLine> = lines
            .into_iter()
            .map(|(entry, line)| {
                match account.nature {
                    AccountNature::Debit => running += &line.debit - &line.credit,
                    AccountNature::Credit => running += &line.credit - &line.debit,
                }
                GeneralLedgerLine {
                    date: entry.date,
                    entry_id: entry.id,
                    entry_number: entry.display_number(),
                    description: line
                        .description
                        .clone()
                        .unwrap_or_else(|| entry.description.clone()),
                    debit: line.debit.clone(),
                    credit: line.credit.clone(),
                    running_balance: running.clone(),
                }
            })
            .collect();

        Ok(GeneralLedger {
            account_id,
            code: account.code,
            name: account.name,
            nature: account.nature,
            start,
            end,
            opening,
            closing: running,
            lines,
        })
    }

    /// Income statement: credit-nature net movement (revenue-like) against
    /// debit-nature net movement (expense-like) over the range.
    pub async fn income_statement(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<IncomeStatement> {
        let accounts = self.store.list_accounts(tenant_id).await?;
        let entries = self
            .store
            .list_entries(tenant_id, Some(start), Some(end))
            .await?;

        let mut movement: HashMap<Uuid, (BigDecimal, BigDecimal)> = HashMap::new();
        for entry in entries.iter().filter(|e| is_applied(e.status)) {
            for line in &entry.lines {
                let (debits, credits) = movement.entry(line.account_id).or_default();
                *debits += &line.debit;
                *credits += &line.credit;
            }
        }

        let zero = BigDecimal::from(0);
        let mut revenue = Vec::new();
        let mut expenses = Vec::new();
        let mut total_revenue = BigDecimal::from(0);
        let mut total_expenses = BigDecimal::from(0);

        for account in accounts {
            let Some((debits, credits)) = movement.get(&account.id) else {
                continue;
            };
            match account.nature {
                AccountNature::Credit => {
                    let amount = credits - debits;
                    if amount != zero {
                        total_revenue += &amount;
                        revenue.push(StatementLine {
                            account_id: account.id,
                            code: account.code,
                            name: account.name,
                            amount,
                        });
                    }
                }
                AccountNature::Debit => {
                    let amount = debits - credits;
                    if amount != zero {
                        total_expenses += &amount;
                        expenses.push(StatementLine {
                            account_id: account.id,
                            code: account.code,
                            name: account.name,
                            amount,
                        });
                    }
                }
            }
        }

        revenue.sort_by(|a, b| a.code.cmp(&b.code));
        expenses.sort_by(|a, b| a.code.cmp(&b.code));
        let net = &total_revenue - &total_expenses;

        Ok(IncomeStatement {
            tenant_id: tenant_id.to_string(),
            start,
            end,
            revenue,
            expenses,
            total_revenue,
            total_expenses,
            net,
        })
    }

    /// Balance sheet as of a date, partitioned by account nature.
    pub async fn balance_sheet(
        &self,
        tenant_id: &str,
        as_of: NaiveDate,
    ) -> LedgerResult<BalanceSheet> {
        let epoch = NaiveDate::MIN;
        let trial = self.trial_balance(tenant_id, epoch, as_of).await?;

        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut total_assets = BigDecimal::from(0);
        let mut total_liabilities = BigDecimal::from(0);

        for row in trial.rows {
            let line = StatementLine {
                account_id: row.account_id,
                code: row.code,
                name: row.name,
                amount: row.closing.clone(),
            };
            match row.nature {
                AccountNature::Debit => {
                    total_assets += &row.closing;
                    assets.push(line);
                }
                AccountNature::Credit => {
                    total_liabilities += &row.closing;
                    liabilities.push(line);
                }
            }
        }

        let net_position = &total_assets - &total_liabilities;
        Ok(BalanceSheet {
            tenant_id: tenant_id.to_string(),
            as_of,
            assets,
            liabilities,
            total_assets,
            total_liabilities,
            net_position,
        })
    }

    /// Counts and totals for dashboard consumers.
    pub async fn dashboard(&self, tenant_id: &str) -> LedgerResult<DashboardSummary> {
        let accounts = self.store.list_accounts(tenant_id).await?;
        let entries = self.store.list_entries(tenant_id, None, None).await?;
        let periods = self.store.list_periods(tenant_id).await?;

        let mut draft_entries = 0;
        let mut posted_entries = 0;
        let mut reversed_entries = 0;
        let mut total_posted_debits = BigDecimal::from(0);
        let mut total_posted_credits = BigDecimal::from(0);
        for entry in &entries {
            match entry.status {
                EntryStatus::Draft => draft_entries += 1,
                EntryStatus::Posted => posted_entries += 1,
                EntryStatus::Reversed => reversed_entries += 1,
            }
            if is_applied(entry.status) {
                total_posted_debits += entry.total_debits();
                total_posted_credits += entry.total_credits();
            }
        }

        Ok(DashboardSummary {
            tenant_id: tenant_id.to_string(),
            account_count: accounts.len(),
            active_account_count: accounts.iter().filter(|a| a.active).count(),
            draft_entries,
            posted_entries,
            reversed_entries,
            total_posted_debits,
            total_posted_credits,
            open_periods: periods.iter().filter(|p| p.is_open()).count(),
            closed_periods: periods.iter().filter(|p| !p.is_open()).count(),
        })
    }

    /// Posted activity per cost center over a range.
    pub async fn cost_center_summary(
        &self,
        tenant_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<CostCenterSummary> {
        let cost_centers = self.store.list_cost_centers(tenant_id).await?;
        let entries = self
            .store
            .list_entries(tenant_id, Some(start), Some(end))
            .await?;

        let mut movement: HashMap<Uuid, (BigDecimal, BigDecimal)> = HashMap::new();
        for entry in entries.iter().filter(|e| is_applied(e.status)) {
            for line in &entry.lines {
                if let Some(cc_id) = line.cost_center_id {
                    let (debits, credits) = movement.entry(cc_id).or_default();
                    *debits += &line.debit;
                    *credits += &line.credit;
                }
            }
        }

        let mut rows: Vec<CostCenterRow> = cost_centers
            .into_iter()
            .filter_map(|cc| {
                movement.get(&cc.id).map(|(debits, credits)| CostCenterRow {
                    cost_center_id: cc.id,
                    code: cc.code,
                    name: cc.name,
                    debits: debits.clone(),
                    credits: credits.clone(),
                    net: debits - credits,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        Ok(CostCenterSummary {
            tenant_id: tenant_id.to_string(),
            start,
            end,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::{AccountRegistry, AccountSpec};
    use crate::ledger::entry::EntryBuilder;
    use crate::ledger::period::PeriodManager;
    use crate::ledger::posting::PostingEngine;
    use crate::utils::memory_store::MemoryStore;

    struct Fixture {
        store: MemoryStore,
        cash: Uuid,
        fuel: Uuid,
        revenue: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let mut accounts = AccountRegistry::new(store.clone());
        let cash = accounts
            .create_account(AccountSpec::new("t1", "1000", "Cash", AccountNature::Debit))
            .await
            .unwrap();
        let fuel = accounts
            .create_account(AccountSpec::new("t1", "5100", "Diesel Expense", AccountNature::Debit))
            .await
            .unwrap();
        let revenue = accounts
            .create_account(AccountSpec::new("t1", "4000", "Energy Sales", AccountNature::Credit))
            .await
            .unwrap();
        let mut periods = PeriodManager::new(store.clone());
        periods
            .create_period(
                "t1".to_string(),
                2024,
                1,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();
        Fixture {
            store,
            cash: cash.id,
            fuel: fuel.id,
            revenue: revenue.id,
        }
    }

    async fn post(f: &Fixture, day: u32, lines: Vec<JournalLine>, desc: &str) -> JournalEntry {
        let mut builder = EntryBuilder::new(f.store.clone());
        let entry = builder
            .build_draft(
                "t1".to_string(),
                lines,
                EntryMetadata {
                    date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    kind: EntryKind::System,
                    description: desc.to_string(),
                    source_ref: None,
                    created_by: "system".to_string(),
                },
            )
            .await
            .unwrap();
        PostingEngine::new(f.store.clone())
            .post(entry.id, "system")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn trial_balance_balances_and_ignores_drafts() {
        let f = fixture().await;
        post(
            &f,
            5,
            vec![
                JournalLine::debit(f.cash, BigDecimal::from(1000)),
                JournalLine::credit(f.revenue, BigDecimal::from(1000)),
            ],
            "Energy billing",
        )
        .await;
        post(
            &f,
            10,
            vec![
                JournalLine::debit(f.fuel, BigDecimal::from(300)),
                JournalLine::credit(f.cash, BigDecimal::from(300)),
            ],
            "Diesel purchase",
        )
        .await;

        // a draft must not show up anywhere
        let mut builder = EntryBuilder::new(f.store.clone());
        builder
            .build_draft(
                "t1".to_string(),
                vec![
                    JournalLine::debit(f.cash, BigDecimal::from(999)),
                    JournalLine::credit(f.revenue, BigDecimal::from(999)),
                ],
                EntryMetadata {
                    date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                    kind: EntryKind::Manual,
                    description: "Pending".to_string(),
                    source_ref: None,
                    created_by: "ops".to_string(),
                },
            )
            .await
            .unwrap();

        let reports = Reports::new(f.store.clone());
        let tb = reports
            .trial_balance(
                "t1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert!(tb.is_balanced);
        assert_eq!(tb.total_debit_nature, BigDecimal::from(1000));
        assert_eq!(tb.total_credit_nature, BigDecimal::from(1000));

        // rows ordered by code: 1000, 4000, 5100
        let codes: Vec<&str> = tb.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "4000", "5100"]);
        assert_eq!(tb.rows[0].closing, BigDecimal::from(700));
        assert_eq!(tb.rows[2].closing, BigDecimal::from(300));
    }

    #[tokio::test]
    async fn general_ledger_runs_chronologically() {
        let f = fixture().await;
        post(
            &f,
            5,
            vec![
                JournalLine::debit(f.cash, BigDecimal::from(1000)),
                JournalLine::credit(f.revenue, BigDecimal::from(1000)),
            ],
            "Energy billing",
        )
        .await;
        post(
            &f,
            10,
            vec![
                JournalLine::debit(f.fuel, BigDecimal::from(300)),
                JournalLine::credit(f.cash, BigDecimal::from(300)),
            ],
            "Diesel purchase",
        )
        .await;

        let reports = Reports::new(f.store.clone());
        let gl = reports.general_ledger(f.cash, None, None).await.unwrap();

        assert_eq!(gl.lines.len(), 2);
        assert_eq!(gl.lines[0].debit, scaled(BigDecimal::from(1000)));
        assert_eq!(gl.lines[0].running_balance, BigDecimal::from(1000));
        assert_eq!(gl.lines[1].credit, scaled(BigDecimal::from(300)));
        assert_eq!(gl.lines[1].running_balance, BigDecimal::from(700));
        assert_eq!(gl.closing, BigDecimal::from(700));
    }

    #[tokio::test]
    async fn income_statement_and_balance_sheet() {
        let f = fixture().await;
        post(
            &f,
            5,
            vec![
                JournalLine::debit(f.cash, BigDecimal::from(1000)),
                JournalLine::credit(f.revenue, BigDecimal::from(1000)),
            ],
            "Energy billing",
        )
        .await;
        post(
            &f,
            10,
            vec![
                JournalLine::debit(f.fuel, BigDecimal::from(300)),
                JournalLine::credit(f.cash, BigDecimal::from(300)),
            ],
            "Diesel purchase",
        )
        .await;

        let reports = Reports::new(f.store.clone());
        let is = reports
            .income_statement(
                "t1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(is.total_revenue, BigDecimal::from(1000));
        // cash movement nets to 700 debit, fuel to 300; both are debit-nature
        assert_eq!(is.total_expenses, BigDecimal::from(1000));
        assert_eq!(is.net, BigDecimal::from(0));
        assert_eq!(is.revenue.len(), 1);
        assert_eq!(is.revenue[0].code, "4000");

        let bs = reports
            .balance_sheet("t1", NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            .await
            .unwrap();
        assert_eq!(bs.total_assets, BigDecimal::from(1000));
        assert_eq!(bs.total_liabilities, BigDecimal::from(1000));
        assert_eq!(bs.net_position, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn cost_center_summary_aggregates_tagged_lines() {
        let f = fixture().await;
        let mut cc_registry =
            crate::ledger::cost_center::CostCenterRegistry::new(f.store.clone());
        let depot = cc_registry
            .create_cost_center("t1".to_string(), "CC-100".to_string(), "North Depot".to_string(), None)
            .await
            .unwrap();

        post(
            &f,
            10,
            vec![
                JournalLine::debit(f.fuel, BigDecimal::from(300)).with_cost_center(depot.id),
                JournalLine::credit(f.cash, BigDecimal::from(300)),
            ],
            "Diesel purchase",
        )
        .await;

        let reports = Reports::new(f.store.clone());
        let summary = reports
            .cost_center_summary(
                "t1",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].code, "CC-100");
        assert_eq!(summary.rows[0].debits, BigDecimal::from(300));
        assert_eq!(summary.rows[0].net, BigDecimal::from(300));
    }

    #[tokio::test]
    async fn dashboard_counts_by_status() {
        let f = fixture().await;
        post(
            &f,
            5,
            vec![
                JournalLine::debit(f.cash, BigDecimal::from(1000)),
                JournalLine::credit(f.revenue, BigDecimal::from(1000)),
            ],
            "Energy billing",
        )
        .await;

        let mut builder = EntryBuilder::new(f.store.clone());
        builder
            .build_draft(
                "t1".to_string(),
                vec![
                    JournalLine::debit(f.cash, BigDecimal::from(50)),
                    JournalLine::credit(f.revenue, BigDecimal::from(50)),
                ],
                EntryMetadata {
                    date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                    kind: EntryKind::Manual,
                    description: "Pending".to_string(),
                    source_ref: None,
                    created_by: "ops".to_string(),
                },
            )
            .await
            .unwrap();

        let reports = Reports::new(f.store.clone());
        let dash = reports.dashboard("t1").await.unwrap();
        assert_eq!(dash.account_count, 3);
        assert_eq!(dash.posted_entries, 1);
        assert_eq!(dash.draft_entries, 1);
        assert_eq!(dash.reversed_entries, 0);
        assert_eq!(dash.total_posted_debits, BigDecimal::from(1000));
        assert_eq!(dash.open_periods, 1);
    }
}
