//! Journal entry construction and validation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::traits::LedgerStore;
use crate::types::*;
use crate::utils::validation;

/// Check line shape: at least two lines, every amount non-negative, exactly
/// one side non-zero per line. Placeholder lines (both sides zero) are
/// rejected.
pub(crate) fn check_lines(lines: &[JournalLine]) -> LedgerResult<()> {
    if lines.len() < 2 {
        return Err(LedgerError::InvalidEntry(
            "an entry needs at least two lines to balance".to_string(),
        ));
    }

    let zero = BigDecimal::from(0);
    for (idx, line) in lines.iter().enumerate() {
        if line.debit < zero || line.credit < zero {
            return Err(LedgerError::InvalidEntry(format!(
                "line {} has a negative amount",
                idx + 1
            )));
        }
        match (line.debit == zero, line.credit == zero) {
            (true, true) => {
                return Err(LedgerError::InvalidEntry(format!(
                    "line {} has neither a debit nor a credit",
                    idx + 1
                )))
            }
            (false, false) => {
                return Err(LedgerError::InvalidEntry(format!(
                    "line {} carries both a debit and a credit",
                    idx + 1
                )))
            }
            _ => {}
        }
    }
    Ok(())
}

/// Check that every referenced account exists, is active, and belongs to
/// the tenant; likewise for cost-center tags.
pub(crate) async fn check_references<S: LedgerStore>(
    store: &S,
    tenant_id: &str,
    lines: &[JournalLine],
) -> LedgerResult<()> {
    for line in lines {
        let account = store
            .get_account(line.account_id)
            .await?
            .ok_or_else(|| LedgerError::UnknownAccount(line.account_id.to_string()))?;
        if account.tenant_id != tenant_id {
            return Err(LedgerError::UnknownAccount(line.account_id.to_string()));
        }
        if !account.active {
            return Err(LedgerError::InactiveAccount(account.code));
        }

        if let Some(cc_id) = line.cost_center_id {
            let cost_center = store
                .get_cost_center(cc_id)
                .await?
                .ok_or_else(|| LedgerError::UnknownCostCenter(cc_id.to_string()))?;
            if cost_center.tenant_id != tenant_id {
                return Err(LedgerError::UnknownCostCenter(cc_id.to_string()));
            }
            if !cost_center.active {
                return Err(LedgerError::Validation(format!(
                    "cost center '{}' is inactive",
                    cost_center.code
                )));
            }
        }
    }
    Ok(())
}

/// Check exact debit/credit equality across the lines.
pub(crate) fn check_balance(lines: &[JournalLine]) -> LedgerResult<()> {
    let debits: BigDecimal = lines.iter().map(|l| &l.debit).sum();
    let credits: BigDecimal = lines.iter().map(|l| &l.credit).sum();
    if debits != credits {
        return Err(LedgerError::UnbalancedEntry { debits, credits });
    }
    Ok(())
}

/// Resolve the open fiscal period containing the given date.
pub(crate) async fn check_period<S: LedgerStore>(
    store: &S,
    tenant_id: &str,
    date: NaiveDate,
) -> LedgerResult<FiscalPeriod> {
    let period = store
        .find_period_by_date(tenant_id, date)
        .await?
        .ok_or_else(|| LedgerError::NoPeriodForDate {
            tenant_id: tenant_id.to_string(),
            date,
        })?;
    if !period.is_open() {
        return Err(LedgerError::ClosedPeriod {
            period_id: period.id,
            date,
        });
    }
    Ok(period)
}

/// Run the full validation chain, fail-fast, first violation reported:
/// line shape, account/cost-center references, balance, open period.
pub(crate) async fn validate_draft<S: LedgerStore>(
    store: &S,
    tenant_id: &str,
    lines: &[JournalLine],
    date: NaiveDate,
) -> LedgerResult<FiscalPeriod> {
    check_lines(lines)?;
    check_references(store, tenant_id, lines).await?;
    check_balance(lines)?;
    check_period(store, tenant_id, date).await
}

/// Builds and maintains draft journal entries.
///
/// Nothing is persisted until a candidate entry passes the full validation
/// chain; a rejected draft leaves no partial state behind.
pub struct EntryBuilder<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> EntryBuilder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Construct and persist a draft entry from caller-supplied lines.
    pub async fn build_draft(
        &mut self,
        tenant_id: String,
        lines: Vec<JournalLine>,
        metadata: EntryMetadata,
    ) -> LedgerResult<JournalEntry> {
        validation::validate_description(&metadata.description)?;
        let period = validate_draft(&self.store, &tenant_id, &lines, metadata.date).await?;
        let number = self.store.next_entry_number(&tenant_id).await?;

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            tenant_id,
            number,
            date: metadata.date,
            period_id: period.id,
            kind: metadata.kind,
            description: metadata.description,
            source_ref: metadata.source_ref,
            status: EntryStatus::Draft,
            lines,
            reverses: None,
            reversed_by: None,
            created_by: metadata.created_by,
            posted_by: None,
            created_at: chrono::Utc::now().naive_utc(),
            posted_at: None,
        };
        self.store.save_entry(&entry).await?;
        Ok(entry)
    }

    /// Replace a draft's lines wholesale and re-run full validation.
    pub async fn update_draft(
        &mut self,
        entry_id: Uuid,
        lines: Vec<JournalLine>,
    ) -> LedgerResult<JournalEntry> {
        let mut entry = self.get_entry_required(entry_id).await?;
        match entry.status {
            EntryStatus::Draft => {}
            EntryStatus::Posted => return Err(LedgerError::AlreadyPosted(entry_id)),
            EntryStatus::Reversed => {
                return Err(LedgerError::InvalidState {
                    entry_id,
                    expected: EntryStatus::Draft,
                    found: EntryStatus::Reversed,
                })
            }
        }

        validate_draft(&self.store, &entry.tenant_id, &lines, entry.date).await?;
        entry.lines = lines;
        self.store.update_entry(&entry).await?;
        Ok(entry)
    }

    /// Discard a draft with no side effects.
    pub async fn discard_draft(&mut self, entry_id: Uuid) -> LedgerResult<()> {
        let entry = self.get_entry_required(entry_id).await?;
        match entry.status {
            EntryStatus::Draft => self.store.delete_entry(entry_id).await,
            found => Err(LedgerError::InvalidState {
                entry_id,
                expected: EntryStatus::Draft,
                found,
            }),
        }
    }

    /// Get an entry by ID
    pub async fn get_entry(&self, entry_id: Uuid) -> LedgerResult<Option<JournalEntry>> {
        self.store.get_entry(entry_id).await
    }

    /// Get an entry by ID, erroring when absent
    pub async fn get_entry_required(&self, entry_id: Uuid) -> LedgerResult<JournalEntry> {
        self.store
            .get_entry(entry_id)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))
    }

    /// List a tenant's entries within an optional date range
    pub async fn list_entries(
        &self,
        tenant_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<JournalEntry>> {
        self.store.list_entries(tenant_id, start_date, end_date).await
    }
}
