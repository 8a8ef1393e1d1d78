//! Posting engine: the sole path that applies entries to account balances

use std::collections::HashSet;

use uuid::Uuid;

use crate::ledger::entry;
use crate::traits::LedgerStore;
use crate::types::*;

/// Atomically transitions a validated draft to posted, applying balance
/// deltas to the touched accounts.
///
/// Posting is all-or-nothing: a failed `post` leaves the entry in draft and
/// every balance untouched, so the caller may retry with the same entry id.
pub struct PostingEngine<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> PostingEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Post a draft entry.
    ///
    /// Re-validates the period and account state at post time (either may
    /// have changed since the draft was built), then commits the status
    /// flip and all balance writes as one unit. The store applies the line
    /// deltas inside that unit, so concurrent posts to the same account
    /// cannot drop each other's updates.
    pub async fn post(&mut self, entry_id: Uuid, actor: &str) -> LedgerResult<JournalEntry> {
        let posted = self.prepare(entry_id, actor).await?;
        self.store.commit_posting(&posted).await?;

        tracing::info!(
            entry = %posted.display_number(),
            entry_id = %posted.id,
            tenant_id = %posted.tenant_id,
            actor = %actor,
            debits = %posted.total_debits(),
            "journal entry posted"
        );
        Ok(posted)
    }

    /// Validate a draft and compute its posted form, without writing
    /// anything. Balance deltas are left to the commit operation, which
    /// applies them to the stored accounts under the store's isolation.
    ///
    /// Shared with the reversal engine, which commits the result together
    /// with the original entry's status flip.
    pub(crate) async fn prepare(
        &self,
        entry_id: Uuid,
        actor: &str,
    ) -> LedgerResult<JournalEntry> {
        let mut entry = self
            .store
            .get_entry(entry_id)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

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

        // Re-validation at post time is mandatory, not optional.
        entry::check_balance(&entry.lines)?;
        entry::check_period(&self.store, &entry.tenant_id, entry.date).await?;

        let mut seen: HashSet<Uuid> = HashSet::new();
        for line in &entry.lines {
            if !seen.insert(line.account_id) {
                continue;
            }
            let account = self
                .store
                .get_account(line.account_id)
                .await?
                .ok_or_else(|| LedgerError::UnknownAccount(line.account_id.to_string()))?;
            if account.tenant_id != entry.tenant_id {
                return Err(LedgerError::UnknownAccount(line.account_id.to_string()));
            }
            if !account.active {
                return Err(LedgerError::InactiveAccount(account.code));
            }
        }

        entry.status = EntryStatus::Posted;
        entry.posted_by = Some(actor.to_string());
        entry.posted_at = Some(chrono::Utc::now().naive_utc());

        Ok(entry)
    }
}
