//! Reversal engine: cancels a posted entry with a mirror entry

use uuid::Uuid;

use crate::ledger::entry::EntryBuilder;
use crate::ledger::posting::PostingEngine;
use crate::traits::LedgerStore;
use crate::types::*;

/// Generates and posts mirror entries that cancel a posted entry's effect
/// without mutating the original.
///
/// The mirror entry is dated at reversal time, never backdated, so reversing
/// an entry whose period has since closed still works: the reversal posts
/// into whichever period is open today.
pub struct ReversalEngine<S: LedgerStore + Clone> {
    store: S,
}

impl<S: LedgerStore + Clone> ReversalEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reverse a posted entry.
    ///
    /// Builds a draft whose lines are the original's with debit and credit
    /// swapped, validates and prepares it through the ordinary build/post
    /// path, then commits the reversal posting and the original's flip to
    /// reversed as one atomic unit. An entry can be reversed at most once.
    pub async fn reverse(
        &mut self,
        entry_id: Uuid,
        actor: &str,
        reason: &str,
    ) -> LedgerResult<JournalEntry> {
        let mut original = self
            .store
            .get_entry(entry_id)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        match original.status {
            EntryStatus::Posted => {}
            EntryStatus::Reversed => return Err(LedgerError::AlreadyReversed(entry_id)),
            EntryStatus::Draft => {
                return Err(LedgerError::InvalidState {
                    entry_id,
                    expected: EntryStatus::Posted,
                    found: EntryStatus::Draft,
                })
            }
        }

        let mirror_lines: Vec<JournalLine> =
            original.lines.iter().map(JournalLine::mirrored).collect();

        let mut builder = EntryBuilder::new(self.store.clone());
        let mut reversal = builder
            .build_draft(
                original.tenant_id.clone(),
                mirror_lines,
                EntryMetadata {
                    date: chrono::Utc::now().date_naive(),
                    kind: EntryKind::Reversal,
                    description: format!(
                        "Reversal of {}: {}",
                        original.display_number(),
                        reason
                    ),
                    source_ref: original.source_ref.clone(),
                    created_by: actor.to_string(),
                },
            )
            .await?;
        reversal.reverses = Some(original.id);
        self.store.update_entry(&reversal).await?;

        let engine = PostingEngine::new(self.store.clone());
        let posted_reversal = match engine.prepare(reversal.id, actor).await {
            Ok(prepared) => prepared,
            Err(err) => {
                // no half-reversed state: drop the mirror draft on failure
                self.store.delete_entry(reversal.id).await?;
                return Err(err);
            }
        };

        original.status = EntryStatus::Reversed;
        original.reversed_by = Some(posted_reversal.id);

        if let Err(err) = self
            .store
            .commit_reversal(&posted_reversal, &original)
            .await
        {
            self.store.delete_entry(reversal.id).await?;
            return Err(err);
        }

        tracing::info!(
            reversal = %posted_reversal.display_number(),
            reversal_id = %posted_reversal.id,
            original = %original.display_number(),
            original_id = %original.id,
            tenant_id = %original.tenant_id,
            actor = %actor,
            "journal entry reversed"
        );
        Ok(posted_reversal)
    }
}
