//! # Ledger Core
//!
//! Double-entry accounting ledger engine: chart of accounts, journal-entry
//! validation and posting, reversals, fiscal-period lifecycle, and derived
//! financial reports.
//!
//! ## Features
//!
//! - **Chart of accounts**: hierarchical, tenant-scoped accounts with a
//!   debit/credit nature and an O(1) running balance
//! - **Journal entries**: draft → posted → reversed lifecycle with strict
//!   balance validation before anything is persisted
//! - **Atomic posting**: balance deltas and the status flip commit as one
//!   all-or-nothing unit; retries can never double-apply
//! - **Reversals**: mirror entries that cancel a posted entry's effect
//!   without rewriting history
//! - **Fiscal periods**: open/close/reopen with audited administrative
//!   actions gating every posting date
//! - **Reporting**: trial balance, general ledger, income statement,
//!   balance sheet, dashboard and cost-center aggregates
//! - **Storage abstraction**: database-agnostic via the [`LedgerStore`]
//!   trait; an in-memory store ships for tests and development
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_core::{
//!     AccountNature, AccountSpec, EntryKind, EntryMetadata, JournalLine, Ledger, MemoryStore,
//! };
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn demo() -> ledger_core::LedgerResult<()> {
//! let mut ledger = Ledger::new(MemoryStore::new());
//! ledger
//!     .create_period(
//!         "acme-power".to_string(),
//!         2024,
//!         1,
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     )
//!     .await?;
//! let cash = ledger
//!     .create_account(AccountSpec::new("acme-power", "1000", "Cash", AccountNature::Debit))
//!     .await?;
//! let sales = ledger
//!     .create_account(AccountSpec::new("acme-power", "4000", "Energy Sales", AccountNature::Credit))
//!     .await?;
//!
//! let draft = ledger
//!     .build_draft(
//!         "acme-power".to_string(),
//!         vec![
//!             JournalLine::debit(cash.id, BigDecimal::from(100)),
//!             JournalLine::credit(sales.id, BigDecimal::from(100)),
//!         ],
//!         EntryMetadata {
//!             date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!             kind: EntryKind::System,
//!             description: "January energy billing".to_string(),
//!             source_ref: Some("invoice-1001".to_string()),
//!             created_by: "billing".to_string(),
//!         },
//!     )
//!     .await?;
//! ledger.post(draft.id, "billing").await?;
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod reports;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use reports::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_store::MemoryStore;
