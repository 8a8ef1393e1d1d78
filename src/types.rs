//! Core types and data structures for the ledger engine

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of fractional digits carried by every ledger amount.
///
/// Amounts are fixed-point decimals; comparisons are exact, never
/// tolerance-based.
pub const AMOUNT_SCALE: i64 = 2;

/// Normalize an amount to the ledger scale.
pub fn scaled(amount: BigDecimal) -> BigDecimal {
    amount.with_scale_round(AMOUNT_SCALE, RoundingMode::HalfUp)
}

/// Which side of the ledger increases an account's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountNature {
    /// Balance grows on the debit side (asset-like, expense-like accounts)
    Debit,
    /// Balance grows on the credit side (liability-like, revenue-like accounts)
    Credit,
}

/// Account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: String,
    /// Unique (per tenant) sortable code used for statement ordering
    pub code: String,
    /// Human-readable account name
    pub name: String,
    /// Debit or credit nature
    pub nature: AccountNature,
    /// Optional parent for hierarchical chart of accounts
    pub parent_id: Option<Uuid>,
    /// Balance carried in at account creation
    pub opening_balance: BigDecimal,
    /// Current running balance, maintained by the posting engine
    pub balance: BigDecimal,
    /// Inactive accounts cannot appear on new entries
    pub active: bool,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new active account with the given opening balance.
    pub fn new(
        tenant_id: String,
        code: String,
        name: String,
        nature: AccountNature,
        parent_id: Option<Uuid>,
        opening_balance: BigDecimal,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let opening = scaled(opening_balance);
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            code,
            name,
            nature,
            parent_id,
            balance: opening.clone(),
            opening_balance: opening,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a posted debit/credit pair to the running balance.
    ///
    /// Restricted to the crate: the posting engine is the sole mutation
    /// path for balances.
    pub(crate) fn apply_delta(&mut self, debit: &BigDecimal, credit: &BigDecimal) {
        match self.nature {
            AccountNature::Debit => self.balance += debit - credit,
            AccountNature::Credit => self.balance += credit - debit,
        }
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Journal entry lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Editable, not yet applied to any balance
    Draft,
    /// Applied to balances; immutable
    Posted,
    /// Posted and cancelled by a mirror entry; lines untouched
    Reversed,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Draft => write!(f, "draft"),
            EntryStatus::Posted => write!(f, "posted"),
            EntryStatus::Reversed => write!(f, "reversed"),
        }
    }
}

/// Origin of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Keyed in by a person
    Manual,
    /// Period-end adjustment
    Adjustment,
    /// Produced by a collaborating module (billing, payroll, diesel, field ops)
    System,
    /// Mirror entry generated by the reversal engine
    Reversal,
}

/// Single debit-or-credit line inside a journal entry.
///
/// Lines have no identity outside their entry; exactly one of `debit` and
/// `credit` is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account being affected
    pub account_id: Uuid,
    /// Debit amount (>= 0)
    pub debit: BigDecimal,
    /// Credit amount (>= 0)
    pub credit: BigDecimal,
    /// Optional cost-center tag
    pub cost_center_id: Option<Uuid>,
    /// Optional description for this specific line
    pub description: Option<String>,
}

impl JournalLine {
    /// Create a debit line
    pub fn debit(account_id: Uuid, amount: BigDecimal) -> Self {
        Self {
            account_id,
            debit: scaled(amount),
            credit: BigDecimal::from(0),
            cost_center_id: None,
            description: None,
        }
    }

    /// Create a credit line
    pub fn credit(account_id: Uuid, amount: BigDecimal) -> Self {
        Self {
            account_id,
            debit: BigDecimal::from(0),
            credit: scaled(amount),
            cost_center_id: None,
            description: None,
        }
    }

    /// Attach a cost-center tag
    pub fn with_cost_center(mut self, cost_center_id: Uuid) -> Self {
        self.cost_center_id = Some(cost_center_id);
        self
    }

    /// Attach a line description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A line with swapped debit and credit, used for reversals.
    pub fn mirrored(&self) -> Self {
        Self {
            account_id: self.account_id,
            debit: self.credit.clone(),
            credit: self.debit.clone(),
            cost_center_id: self.cost_center_id,
            description: self.description.clone(),
        }
    }
}

/// Caller-supplied metadata for a new journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Accounting date of the entry
    pub date: NaiveDate,
    /// Origin of the entry
    pub kind: EntryKind,
    /// Business-meaningful description
    pub description: String,
    /// Opaque reference into the producing module (invoice id, payroll run, ...)
    pub source_ref: Option<String>,
    /// Who created the entry
    pub created_by: String,
}

/// Balanced set of journal lines recorded as one accounting event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: String,
    /// Sequential human-readable number, per tenant
    pub number: u64,
    /// Accounting date
    pub date: NaiveDate,
    /// Fiscal period the date falls into at creation time
    pub period_id: Uuid,
    /// Origin of the entry
    pub kind: EntryKind,
    /// Business-meaningful description
    pub description: String,
    /// Opaque traceability reference supplied by the producing module
    pub source_ref: Option<String>,
    /// Lifecycle status
    pub status: EntryStatus,
    /// Ordered lines; owned exclusively by this entry
    pub lines: Vec<JournalLine>,
    /// For a reversal entry, the entry it cancels
    pub reverses: Option<Uuid>,
    /// For a reversed entry, the mirror entry that cancelled it
    pub reversed_by: Option<Uuid>,
    /// Who created the entry
    pub created_by: String,
    /// Who posted the entry
    pub posted_by: Option<String>,
    /// When the entry was created
    pub created_at: NaiveDateTime,
    /// When the entry was posted
    pub posted_at: Option<NaiveDateTime>,
}

impl JournalEntry {
    /// Total of all debit amounts
    pub fn total_debits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.debit).sum()
    }

    /// Total of all credit amounts
    pub fn total_credits(&self) -> BigDecimal {
        self.lines.iter().map(|l| &l.credit).sum()
    }

    /// Whether debits equal credits exactly
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }

    /// Human-readable entry reference, e.g. `JE-000042`
    pub fn display_number(&self) -> String {
        format!("JE-{:06}", self.number)
    }
}

/// Fiscal period gating status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodStatus {
    /// Entries dated inside the period may be posted
    Open,
    /// Posting and reversal into the period are blocked
    Closed,
}

/// Bounded accounting date range that gates posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: String,
    /// Fiscal year
    pub year: i32,
    /// Period number within the year (e.g. month index)
    pub period_no: u32,
    /// First date of the period, inclusive
    pub start: NaiveDate,
    /// Last date of the period, inclusive
    pub end: NaiveDate,
    /// Open or closed
    pub status: PeriodStatus,
    /// Who closed the period, if closed
    pub closed_by: Option<String>,
    /// When the period was closed, if closed
    pub closed_at: Option<NaiveDateTime>,
}

impl FiscalPeriod {
    /// Create a new open period
    pub fn new(
        tenant_id: String,
        year: i32,
        period_no: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            year,
            period_no,
            start,
            end,
            status: PeriodStatus::Open,
            closed_by: None,
            closed_at: None,
        }
    }

    /// Whether the given date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the period accepts postings
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Whether this period's date range overlaps another's
    pub fn overlaps(&self, other: &FiscalPeriod) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Cost attribution tag attachable to any journal line.
///
/// Carries no balance of its own; balance-by-cost-center is a derived report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: String,
    /// Unique (per tenant) code
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Optional parent for hierarchical cost centers
    pub parent_id: Option<Uuid>,
    /// Inactive cost centers cannot appear on new entries
    pub active: bool,
}

impl CostCenter {
    /// Create a new active cost center
    pub fn new(tenant_id: String, code: String, name: String, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            code,
            name,
            parent_id,
            active: true,
        }
    }
}

/// Errors that can occur in the ledger engine
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid account: {0}")]
    InvalidAccount(String),
    #[error("unknown account: {0}")]
    UnknownAccount(String),
    #[error("account '{0}' is inactive")]
    InactiveAccount(String),
    #[error("unknown cost center: {0}")]
    UnknownCostCenter(String),
    #[error("entry is not balanced: debits = {debits}, credits = {credits}")]
    UnbalancedEntry {
        debits: BigDecimal,
        credits: BigDecimal,
    },
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
    #[error("no fiscal period covers {date} for tenant '{tenant_id}'")]
    NoPeriodForDate { tenant_id: String, date: NaiveDate },
    #[error("fiscal period {period_id} is closed; cannot post on {date}")]
    ClosedPeriod { period_id: Uuid, date: NaiveDate },
    #[error("journal entry not found: {0}")]
    EntryNotFound(Uuid),
    #[error("fiscal period not found: {0}")]
    PeriodNotFound(Uuid),
    #[error("entry {0} is already posted")]
    AlreadyPosted(Uuid),
    #[error("entry {0} is already reversed")]
    AlreadyReversed(Uuid),
    #[error("entry {entry_id} is {found}, expected {expected}")]
    InvalidState {
        entry_id: Uuid,
        expected: EntryStatus,
        found: EntryStatus,
    },
    #[error("account '{0}' still carries a balance and cannot be deactivated")]
    AccountInUse(String),
    #[error("fiscal period {0} still has draft entries referencing it")]
    HasDraftEntries(Uuid),
    #[error("concurrent modification: {0}")]
    ConcurrentModification(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
