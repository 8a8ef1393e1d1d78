//! Ledger components: chart of accounts, entry lifecycle, periods, facade

pub mod account;
pub mod core;
pub mod cost_center;
pub mod entry;
pub mod period;
pub mod posting;
pub mod reversal;

pub use account::*;
pub use core::*;
pub use cost_center::*;
pub use entry::EntryBuilder;
pub use period::*;
pub use posting::*;
pub use reversal::*;
