//! Abacus History
//!
//! The four built-in operations, the `Calculation` value they act on and
//! the in-memory history store with CSV persistence.

mod calculation;
mod error;
mod operation;
mod row;
mod store;

pub use calculation::Calculation;
pub use error::{StorageError, StorageResult};
pub use operation::{add, divide, multiply, subtract, Operation};
pub use row::{HistoryRow, COLUMNS};
pub use store::{HistoryStats, HistoryStore, DEFAULT_HISTORY_FILE};
