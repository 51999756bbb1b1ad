//! spendlens-ingest: read bank exports, the exemption list and the mapping
//! sheet from disk and assemble a ledger.

pub mod exemptions;
pub mod loader;
pub mod mapping;
pub mod transactions;

pub use exemptions::read_exemptions;
pub use loader::{load_ledger, LoadOptions, LoadSummary, Sources};
pub use mapping::{parse_mapping, read_mapping_csv};
pub use transactions::{parse_transactions, read_transactions_csv};
