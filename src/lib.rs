//! MultiSwap - swap several Solana tokens into one
//!
//! Wallet balances come from a DAS indexer, quotes and transactions from the
//! MultiSwap backend; this crate values, selects and signs.

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;
pub mod report;

// Re-export main types for convenience
pub use application::session::SwapSession;
pub use domain::catalog::TokenCatalog;
pub use domain::projection::{project, AssetView};
pub use domain::selection::Selection;
pub use report::SwapReport;
