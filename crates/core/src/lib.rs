//! Cari Core - cross-company receivable consolidation and bank reconciliation.
//!
//! This crate merges accounts-receivable aging data from several ERP company
//! databases into one per-customer view, summarizes bank cash flow per bank
//! account, and tracks the reconciliation status of bank transactions.
//! It is transport-agnostic: ERP, bank and storage access are defined as
//! traits implemented by the host application.

pub mod aging;
pub mod balances;
pub mod bank;
pub mod cache;
pub mod companies;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod names;
pub mod refresh;
pub mod utils;

pub use config::EngineConfig;
pub use refresh::{refresh_all, RefreshReport};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
