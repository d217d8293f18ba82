//! Aging module - ERP receivable aging records and their sources.

mod aging_model;
mod aging_traits;

pub use aging_model::{AccountName, AgingRecord, CompanyAging, CustomerName};
pub use aging_traits::{AgingRepositoryTrait, CustomerDirectoryTrait};
