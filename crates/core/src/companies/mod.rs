//! Company registry - the fixed set of ERP companies queried by the engine.

mod companies_model;

pub use companies_model::{Company, CompanyRegistry};
