/// Maximum number of ERP companies the registry accepts
pub const MAX_COMPANIES: usize = 5;

/// Source identifier used for the external customer directory
pub const CUSTOMER_DIRECTORY_SOURCE: &str = "customer-directory";

/// Key under which the bank screen filter is persisted
pub const BANK_FILTER_STORAGE_KEY: &str = "filters.bank";

/// Key under which the receivables screen filter is persisted
pub const BALANCE_FILTER_STORAGE_KEY: &str = "filters.cari";

/// Default business timezone for date presets and the fiscal year
pub const DEFAULT_BUSINESS_TZ_NAME: &str = "Europe/Istanbul";
