//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! synchronization core.

// Upstream connection defaults
pub const DEFAULT_BASE_URL: &str = "https://api.adp.com/";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.adp.com/auth/oauth/v2/token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Pagination ($skip / $top)
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

// Upstream allows ten requests per second per account
pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 100;

// Hierarchical expansion
pub const DEFAULT_CONCURRENCY: usize = 1;
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

// Entity names used in logs and pass reports
pub const ENTITY_WORKERS: &str = "workers";
pub const ENTITY_FEDERAL_TAX_PROFILES: &str = "federal_tax_profiles";
pub const ENTITY_STATE_TAX_PROFILES: &str = "state_tax_profiles";
pub const ENTITY_LOCAL_TAX_PROFILES: &str = "local_tax_profiles";
pub const ENTITY_TIME_CARDS: &str = "time_cards";
pub const ENTITY_LABOR_CHARGE_CODES: &str = "labor_charge_codes";
