//! Application-wide constants

/// Form and storage date format (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MONTHLY_TERM_DAYS: i64 = 30;
pub const YEARLY_TERM_DAYS: i64 = 365;

/// Window used by the platform dashboard to list contracts about to lapse.
pub const EXPIRING_SOON_DAYS: i64 = 30;
pub const RECENT_COMPANIES_LIMIT: i64 = 5;

// Employee form fallbacks
pub const DEFAULT_BASE_WAGE: i64 = 0;
pub const DEFAULT_TRANSPORTATION_ALLOWANCE: i64 = 0;
pub const DEFAULT_STANDARD_WORKING_HOURS: f64 = 8.0;
pub const DEFAULT_STANDARD_WORKING_DAYS: i64 = 5;

pub const SESSION_COOKIE: &str = "roster_session";
pub const FLASH_COOKIE: &str = "roster_flash";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 43_200;
