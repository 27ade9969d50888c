//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body size in bytes (1 MiB)
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Default interval between keep-alive database pings (12 hours)
pub const DEFAULT_KEEP_ALIVE_INTERVAL_SECS: u64 = 12 * 60 * 60;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Default session lifetime in hours
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Default session cookie name
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session";

/// Redis key prefix for a single session
pub const SESSION_KEY_PREFIX: &str = "session";

/// Redis key prefix for the set of sessions owned by a user
pub const USER_SESSIONS_KEY_PREFIX: &str = "user_sessions";

/// Default seeded administrator email
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";

/// Default seeded administrator password
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin123!";

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum length of a person's first or last name
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const CONTRIBUTOR: &str = "contributor";
    pub const VIEWER: &str = "viewer";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, CONTRIBUTOR, VIEWER];

    /// Roles allowed to create competitions and students
    pub const EDITORS: &[&str] = &[ADMIN, CONTRIBUTOR];
}

// =============================================================================
// COMPETITION SETTINGS
// =============================================================================

/// Lowest class year a participant can be in
pub const MIN_CLASS_YEAR: i16 = 1;

/// Highest class year a participant can be in
pub const MAX_CLASS_YEAR: i16 = 13;

/// Month (1-based) in which a new school year starts
pub const SCHOOL_YEAR_START_MONTH: u32 = 9;

/// Maximum competition name / location length
pub const MAX_COMPETITION_NAME_LENGTH: u64 = 200;

/// Maximum level / round label length
pub const MAX_LABEL_LENGTH: u64 = 50;

/// Maximum entries in the subject / teacher / form lists
pub const MAX_LIST_ENTRIES: u64 = 20;

/// Maximum length of the free-text note on a competition
pub const MAX_NOTE_LENGTH: u64 = 2000;

// =============================================================================
// STUDENT SEARCH
// =============================================================================

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Maximum number of search results
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Default similarity threshold for "did you mean" suggestions
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

// =============================================================================
// API
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Login endpoint - max requests
    pub const LOGIN_MAX_REQUESTS: i64 = 10;
    /// Login endpoint - window in seconds
    pub const LOGIN_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 300;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}
