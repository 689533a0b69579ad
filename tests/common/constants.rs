//! Shared constants for end-to-end tests

// ============================================================================
// Sample Catalog
// ============================================================================

/// Number of movies in the built-in sample seed
pub const SAMPLE_MOVIES_COUNT: usize = 5;

/// Id of "Dangal" in the sample seed
pub const SAMPLE_DANGAL_ID: u64 = 3;

/// Title of the movie used by most create tests
pub const NATRANG_TITLE: &str = "Natrang";

/// Language of the movie used by most create tests
pub const NATRANG_LANGUAGE: &str = "marathi";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
