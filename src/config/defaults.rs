//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default database connection string
pub const DEFAULT_DATABASE_URL: &str = "sqlite://workspot.db?mode=rwc";

/// Default maximum pooled database connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database connect/acquire timeout in seconds
pub const DEFAULT_DATABASE_TIMEOUT_SECS: u64 = 30;

/// Provider request timeout in seconds
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Session lifetime in hours
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "workspot";

/// Environment variables that override the config file
pub mod env {
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const API_KEY: &str = "GEBETA_API_KEY";
    pub const AUTH_SECRET: &str = "AUTH_SECRET";
    pub const HOST: &str = "WORKSPOT_HOST";
    pub const PORT: &str = "WORKSPOT_PORT";
}
