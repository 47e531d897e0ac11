//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths, then applies
//! environment overrides (a `.env` file is honoured).
//! Config location: ~/.config/workspot/config.toml

pub mod defaults;

use crate::constants;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Geocoding/routing provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Session signing settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Place record defaults
    #[serde(default)]
    pub places: PlacesConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connect/acquire timeout in seconds
    #[serde(default = "default_database_timeout")]
    pub timeout_secs: u64,
}

/// Geocoding and routing provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_direction_url")]
    pub direction_url: String,

    /// Provider API key
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

/// Session signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[serde(default)]
    pub secret: String,

    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
}

/// Place record defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Image stored when a place is created without images
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}
fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}
fn default_database_timeout() -> u64 {
    DEFAULT_DATABASE_TIMEOUT_SECS
}
fn default_geocoding_url() -> String {
    constants::api::GEOCODING_URL.to_string()
}
fn default_direction_url() -> String {
    constants::api::DIRECTION_URL.to_string()
}
fn default_provider_timeout() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_SECS
}
fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_HOURS
}
fn default_placeholder_image() -> String {
    constants::places::PLACEHOLDER_IMAGE.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            timeout_secs: default_database_timeout(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            direction_url: default_direction_url(),
            api_key: String::new(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            session_ttl_hours: default_session_ttl(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path and apply environment overrides
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load only the config file, without environment overrides
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    ///
    /// Empty values are ignored. An unparseable port is ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(env::DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(key) = get(env::API_KEY) {
            self.provider.api_key = key;
        }
        if let Some(secret) = get(env::AUTH_SECRET) {
            self.auth.secret = secret;
        }
        if let Some(host) = get(env::HOST) {
            self.server.host = host;
        }
        if let Some(port) = get(env::PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", env::PORT, port),
            }
        }
    }

    /// Fail unless the database url, provider API key and session secret are all set
    pub fn require_secrets(&self) -> Result<()> {
        let required = [
            (env::DATABASE_URL, &self.database.url),
            (env::API_KEY, &self.provider.api_key),
            (env::AUTH_SECRET, &self.auth.secret),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must be set", name)));
            }
        }
        Ok(())
    }

    /// Fail unless the provider API key is set (CLI lookups need nothing else)
    pub fn require_api_key(&self) -> Result<()> {
        if self.provider.api_key.trim().is_empty() {
            return Err(Error::Config(format!("{} must be set", env::API_KEY)));
        }
        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["database", "url"] => Some(self.database.url.clone()),
            ["database", "max_connections"] => Some(self.database.max_connections.to_string()),
            ["database", "timeout_secs"] => Some(self.database.timeout_secs.to_string()),

            ["provider", "geocoding_url"] => Some(self.provider.geocoding_url.clone()),
            ["provider", "direction_url"] => Some(self.provider.direction_url.clone()),
            ["provider", "api_key"] => Some(self.provider.api_key.clone()),
            ["provider", "timeout_secs"] => Some(self.provider.timeout_secs.to_string()),

            ["auth", "secret"] => Some(self.auth.secret.clone()),
            ["auth", "session_ttl_hours"] => Some(self.auth.session_ttl_hours.to_string()),

            ["places", "placeholder_image"] => Some(self.places.placeholder_image.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["database", "url"] => {
                self.database.url = value.to_string();
            }
            ["database", "max_connections"] => {
                self.database.max_connections = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid connection count: {}", value))
                })?;
            }
            ["database", "timeout_secs"] => {
                self.database.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["provider", "geocoding_url"] => {
                self.provider.geocoding_url = value.to_string();
            }
            ["provider", "direction_url"] => {
                self.provider.direction_url = value.to_string();
            }
            ["provider", "api_key"] => {
                self.provider.api_key = value.to_string();
            }
            ["provider", "timeout_secs"] => {
                self.provider.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["auth", "secret"] => {
                self.auth.secret = value.to_string();
            }
            ["auth", "session_ttl_hours"] => {
                self.auth.session_ttl_hours = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid session lifetime: {}", value))
                })?;
            }

            ["places", "placeholder_image"] => {
                self.places.placeholder_image = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "database.url",
            "database.max_connections",
            "database.timeout_secs",
            "provider.geocoding_url",
            "provider.direction_url",
            "provider.api_key",
            "provider.timeout_secs",
            "auth.secret",
            "auth.session_ttl_hours",
            "places.placeholder_image",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env as std_env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        std_env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 7878);
        assert_eq!(config.database.timeout_secs, 30);
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.places.placeholder_image, "/assets/placeholder.jpg");
        assert!(config.provider.api_key.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        config.set("provider.api_key", "abc").unwrap();
        assert_eq!(config.get("provider.api_key"), Some("abc".to_string()));

        config.set("server.port", "9000").unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("auth.session_ttl_hours", "soon").is_err());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("GEBETA_API_KEY", "key-123"),
            ("AUTH_SECRET", "s3cret"),
            ("WORKSPOT_PORT", "8080"),
            ("WORKSPOT_HOST", "   "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.provider.api_key, "key-123");
        assert_eq!(config.auth.secret, "s3cret");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "WORKSPOT_PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_require_secrets() {
        let mut config = Config::default();
        let err = config.require_secrets().unwrap_err();
        assert!(err.to_string().contains("GEBETA_API_KEY"));

        config.provider.api_key = "key".to_string();
        let err = config.require_secrets().unwrap_err();
        assert!(err.to_string().contains("AUTH_SECRET"));

        config.auth.secret = "secret".to_string();
        assert!(config.require_secrets().is_ok());

        config.database.url = String::new();
        assert!(config.require_secrets().is_err());
    }

    #[test]
    fn test_require_api_key() {
        let mut config = Config::default();
        assert!(config.require_api_key().is_err());
        config.provider.api_key = "  ".to_string();
        assert!(config.require_api_key().is_err());
        config.provider.api_key = "key".to_string();
        assert!(config.require_api_key().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.provider.timeout_secs = 5;
            config.places.placeholder_image = "/img/none.png".to_string();
            config.save().unwrap();

            let loaded = Config::load_file().unwrap();
            assert_eq!(loaded.provider.timeout_secs, 5);
            assert_eq!(loaded.places.placeholder_image, "/img/none.png");
        });
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[server]"));
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[provider]"));
        assert!(toml.contains("[auth]"));
        assert!(toml.contains("[places]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys_resolve() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} should resolve", key);
        }
    }
}
