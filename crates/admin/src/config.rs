//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUPABASE_URL` - Supabase project URL
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role key (bypasses row-level security)
//! - `ADMIN_PASSWORD` - Back-office login password
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ORDER_WATCH_INTERVAL_SECS` - New-order poll interval (default: 60)
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Sentry error tracking
//!
//! ## Gmail notifications (all-or-nothing group; absent disables email)
//! - `GMAIL_CLIENT_ID` / `GMAIL_CLIENT_SECRET` / `GMAIL_REFRESH_TOKEN`
//! - `ORDER_NOTIFY_FROM` - Sender address (the authorized Gmail account)
//! - `ORDER_NOTIFY_TO` - Recipient for new-order notifications

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
    #[error("Incomplete variable group: {0}")]
    IncompleteGroup(String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Supabase connection details (service-role key)
    pub supabase: SupabaseConfig,
    /// Back-office login password
    pub admin_password: SecretString,
    /// Gmail notification settings; `None` disables order emails
    pub gmail: Option<GmailConfig>,
    /// Interval between new-order polls, in seconds
    pub order_watch_interval_secs: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

/// Supabase REST API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://xyz.supabase.co`)
    pub url: String,
    /// Service-role key; bypasses row-level security
    pub api_key: SecretString,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Gmail OAuth2 configuration for order notification emails.
#[derive(Clone)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    /// Sender address (must match the authorized account)
    pub notify_from: String,
    /// Recipient for new-order notifications
    pub notify_to: String,
}

impl std::fmt::Debug for GmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmailConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("notify_from", &self.notify_from)
            .field("notify_to", &self.notify_to)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, if
    /// secrets fail validation, or if the Gmail variable group is only
    /// partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        let supabase = SupabaseConfig::from_env()?;
        let admin_password = get_validated_secret("ADMIN_PASSWORD")?;
        let gmail = GmailConfig::from_env()?;

        let order_watch_interval_secs = get_env_or_default("ORDER_WATCH_INTERVAL_SECS", "60")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ORDER_WATCH_INTERVAL_SECS".to_string(), e.to_string())
            })?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            supabase,
            admin_password,
            gmail,
            order_watch_interval_secs,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SupabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = get_required_env("SUPABASE_URL")?;
        if url::Url::parse(&url).is_err() {
            return Err(ConfigError::InvalidEnvVar(
                "SUPABASE_URL".to_string(),
                "not a valid URL".to_string(),
            ));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: get_validated_secret("SUPABASE_SERVICE_ROLE_KEY")?,
        })
    }
}

impl GmailConfig {
    /// Load the Gmail variable group.
    ///
    /// Returns `Ok(None)` when none of the variables are set. Setting only
    /// some of them is a configuration mistake and fails loudly instead of
    /// silently disabling notifications.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let vars = [
            "GMAIL_CLIENT_ID",
            "GMAIL_CLIENT_SECRET",
            "GMAIL_REFRESH_TOKEN",
            "ORDER_NOTIFY_FROM",
            "ORDER_NOTIFY_TO",
        ];
        let set: Vec<&str> = vars
            .iter()
            .copied()
            .filter(|v| std::env::var(v).is_ok())
            .collect();

        if set.is_empty() {
            return Ok(None);
        }
        if set.len() != vars.len() {
            let missing: Vec<&str> = vars
                .iter()
                .copied()
                .filter(|v| !set.contains(v))
                .collect();
            return Err(ConfigError::IncompleteGroup(format!(
                "Gmail notifications need all of {vars:?}; missing {missing:?}"
            )));
        }

        Ok(Some(Self {
            client_id: get_required_env("GMAIL_CLIENT_ID")?,
            client_secret: SecretString::from(get_required_env("GMAIL_CLIENT_SECRET")?),
            refresh_token: SecretString::from(get_required_env("GMAIL_REFRESH_TOKEN")?),
            notify_from: get_required_env("ORDER_NOTIFY_FROM")?,
            notify_to: get_required_env("ORDER_NOTIFY_TO")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-service-role-key", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        assert!(validate_secret_strength("bbbbbbbbbbbbbbbb", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_gmail_config_debug_redacts_secrets() {
        let config = GmailConfig {
            client_id: "client-id.apps.googleusercontent.com".to_string(),
            client_secret: SecretString::from("gocspx-something"),
            refresh_token: SecretString::from("1//refresh-token"),
            notify_from: "shop@qotore.com".to_string(),
            notify_to: "orders@qotore.com".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("gocspx-something"));
        assert!(!debug_output.contains("1//refresh-token"));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 3001,
            supabase: SupabaseConfig {
                url: "https://test.supabase.co".to_string(),
                api_key: SecretString::from("k"),
            },
            admin_password: SecretString::from("p"),
            gmail: None,
            order_watch_interval_secs: 60,
            sentry_dsn: None,
            sentry_environment: None,
        };

        assert_eq!(config.socket_addr().port(), 3001);
    }
}
