//! WordPress connection configuration from environment variables.
//!
//! Credentials are never taken on the command line; they come from the
//! environment (or a `.env` file loaded by the binary) so they stay out of
//! shell history. All three values must be present before any network call
//! is attempted.

use crate::error::PressmapError;

/// Environment variable holding the site URL (e.g. `https://blog.example.com`).
pub const ENV_SITE_URL: &str = "PRESSMAP_SITE_URL";
/// Environment variable holding the WordPress username.
pub const ENV_USER: &str = "PRESSMAP_USER";
/// Environment variable holding the application password.
pub const ENV_APP_PASSWORD: &str = "PRESSMAP_APP_PASSWORD";

/// Connection settings for a WordPress site.
#[derive(Debug, Clone)]
pub struct WpConfig {
    /// Site URL as supplied; normalized by the client before use.
    pub site_url: String,
    pub username: String,
    /// WordPress application password for REST authentication.
    pub app_password: String,
}

impl WpConfig {
    /// Read the connection settings from the environment, failing fast if
    /// any value is missing or empty.
    pub fn from_env() -> Result<Self, PressmapError> {
        Ok(Self {
            site_url: require_env(ENV_SITE_URL)?,
            username: require_env(ENV_USER)?,
            app_password: require_env(ENV_APP_PASSWORD)?,
        })
    }
}

fn require_env(name: &str) -> Result<String, PressmapError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PressmapError::Config(format!(
            "environment variable {} is not set",
            name
        ))),
    }
}
