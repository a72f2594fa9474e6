//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Google credentials are optional: `parse` works without them, and `log`
/// reports a clear "not configured" error when they are missing.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google OAuth client ID.
    pub google_client_id: Option<String>,
    /// Google OAuth client secret.
    pub google_client_secret: Option<String>,
    /// Google OAuth refresh token.
    pub google_refresh_token: Option<String>,
    /// Spreadsheet to append to. Discovered (or created) by name when absent.
    pub spreadsheet_id: Option<String>,
    /// Calendar receiving meal events.
    pub calendar_id: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("google_client_id", &self.google_client_id)
            .field("google_client_secret", &self.google_client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("google_refresh_token", &self.google_refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("calendar_id", &self.calendar_id)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_client_id: None,
            google_client_secret: None,
            google_refresh_token: None,
            spreadsheet_id: None,
            calendar_id: "primary".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    ///
    /// Merge order: defaults, then the platform config file, then the given
    /// file, then `NUTRI_`-prefixed environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("NUTRI_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for nutri.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nutri"))
}
