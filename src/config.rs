//! Runtime configuration
//!
//! The pipeline never reads credentials from source or global state: the
//! entry-point adapters build an [`ExportConfig`] (usually from environment
//! variables) and hand it to [`crate::ExportPipeline`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable holding the Optical base URL
pub const ENV_BASE_URL: &str = "OPTICAL_URL";

/// Environment variable holding the static bearer token
pub const ENV_TOKEN: &str = "OPTICAL_TOKEN";

/// Environment variable overriding the upload folder name
pub const ENV_FOLDER: &str = "OPTICAL_FOLDER";

/// Environment variable opting in to disabled TLS verification
pub const ENV_INSECURE_TLS: &str = "OPTICAL_INSECURE_TLS";

/// Configuration for an export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Base URL of the Optical API (no trailing slash)
    pub base_url: String,

    /// Static bearer token for all upstream calls
    pub token: String,

    /// Upload folder name on the backend
    #[serde(default = "default_folder")]
    pub folder_name: String,

    /// Prefix for generated filenames (`{prefix}-YYYYMMDD-HHh.csv`)
    #[serde(default = "default_prefix")]
    pub filename_prefix: String,

    /// Skip TLS certificate verification. Off by default; the observed
    /// upstream disabled verification unconditionally, here it is an
    /// explicit opt-in via `OPTICAL_INSECURE_TLS`.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_folder() -> String {
    "Reports".to_string()
}

fn default_prefix() -> String {
    "deals".to_string()
}

impl ExportConfig {
    /// Create a config with the given base URL and token, defaults elsewhere
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            folder_name: default_folder(),
            filename_prefix: default_prefix(),
            accept_invalid_certs: false,
        }
    }

    /// Build a config from the process environment
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(ENV_BASE_URL).map_err(|_| Error::missing_env(ENV_BASE_URL))?;
        let token = std::env::var(ENV_TOKEN).map_err(|_| Error::missing_env(ENV_TOKEN))?;

        let mut config = Self::new(base_url, token);

        if let Ok(folder) = std::env::var(ENV_FOLDER) {
            if !folder.is_empty() {
                config.folder_name = folder;
            }
        }

        if let Ok(flag) = std::env::var(ENV_INSECURE_TLS) {
            config.accept_invalid_certs = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the upload folder name
    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder_name = folder.into();
        self
    }

    /// Set the filename prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = prefix.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http(s), got scheme '{}'",
                url.scheme()
            )));
        }
        if self.token.is_empty() {
            return Err(Error::config("token must not be empty"));
        }
        if self.folder_name.is_empty() {
            return Err(Error::config("folder_name must not be empty"));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
