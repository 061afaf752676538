//! Analyzer configuration.
//!
//! Precedence, lowest first: built-in defaults, an optional TOML file, the
//! `CIACHECK_BACKEND_URL` environment variable, then explicit overrides
//! applied by the caller through [`AnalyzerConfig::with_backend_url`].
//!
//! ```toml
//! [backend]
//! url = "http://localhost:5000"
//! timeout_secs = 10
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

/// Default backend location.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Environment variable overriding the backend location.
pub const BACKEND_URL_ENV: &str = "CIACHECK_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Base URL of the analysis backend, without the `/analyze` path.
    pub backend_url: String,
    /// Client-side request timeout. `None` leaves the transport default.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    backend: BackendSection,
}

#[derive(Debug, Default, Deserialize)]
struct BackendSection {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, std::env::var(BACKEND_URL_ENV).ok())
    }

    fn load_with_env(path: Option<&Path>, env_url: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            let file = read_file(path)?;
            if let Some(url) = file.backend.url {
                config.backend_url = url;
            }
            config.request_timeout_secs = file.backend.timeout_secs;
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            debug!(url = %url, "Backend URL overridden from {}", BACKEND_URL_ENV);
            config.backend_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the backend URL, validating it.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.backend_url = url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidBackendUrl(self.backend_url.clone());
        let parsed = Url::parse(self.backend_url.trim()).map_err(|_| invalid())?;
        match parsed.scheme() {
            "http" | "https" if parsed.host().is_some() => Ok(()),
            _ => Err(invalid()),
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::load_with_env(None, None).unwrap();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_file_values() {
        let file = write_config("[backend]\nurl = \"http://10.0.0.5:8000\"\ntimeout_secs = 7\n");
        let config = AnalyzerConfig::load_with_env(Some(file.path()), None).unwrap();
        assert_eq!(config.backend_url, "http://10.0.0.5:8000");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file = write_config("");
        let config = AnalyzerConfig::load_with_env(Some(file.path()), None).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("[backend]\nurl = \"http://10.0.0.5:8000\"\n");
        let config = AnalyzerConfig::load_with_env(
            Some(file.path()),
            Some("https://scanner.internal".to_string()),
        )
        .unwrap();
        assert_eq!(config.backend_url, "https://scanner.internal");
    }

    #[test]
    fn test_flag_overrides_everything() {
        let config = AnalyzerConfig::load_with_env(None, Some("http://a:1".to_string()))
            .unwrap()
            .with_backend_url("http://b:2")
            .unwrap();
        assert_eq!(config.backend_url, "http://b:2");
    }

    #[test]
    fn test_invalid_backend_url() {
        for bad in ["localhost:5000", "ftp://host", "not a url"] {
            let err = AnalyzerConfig::default().with_backend_url(bad).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidBackendUrl(_)), "{}", bad);
        }
    }

    #[test]
    fn test_unreadable_and_malformed_file() {
        let missing = AnalyzerConfig::load_with_env(Some(Path::new("/nonexistent/ciacheck.toml")), None);
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let file = write_config("[backend\nurl = ");
        let malformed = AnalyzerConfig::load_with_env(Some(file.path()), None);
        assert!(matches!(malformed, Err(ConfigError::Parse { .. })));
    }
}
