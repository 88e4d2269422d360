//! # API Configuration
//!
//! YAML-backed service configuration: bind address, snapshot directory,
//! and the session countdown windows clients are handed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use grc_auth::SessionWindows;

use crate::error::AppError;

/// Service configuration, loaded from a YAML file or defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind: String,
    /// Snapshot root directory; `None` runs the store in memory only.
    pub data_dir: Option<PathBuf>,
    /// Idle-session warning and expiry windows.
    pub session: SessionWindows,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            data_dir: None,
            session: SessionWindows::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Internal(format!("cannot read config {}: {e}", path.display())))?;
        serde_yaml::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("malformed config {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert!(cfg.data_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let cfg: ApiConfig = serde_yaml::from_str("bind: \"127.0.0.1:9000\"\n").unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:9000");
        assert_eq!(cfg.session, SessionWindows::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
bind: "0.0.0.0:8443"
data_dir: /var/lib/grc
session:
  warning_secs: 600
  expiry_secs: 900
"#;
        let cfg: ApiConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/var/lib/grc")));
        assert_eq!(cfg.session.warning_secs, 600);
    }
}
