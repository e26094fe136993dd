//! JSON configuration for scan sessions.

use crate::{CaptureParams, CaptureParamsError, ScanSession};
use docscan_core::Size;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ScanIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Session configuration as stored on disk.
///
/// Every field is optional in the file; missing values take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub capture: CaptureParams,
    /// Target space override; when unset, the size recorded with the frames
    /// is used.
    pub target_size: Option<Size>,
}

impl ScanConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScanIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Build a session from this config.
    pub fn build_session(&self) -> Result<ScanSession, CaptureParamsError> {
        ScanSession::new(self.capture.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.json");

        let mut cfg = ScanConfig::default();
        cfg.capture.desired_jitter = 42.0;
        cfg.target_size = Some(Size::new(390.0, 844.0));
        cfg.write_json(&path).expect("write");

        let loaded = ScanConfig::load_json(&path).expect("load");
        assert_eq!(loaded, cfg);
        assert!(loaded.build_session().is_ok());
    }

    #[test]
    fn empty_object_is_default_config() {
        let cfg: ScanConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(cfg, ScanConfig::default());
    }

    #[test]
    fn invalid_params_fail_at_build_time() {
        let cfg: ScanConfig =
            serde_json::from_str(r#"{ "capture": { "required_feature_count": 0 } }"#)
                .expect("parse");
        assert!(matches!(
            cfg.build_session(),
            Err(CaptureParamsError::ZeroRequiredFeatureCount)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScanConfig::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScanIoError::Io(_)));
    }
}
