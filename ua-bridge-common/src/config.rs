use crate::CommonResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration for the bridge process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Console/file log level ("trace".."error").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for rolling log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Upper bound on a single wire frame, header excluded.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_max_frame_bytes() -> usize {
    // Frames are length-prefixed with a u16.
    u16::MAX as usize
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl BridgeConfig {
    pub fn from_file(path: impl AsRef<Path>) -> CommonResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let cfg: BridgeConfig = serde_json::from_str(r#"{"logLevel":"debug"}"#).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_dir, "logs");
        assert_eq!(cfg.max_frame_bytes, 65535);
    }

    #[test]
    fn round_trips_camel_case() {
        let cfg = BridgeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("maxFrameBytes"));
        assert_eq!(serde_json::from_str::<BridgeConfig>(&json).unwrap(), cfg);
    }
}
