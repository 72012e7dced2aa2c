//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use inflight_core::error::{InflightError, Result};

pub use schema::{
    InfoSection, InflightConfig, RequestIdSection, RequestIdSourceKind, ServerSection,
    TrackerSection,
};

pub fn load_from_file(path: &str) -> Result<InflightConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| InflightError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<InflightConfig> {
    let cfg: InflightConfig = serde_yaml::from_str(s)
        .map_err(|e| InflightError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
