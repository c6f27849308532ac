//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io;
use std::path::Path;

use sitemeter_core::error::{Result, SiteError};

pub use schema::{AppConfig, MetricsSection, ServerSection, SitemapSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| SiteError::Internal(format!("read config failed ({}): {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| SiteError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => load_from_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            let cfg = AppConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) => Err(SiteError::Internal(format!("stat config failed ({}): {e}", path.display()))),
    }
}

/// Load the config a binary was pointed at.
///
/// An explicitly named file must exist. Only the implicit `default_path` may be
/// missing, in which case built-in defaults are used.
pub fn load_selected(explicit: Option<&Path>, default_path: impl AsRef<Path>) -> Result<AppConfig> {
    match explicit {
        Some(path) => load_from_file(path),
        None => load_or_default(default_path),
    }
}
