use std::net::SocketAddr;

use serde::Deserialize;
use sitemeter_core::error::{Result, SiteError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub sitemap: SitemapSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            sitemap: SitemapSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SiteError::UnsupportedVersion);
        }
        self.server.validate()?;
        self.sitemap.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|_| SiteError::BadConfig(format!("server.listen must be a valid SocketAddr: {}", self.listen)))
    }

    /// Replace the port with `port` (the `PORT` environment variable), if set.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        let Some(raw) = port else { return Ok(()) };
        let port: u16 = raw
            .trim()
            .parse()
            .map_err(|_| SiteError::BadConfig(format!("PORT must be a valid port number: {raw}")))?;
        let mut addr = self.listen_addr()?;
        addr.set_port(port);
        self.listen = addr.to_string();
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapSection {
    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_roadmaps_dir")]
    pub roadmaps_dir: String,

    #[serde(default = "default_best_practices_dir")]
    pub best_practices_dir: String,

    /// Read each identifier set once per process instead of on every call.
    #[serde(default)]
    pub cache_identifiers: bool,
}

impl Default for SitemapSection {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            roadmaps_dir: default_roadmaps_dir(),
            best_practices_dir: default_best_practices_dir(),
            cache_identifiers: false,
        }
    }
}

impl SitemapSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.site_url.starts_with("https://") || self.site_url.starts_with("http://")) {
            return Err(SiteError::BadConfig(
                "sitemap.site_url must start with http:// or https://".into(),
            ));
        }
        if self.roadmaps_dir.trim().is_empty() {
            return Err(SiteError::BadConfig("sitemap.roadmaps_dir must not be empty".into()));
        }
        if self.best_practices_dir.trim().is_empty() {
            return Err(SiteError::BadConfig("sitemap.best_practices_dir must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Histogram buckets for request durations, in seconds.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,

    /// Export process metrics (cpu, memory, fds, start time).
    #[serde(default = "default_true")]
    pub process: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            duration_buckets: default_duration_buckets(),
            process: true,
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if self.duration_buckets.is_empty() {
            return Err(SiteError::BadConfig("metrics.duration_buckets must not be empty".into()));
        }
        if self.duration_buckets.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            return Err(SiteError::BadConfig(
                "metrics.duration_buckets must be finite and positive".into(),
            ));
        }
        if self.duration_buckets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SiteError::BadConfig(
                "metrics.duration_buckets must be strictly increasing".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_site_url() -> String {
    sitemeter_core::sitemap::DEFAULT_SITE.into()
}
fn default_roadmaps_dir() -> String {
    "src/data/roadmaps".into()
}
fn default_best_practices_dir() -> String {
    "src/data/best-practices".into()
}
fn default_duration_buckets() -> Vec<f64> {
    vec![0.1, 0.3, 0.5, 1.0, 1.5, 2.0, 3.0]
}
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_override_keeps_host() {
        let mut s = ServerSection { listen: "127.0.0.1:3000".into() };
        s.apply_port_override(Some("9100")).unwrap();
        assert_eq!(s.listen, "127.0.0.1:9100");

        s.apply_port_override(None).unwrap();
        assert_eq!(s.listen, "127.0.0.1:9100");

        let err = s.apply_port_override(Some("http")).unwrap_err();
        assert_eq!(err.code().as_str(), "BAD_CONFIG");
    }

    #[test]
    fn defaults_validate() {
        AppConfig::default().validate().unwrap();
    }
}
