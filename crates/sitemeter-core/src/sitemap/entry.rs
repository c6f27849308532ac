use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sitemap protocol change frequency hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sitemap candidate, and (once classified) its output record.
///
/// Fields other than `url`/`changefreq`/`priority` are kept in `extra` and
/// survive classification untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SitemapEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            changefreq: None,
            priority: None,
            extra: Map::new(),
        }
    }

    /// Return the entry with crawl metadata set.
    pub fn annotated(mut self, changefreq: ChangeFreq, priority: f64) -> Self {
        self.changefreq = Some(changefreq);
        self.priority = Some(priority);
        self
    }

    /// `lastmod` pass-through field, when present as a string.
    pub fn lastmod(&self) -> Option<&str> {
        self.extra.get("lastmod").and_then(Value::as_str)
    }
}

impl From<&str> for SitemapEntry {
    fn from(url: &str) -> Self {
        SitemapEntry::new(url)
    }
}
