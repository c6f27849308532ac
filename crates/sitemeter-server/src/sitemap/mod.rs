//! Sitemap generation on top of `sitemeter_core::sitemap` rules.
//!
//! - `source`     : where roadmap / best-practice identifiers come from
//! - `classifier` : rules + identifier source, async per-entry classification
//! - `builder`    : batch driver (exclude, classify, drop absent)
//! - `xml`        : sitemap-protocol `<urlset>` rendering

pub mod builder;
pub mod classifier;
pub mod source;
pub mod xml;

pub use builder::{build_sitemap, classify_each, BuildStats};
pub use classifier::{IdentifierSnapshot, SitemapClassifier};
pub use source::{CachedSource, DirectorySource, IdentifierSource, StaticSource};
pub use xml::render_urlset;
