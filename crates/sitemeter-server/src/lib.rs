//! sitemeter server library entry.
//!
//! Two independent halves share this crate: the sitemap pipeline
//! (identifier sources, classifier, batch driver, XML) and the metrics HTTP
//! server (config, state, middleware, `/metrics`). Both binaries and the
//! integration tests consume it.

pub mod app_state;
pub mod config;
pub mod middleware;
pub mod obs;
pub mod ops;
pub mod router;
pub mod sitemap;

use std::path::Path;
use std::sync::Arc;

use sitemeter_core::sitemap::SitemapRules;

use crate::config::SitemapSection;
use crate::sitemap::{CachedSource, DirectorySource, IdentifierSource, SitemapClassifier};

/// Build a classifier from the sitemap config section. Relative directories
/// are resolved against `base`.
pub fn classifier_from_config(cfg: &SitemapSection, base: &Path) -> SitemapClassifier {
    let dirs = DirectorySource::rooted(base, &cfg.roadmaps_dir, &cfg.best_practices_dir);
    let source: Arc<dyn IdentifierSource> = if cfg.cache_identifiers {
        Arc::new(CachedSource::new(dirs))
    } else {
        Arc::new(dirs)
    };
    SitemapClassifier::new(SitemapRules::new(&cfg.site_url), source)
}
