//! Batch sitemap driver.
//!
//! Both entry points drop excluded URLs first, then classify the remainder and
//! drop "absent" results, keeping input order. `build_sitemap` reads the
//! identifier sets once for the whole batch; `classify_each` reads them per
//! entry and runs entries concurrently. The output is the same.

use futures_util::future::try_join_all;

use sitemeter_core::error::Result;
use sitemeter_core::sitemap::{Classification, SitemapEntry};

use super::classifier::SitemapClassifier;

/// Per-outcome counts of one build, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub excluded: usize,
    pub high: usize,
    pub section: usize,
    pub absent: usize,
}

pub async fn build_sitemap(
    classifier: &SitemapClassifier,
    entries: Vec<SitemapEntry>,
) -> Result<(Vec<SitemapEntry>, BuildStats)> {
    let snapshot = classifier.snapshot().await?;
    let mut stats = BuildStats::default();
    let mut out = Vec::with_capacity(entries.len());

    for entry in entries {
        if !classifier.should_be_indexed(&entry.url) {
            stats.excluded += 1;
            continue;
        }
        match snapshot.classification(&entry.url) {
            Classification::High => stats.high += 1,
            Classification::Section => stats.section += 1,
            Classification::Absent => stats.absent += 1,
        }
        if let Some(e) = snapshot.classify(entry) {
            out.push(e);
        }
    }

    tracing::info!(
        kept = out.len(),
        excluded = stats.excluded,
        high = stats.high,
        section = stats.section,
        absent = stats.absent,
        roadmaps = snapshot.roadmaps().len(),
        best_practices = snapshot.best_practices().len(),
        "sitemap built"
    );
    Ok((out, stats))
}

pub async fn classify_each(classifier: &SitemapClassifier, entries: Vec<SitemapEntry>) -> Result<Vec<SitemapEntry>> {
    let jobs = entries
        .into_iter()
        .filter(|e| classifier.should_be_indexed(&e.url))
        .map(|e| classifier.classify(e));
    let classified = try_join_all(jobs).await?;
    Ok(classified.into_iter().flatten().collect())
}
