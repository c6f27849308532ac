use std::sync::Arc;

use sitemeter_core::error::Result;
use sitemeter_core::sitemap::{Classification, SitemapEntry, SitemapRules};

use super::source::IdentifierSource;

/// Classifies sitemap entries against identifier sets read from a source.
#[derive(Clone)]
pub struct SitemapClassifier {
    rules: SitemapRules,
    source: Arc<dyn IdentifierSource>,
}

impl SitemapClassifier {
    pub fn new(rules: SitemapRules, source: Arc<dyn IdentifierSource>) -> Self {
        Self { rules, source }
    }

    pub fn should_be_indexed(&self, url: &str) -> bool {
        self.rules.should_be_indexed(url)
    }

    /// Read both identifier sets once.
    pub async fn snapshot(&self) -> Result<IdentifierSnapshot> {
        let (roadmaps, best_practices) =
            tokio::try_join!(self.source.roadmap_ids(), self.source.best_practice_ids())?;
        Ok(IdentifierSnapshot {
            rules: self.rules.clone(),
            roadmaps,
            best_practices,
        })
    }

    /// Classify one entry, re-reading both identifier sets.
    ///
    /// `Ok(None)` means the entry is left out of the sitemap.
    pub async fn classify(&self, entry: SitemapEntry) -> Result<Option<SitemapEntry>> {
        Ok(self.snapshot().await?.classify(entry))
    }
}

/// Identifier sets captured at one point in time, plus the rules to apply.
#[derive(Debug, Clone)]
pub struct IdentifierSnapshot {
    rules: SitemapRules,
    roadmaps: Vec<String>,
    best_practices: Vec<String>,
}

impl IdentifierSnapshot {
    pub fn roadmaps(&self) -> &[String] {
        &self.roadmaps
    }

    pub fn best_practices(&self) -> &[String] {
        &self.best_practices
    }

    pub fn classification(&self, url: &str) -> Classification {
        self.rules.classification(url, &self.roadmaps, &self.best_practices)
    }

    pub fn classify(&self, entry: SitemapEntry) -> Option<SitemapEntry> {
        let out = self.rules.classify(entry, &self.roadmaps, &self.best_practices);
        if let Some(e) = &out {
            tracing::trace!(url = %e.url, priority = ?e.priority, "entry classified");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::source::{DirectorySource, StaticSource};

    fn classifier() -> SitemapClassifier {
        SitemapClassifier::new(
            SitemapRules::default(),
            Arc::new(StaticSource::new(["frontend", "backend"], ["api-security"])),
        )
    }

    #[tokio::test]
    async fn classifies_against_source() {
        let c = classifier();
        let top = c.classify(SitemapEntry::new("https://roadmap.sh/frontend/topics")).await.unwrap().unwrap();
        assert_eq!(top.priority, Some(1.0));

        let bp = c.classify(SitemapEntry::new("https://roadmap.sh/best-practices/api-security")).await.unwrap();
        assert_eq!(bp.and_then(|e| e.priority), Some(1.0));

        let guide = c.classify(SitemapEntry::new("https://roadmap.sh/guides/x")).await.unwrap();
        assert_eq!(guide.and_then(|e| e.priority), Some(0.9));

        assert!(c.classify(SitemapEntry::new("https://roadmap.sh/some-random-page")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let tmp = tempfile::tempdir().unwrap();
        let c = SitemapClassifier::new(
            SitemapRules::default(),
            Arc::new(DirectorySource::rooted(tmp.path(), "missing", "missing")),
        );
        let err = c.classify(SitemapEntry::new("https://roadmap.sh")).await.unwrap_err();
        assert_eq!(err.code().as_str(), "IDENTIFIER_SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn snapshot_matches_per_entry_reads() {
        let c = classifier();
        let snap = c.snapshot().await.unwrap();
        for url in [
            "https://roadmap.sh",
            "https://roadmap.sh/backend",
            "https://roadmap.sh/videos/v",
            "https://roadmap.sh/unknown",
        ] {
            let a = snap.classify(SitemapEntry::new(url));
            let b = c.classify(SitemapEntry::new(url)).await.unwrap();
            assert_eq!(a, b, "{url}");
        }
    }
}
