//! Exclusion and classification rules.
//!
//! Matching is literal: exact string equality for the exclusion list and the
//! high-priority set, `starts_with` for the guide/video sections. URLs are never
//! parsed or normalized, so `https://roadmap.sh/about/` does not match
//! `https://roadmap.sh/about`.

use super::entry::{ChangeFreq, SitemapEntry};

/// Site base used by the free functions.
pub const DEFAULT_SITE: &str = "https://roadmap.sh";

/// Paths (relative to the site base) that are never indexed.
const EXCLUDED_PATHS: [&str; 5] = ["/404", "/terms", "/privacy", "/pdfs", "/g"];

/// Top-level pages that always get the highest priority. `""` is the site root.
const TOP_LEVEL_PATHS: [&str; 6] = ["", "/about", "/roadmaps", "/best-practices", "/guides", "/videos"];

/// Sections matched by prefix.
const SECTION_PREFIXES: [&str; 2] = ["/guides", "/videos"];

const HIGH_PRIORITY: f64 = 1.0;
const SECTION_PRIORITY: f64 = 0.9;

/// Outcome of classifying one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Member of the high-priority set.
    High,
    /// Under a guide/video section prefix.
    Section,
    /// Not part of the sitemap.
    Absent,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::High => "high",
            Classification::Section => "section",
            Classification::Absent => "absent",
        }
    }
}

/// Exclusion + classification rules for one site base.
#[derive(Debug, Clone)]
pub struct SitemapRules {
    site: String,
    excluded: Vec<String>,
    section_prefixes: Vec<String>,
}

impl Default for SitemapRules {
    fn default() -> Self {
        Self::new(DEFAULT_SITE)
    }
}

impl SitemapRules {
    /// Build rules for `site` (scheme + host, trailing `/` ignored).
    pub fn new(site: &str) -> Self {
        let site = site.trim_end_matches('/').to_string();
        let excluded = EXCLUDED_PATHS.iter().map(|p| format!("{site}{p}")).collect();
        let section_prefixes = SECTION_PREFIXES.iter().map(|p| format!("{site}{p}")).collect();
        Self { site, excluded, section_prefixes }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// `false` iff `url` is exactly one of the excluded URLs.
    pub fn should_be_indexed(&self, url: &str) -> bool {
        !self.excluded.iter().any(|u| u == url)
    }

    /// Top-level pages, then `/{id}` + `/{id}/topics` per roadmap, then
    /// `/best-practices/{id}` per best-practice.
    pub fn high_priority_urls(&self, roadmap_ids: &[String], best_practice_ids: &[String]) -> Vec<String> {
        let site = &self.site;
        let mut urls = Vec::with_capacity(TOP_LEVEL_PATHS.len() + roadmap_ids.len() * 2 + best_practice_ids.len());
        urls.extend(TOP_LEVEL_PATHS.iter().map(|p| format!("{site}{p}")));
        for id in roadmap_ids {
            urls.push(format!("{site}/{id}"));
            urls.push(format!("{site}/{id}/topics"));
        }
        urls.extend(best_practice_ids.iter().map(|id| format!("{site}/best-practices/{id}")));
        urls
    }

    /// Decide which rule (if any) applies to `url`.
    pub fn classification(&self, url: &str, roadmap_ids: &[String], best_practice_ids: &[String]) -> Classification {
        if self
            .high_priority_urls(roadmap_ids, best_practice_ids)
            .iter()
            .any(|u| u == url)
        {
            return Classification::High;
        }
        if self.section_prefixes.iter().any(|p| url.starts_with(p.as_str())) {
            return Classification::Section;
        }
        Classification::Absent
    }

    /// Annotate `entry` for the sitemap, or `None` when it should be omitted.
    pub fn classify(
        &self,
        entry: SitemapEntry,
        roadmap_ids: &[String],
        best_practice_ids: &[String],
    ) -> Option<SitemapEntry> {
        match self.classification(&entry.url, roadmap_ids, best_practice_ids) {
            Classification::High => Some(entry.annotated(ChangeFreq::Monthly, HIGH_PRIORITY)),
            Classification::Section => Some(entry.annotated(ChangeFreq::Monthly, SECTION_PRIORITY)),
            Classification::Absent => None,
        }
    }
}

/// `should_be_indexed` against the default site.
pub fn should_be_indexed(url: &str) -> bool {
    SitemapRules::default().should_be_indexed(url)
}

/// `classify` against the default site.
pub fn classify(entry: SitemapEntry, roadmap_ids: &[String], best_practice_ids: &[String]) -> Option<SitemapEntry> {
    SitemapRules::default().classify(entry, roadmap_ids, best_practice_ids)
}
