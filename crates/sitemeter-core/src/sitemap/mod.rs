//! Sitemap model and classification rules.
//!
//! - `entry` : sitemap record (`url`, `changefreq`, `priority`, pass-through fields)
//! - `rules` : exclusion list + high-priority / section classification

pub mod entry;
pub mod rules;

pub use entry::{ChangeFreq, SitemapEntry};
pub use rules::{classify, should_be_indexed, Classification, SitemapRules, DEFAULT_SITE};
