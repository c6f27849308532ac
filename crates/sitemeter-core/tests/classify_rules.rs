//! Exclusion and classification behavior against the default site.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use sitemeter_core::sitemap::{classify, should_be_indexed, ChangeFreq, SitemapEntry};

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn priority_of(url: &str, roadmaps: &[String], best: &[String]) -> Option<f64> {
    classify(SitemapEntry::new(url), roadmaps, best).and_then(|e| e.priority)
}

#[test]
fn excluded_urls_are_not_indexed() {
    for url in [
        "https://roadmap.sh/404",
        "https://roadmap.sh/terms",
        "https://roadmap.sh/privacy",
        "https://roadmap.sh/pdfs",
        "https://roadmap.sh/g",
    ] {
        assert!(!should_be_indexed(url), "{url} must be excluded");
    }
}

#[test]
fn everything_else_is_indexed() {
    for url in [
        "https://roadmap.sh",
        "https://roadmap.sh/404/",
        "https://roadmap.sh/Terms",
        "https://roadmap.sh/guides",
        "https://roadmap.sh/g/",
        "https://roadmap.sh/gx",
        "",
    ] {
        assert!(should_be_indexed(url), "{url} must be indexed");
    }
}

#[test]
fn top_level_pages_get_top_priority() {
    for url in [
        "https://roadmap.sh",
        "https://roadmap.sh/about",
        "https://roadmap.sh/roadmaps",
        "https://roadmap.sh/best-practices",
        "https://roadmap.sh/guides",
        "https://roadmap.sh/videos",
    ] {
        let out = classify(SitemapEntry::new(url), &[], &[]).expect("top-level page");
        assert_eq!(out.changefreq, Some(ChangeFreq::Monthly), "{url}");
        assert_eq!(out.priority, Some(1.0), "{url}");
        assert_eq!(out.url, url);
    }
}

#[test]
fn roadmap_pages_and_topics_get_top_priority() {
    let roadmaps = ids(&["frontend", "backend"]);
    for id in ["frontend", "backend"] {
        assert_eq!(priority_of(&format!("https://roadmap.sh/{id}"), &roadmaps, &[]), Some(1.0));
        assert_eq!(priority_of(&format!("https://roadmap.sh/{id}/topics"), &roadmaps, &[]), Some(1.0));
    }
    // Unknown roadmap falls through to "absent".
    assert_eq!(priority_of("https://roadmap.sh/devops", &roadmaps, &[]), None);
}

#[test]
fn best_practice_pages_get_top_priority() {
    let best = ids(&["api-security"]);
    assert_eq!(
        priority_of("https://roadmap.sh/best-practices/api-security", &[], &best),
        Some(1.0)
    );
    // Best-practice ids do not produce roadmap-style URLs.
    assert_eq!(priority_of("https://roadmap.sh/api-security", &[], &best), None);
}

#[test]
fn guide_and_video_sections_get_lower_priority() {
    let guide = classify(SitemapEntry::new("https://roadmap.sh/guides/some-guide"), &[], &[]).unwrap();
    assert_eq!(guide.changefreq, Some(ChangeFreq::Monthly));
    assert_eq!(guide.priority, Some(0.9));

    assert_eq!(priority_of("https://roadmap.sh/videos/some-video", &[], &[]), Some(0.9));
}

#[test]
fn unmatched_pages_are_absent() {
    let roadmaps = ids(&["frontend"]);
    let best = ids(&["api-security"]);
    assert!(classify(SitemapEntry::new("https://roadmap.sh/some-random-page"), &roadmaps, &best).is_none());
    assert!(classify(SitemapEntry::new("https://roadmap.sh/about/"), &roadmaps, &best).is_none());
    assert!(classify(SitemapEntry::new("https://roadmap.sh/frontend/topics/x"), &roadmaps, &best).is_none());
}

#[test]
fn classification_is_idempotent() {
    let roadmaps = ids(&["frontend", "backend"]);
    let best = ids(&["api-security"]);
    let entry = SitemapEntry::new("https://roadmap.sh/backend/topics");
    let a = classify(entry.clone(), &roadmaps, &best);
    let b = classify(entry, &roadmaps, &best);
    assert_eq!(a, b);
}

#[test]
fn classification_ignores_identifier_order() {
    let forward = ids(&["frontend", "backend", "devops"]);
    let reversed: Vec<String> = forward.iter().rev().cloned().collect();
    let best = ids(&["api-security", "aws"]);
    let best_rev: Vec<String> = best.iter().rev().cloned().collect();

    for url in [
        "https://roadmap.sh/devops",
        "https://roadmap.sh/frontend/topics",
        "https://roadmap.sh/best-practices/aws",
        "https://roadmap.sh/guides/x",
        "https://roadmap.sh/nope",
    ] {
        assert_eq!(
            classify(SitemapEntry::new(url), &forward, &best),
            classify(SitemapEntry::new(url), &reversed, &best_rev),
            "{url}"
        );
    }
}
