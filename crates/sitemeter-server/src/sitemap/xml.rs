//! Sitemap protocol XML (`<urlset>`).

use std::fmt::Write;

use sitemeter_core::sitemap::SitemapEntry;

const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

fn escape_xml(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for c in v.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_urlset(entries: &[SitemapEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(out, r#"<urlset xmlns="{XMLNS}">"#);
    for e in entries {
        let _ = writeln!(out, "  <url>");
        let _ = writeln!(out, "    <loc>{}</loc>", escape_xml(&e.url));
        if let Some(lastmod) = e.lastmod() {
            let _ = writeln!(out, "    <lastmod>{}</lastmod>", escape_xml(lastmod));
        }
        if let Some(cf) = e.changefreq {
            let _ = writeln!(out, "    <changefreq>{cf}</changefreq>");
        }
        if let Some(p) = e.priority {
            let _ = writeln!(out, "    <priority>{p:.1}</priority>");
        }
        let _ = writeln!(out, "  </url>");
    }
    out.push_str("</urlset>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitemeter_core::sitemap::ChangeFreq;

    #[test]
    fn renders_metadata() {
        let mut guide = SitemapEntry::new("https://roadmap.sh/guides/a").annotated(ChangeFreq::Monthly, 0.9);
        guide.extra.insert("lastmod".into(), "2024-05-01".into());
        let xml = render_urlset(&[
            SitemapEntry::new("https://roadmap.sh").annotated(ChangeFreq::Monthly, 1.0),
            guide,
        ]);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://roadmap.sh</loc>\n    <changefreq>monthly</changefreq>\n    <priority>1.0</priority>"));
        assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn escapes_special_characters() {
        let xml = render_urlset(&[SitemapEntry::new("https://roadmap.sh/guides/a?b=1&c=<'\">")]);
        assert!(xml.contains("<loc>https://roadmap.sh/guides/a?b=1&amp;c=&lt;&apos;&quot;&gt;</loc>"));
        assert!(!xml.contains("<changefreq>"));
    }
}
