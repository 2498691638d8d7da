//! Output generation for sitemaps, the sitemap index, robots.txt and the run report.
//!
//! # Submodules
//!
//! - [`sitemap`]: Writes `urlset` sub-sitemaps, one per chunk of URLs
//! - [`index`]: Writes the `sitemapindex` document `sitemap.xml`
//! - [`robots`]: Writes `robots.txt` pointing at the index
//! - [`report`]: Writes the optional JSON run report
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── sitemap-1f2e3d4c.xml   # up to 5000 <url> entries each
//! ├── sitemap-9a8b7c6d.xml
//! ├── sitemap.xml            # index of the sub-sitemaps
//! └── robots.txt
//! ```

pub mod index;
pub mod report;
pub mod robots;
pub mod sitemap;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;

/// Namespace shared by `urlset` and `sitemapindex` documents.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render a sitemap-protocol document.
///
/// Both document kinds have the same shape: a namespaced root element with
/// one child per entry, each holding `loc` and `lastmod`.
///
/// ```text
/// <root xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <entry>
///     <loc>…</loc>
///     <lastmod>YYYY-MM-DD</lastmod>
///   </entry>
/// </root>
/// ```
pub(crate) fn render_document<'a, I>(
    root: &str,
    entry: &str,
    locs: I,
    lastmod: &str,
) -> Result<Vec<u8>, Box<dyn Error>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut start = BytesStart::new(root);
    start.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(start))?;

    for loc in locs {
        writer.write_event(Event::Start(BytesStart::new(entry)))?;
        write_text_element(&mut writer, "loc", loc)?;
        write_text_element(&mut writer, "lastmod", lastmod)?;
        writer.write_event(Event::End(BytesEnd::new(entry)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(root)))?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use regex::Regex;

    /// Every `<loc>` value in a rendered document, unescaped for the few entities we emit.
    pub(crate) fn locs(xml: &str) -> Vec<String> {
        let re = Regex::new(r"<loc>([^<]*)</loc>").unwrap();
        re.captures_iter(xml)
            .map(|c| {
                c[1].replace("&lt;", "<")
                    .replace("&gt;", ">")
                    .replace("&quot;", "\"")
                    .replace("&apos;", "'")
                    .replace("&amp;", "&")
            })
            .collect()
    }

    #[test]
    fn test_render_document_shape() {
        let xml = render_document("urlset", "url", ["https://x.io/", "https://x.io/a.html"], "2025-05-06").unwrap();
        let xml = String::from_utf8(xml).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert_eq!(xml.matches("<lastmod>2025-05-06</lastmod>").count(), 2);
        assert_eq!(locs(&xml), vec!["https://x.io/", "https://x.io/a.html"]);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_render_document_escapes_text() {
        let xml = render_document("urlset", "url", ["https://x.io/a&b.html"], "2025-05-06").unwrap();
        let xml = String::from_utf8(xml).unwrap();

        assert!(xml.contains("<loc>https://x.io/a&amp;b.html</loc>"));
        assert_eq!(locs(&xml), vec!["https://x.io/a&b.html"]);
    }

    #[test]
    fn test_render_document_without_entries() {
        let xml = render_document("sitemapindex", "sitemap", std::iter::empty(), "2025-05-06").unwrap();
        let xml = String::from_utf8(xml).unwrap();

        assert!(xml.contains("<sitemapindex"));
        assert!(xml.contains("</sitemapindex>"));
        assert!(!xml.contains("<sitemap>"));
    }
}
