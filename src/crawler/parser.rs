//! HTML parser adapter
//!
//! This module turns a response body into the three element lists the crawl
//! needs:
//! - Anchors that carry an `href` attribute
//! - Every image element
//! - Every `<base>` element
//!
//! Each element is copied out as its attribute map and text content, so the
//! parsed document is dropped before the crawl resumes.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// An element reduced to its attributes and text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// All attributes, keyed by name
    pub attributes: BTreeMap<String, String>,

    /// Trimmed text content
    pub text: String,
}

impl Element {
    /// Returns the value of attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Elements extracted from one HTML document
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// `<a href>` elements in document order
    pub anchors: Vec<Element>,

    /// `<img>` elements in document order
    pub images: Vec<Element>,

    /// `<base>` elements in document order
    pub bases: Vec<Element>,
}

/// Parses HTML content and extracts anchors, images and base declarations
///
/// Parsing is lenient: malformed markup yields whatever elements the HTML5
/// parser recovers, never an error.
///
/// # Example
///
/// ```
/// use linkwalk::crawler::parse_document;
///
/// let html = r#"<html><body><a href="/page">Link</a><img src="logo.png"></body></html>"#;
/// let doc = parse_document(html);
/// assert_eq!(doc.anchors[0].attr("href"), Some("/page"));
/// assert_eq!(doc.anchors[0].text, "Link");
/// assert_eq!(doc.images[0].attr("src"), Some("logo.png"));
/// assert!(doc.bases.is_empty());
/// ```
pub fn parse_document(html: &str) -> ParsedDocument {
    let document = Html::parse_document(html);

    ParsedDocument {
        anchors: select(&document, "a[href]"),
        images: select(&document, "img"),
        bases: select(&document, "base"),
    }
}

fn select(document: &Html, selector: &str) -> Vec<Element> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document.select(&selector).map(to_element).collect()
}

fn to_element(element: ElementRef<'_>) -> Element {
    let attributes = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Element {
        attributes,
        text: element.text().collect::<String>().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_anchor_with_attributes() {
        let html = r#"<html><body><a href="/page" class="nav" title="Go">  Link  </a></body></html>"#;
        let doc = parse_document(html);

        assert_eq!(doc.anchors.len(), 1);
        let anchor = &doc.anchors[0];
        assert_eq!(anchor.attr("href"), Some("/page"));
        assert_eq!(anchor.attr("class"), Some("nav"));
        assert_eq!(anchor.attr("title"), Some("Go"));
        assert_eq!(anchor.text, "Link");
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">Top</a><a href="">Empty</a></body></html>"#;
        let doc = parse_document(html);

        assert_eq!(doc.anchors.len(), 1);
        assert_eq!(doc.anchors[0].attr("href"), Some(""));
    }

    #[test]
    fn test_nested_anchor_text() {
        let html = r#"<html><body><a href="x.html"><span>Read</span> <b>more</b></a></body></html>"#;
        let doc = parse_document(html);
        assert_eq!(doc.anchors[0].text, "Read more");
    }

    #[test]
    fn test_images_with_and_without_src() {
        let html = r#"<html><body><img src="a.png" alt="A"><img alt="no source"></body></html>"#;
        let doc = parse_document(html);

        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.images[0].attr("src"), Some("a.png"));
        assert_eq!(doc.images[1].attr("src"), None);
        assert_eq!(doc.images[1].attr("alt"), Some("no source"));
        assert!(doc.images[0].text.is_empty());
    }

    #[test]
    fn test_base_elements() {
        let html = r#"<html><head><base href="/sub/"><base target="_blank"></head><body></body></html>"#;
        let doc = parse_document(html);

        assert_eq!(doc.bases.len(), 2);
        assert_eq!(doc.bases[0].attr("href"), Some("/sub/"));
        assert_eq!(doc.bases[1].attr("href"), None);
    }

    #[test]
    fn test_document_order() {
        let html = r#"
            <html>
            <body>
                <a href="/page1">Link 1</a>
                <a href="/page2">Link 2</a>
                <a href="https://other.com/page3">Link 3</a>
            </body>
            </html>
        "#;
        let doc = parse_document(html);
        let hrefs: Vec<_> = doc.anchors.iter().filter_map(|a| a.attr("href")).collect();
        assert_eq!(hrefs, ["/page1", "/page2", "https://other.com/page3"]);
    }

    #[test]
    fn test_not_html() {
        let doc = parse_document("just some text, no markup");
        assert!(doc.anchors.is_empty());
        assert!(doc.images.is_empty());
        assert!(doc.bases.is_empty());
    }
}
