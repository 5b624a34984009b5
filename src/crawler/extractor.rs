use crate::crawler::parser::{Element, ParsedDocument};
use crate::crawler::record::{LinkRecord, UNDEFINED_TARGET};
use crate::url::{Classification, LinkClassifier};

/// References found on one page, after classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Records to offer to the frontier, in document order
    pub accepted: Vec<LinkRecord>,

    /// Records whose reference was missing or empty
    pub malformed: Vec<LinkRecord>,
}

/// Walks the anchors and then the images of a parsed page
///
/// Anchors contribute their `href` and text; images contribute their `src`
/// with empty text. Every record gets `base` as its origin and the
/// element's full attribute map. Skipped references are dropped here.
pub fn extract(doc: &ParsedDocument, base: &str, classifier: &LinkClassifier) -> Extraction {
    let mut extraction = Extraction::default();

    let anchors = doc.anchors.iter().map(|el| (el, "href", true));
    let images = doc.images.iter().map(|el| (el, "src", false));

    for (element, attribute, is_anchor) in anchors.chain(images) {
        let reference = element.attr(attribute);
        let text = if is_anchor { element.text.as_str() } else { "" };

        match classifier.classify(reference, base) {
            Classification::Accept(target) => {
                extraction.accepted.push(record(base, target, element, text));
            }
            Classification::Malformed => {
                let target = reference.unwrap_or(UNDEFINED_TARGET).to_string();
                extraction.malformed.push(record(base, target, element, text));
            }
            Classification::Skip => {
                tracing::debug!("Skipping reference {:?} on {}", reference, base);
            }
        }
    }

    extraction
}

fn record(base: &str, target: String, element: &Element, text: &str) -> LinkRecord {
    LinkRecord::new(base, target)
        .with_attributes(element.attributes.clone())
        .with_text(text)
}
