use std::collections::BTreeMap;

/// Origin used for the synthetic record that seeds every crawl
pub const SEED_ORIGIN: &str = "manual start setup";

/// Target recorded when a reference attribute is missing altogether
pub const UNDEFINED_TARGET: &str = "undefined";

/// One discovered reference: where it was found and where it points
///
/// Records are created by the link extractor and moved, never shared,
/// between the frontier and the broken set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Base address of the page the reference was found on
    pub origin: String,

    /// Absolute address the reference points to
    pub target: String,

    /// All attributes of the referencing element
    pub attributes: BTreeMap<String, String>,

    /// Text content of the element (empty for images)
    pub text: String,
}

impl LinkRecord {
    /// Creates a record with no attributes and no text
    pub fn new(origin: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            target: target.into(),
            attributes: BTreeMap::new(),
            text: String::new(),
        }
    }

    /// The record that starts a crawl at `seed`
    pub fn seed(seed: impl Into<String>) -> Self {
        Self::new(SEED_ORIGIN, seed)
    }

    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}
