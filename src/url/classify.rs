use crate::url::domain::{host_portion, seed_hostname};
use crate::url::resolve::resolve;
use crate::UrlResult;

/// Reference prefixes that can never be fetched over HTTP
pub const SKIPPED_PREFIXES: &[&str] = &[
    "afs:",
    "cid:",
    "file:",
    "ftp:",
    "mailto:",
    "mid:",
    "news:",
    "x-exec:",
    "#",
    "javascript:",
    "tel:",
    "data:",
];

/// Extensions of media and document files that are never checked
pub const SKIPPED_EXTENSIONS: &[&str] = &[
    ".mp3", ".mp4", ".webm", ".wav", ".flac", ".ogg", ".pdf", ".avi", ".mov", ".mkv", ".m4a",
    ".aac", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".zip",
];

/// Outcome of classifying one discovered reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The reference is missing or empty; recorded as broken markup
    Malformed,
    /// Not worth visiting; neither enqueued nor recorded
    Skip,
    /// Visit this absolute address
    Accept(String),
}

/// Decides whether a discovered reference should be visited
///
/// Rules, in order:
///
/// 1. Missing or empty reference → [`Classification::Malformed`]
/// 2. Non-fetchable scheme or skipped file extension → [`Classification::Skip`]
/// 3. Absolute `http(s)://` (or protocol-relative `//`) reference → accepted
///    when its host contains the crawl's hostname, or when external links are
///    allowed; skipped otherwise
/// 4. Anything else is relative and is resolved against the current base;
///    the resolved address goes through the same host check as rule 3, so a
///    `<base>` pointing at another host cannot lead the crawl off-site
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    hostname: String,
    allow_external: bool,
}

impl LinkClassifier {
    /// Creates a classifier for an explicit hostname
    pub fn new(hostname: impl Into<String>, allow_external: bool) -> Self {
        Self {
            hostname: hostname.into().to_lowercase(),
            allow_external,
        }
    }

    /// Creates a classifier whose hostname is taken from the seed address
    pub fn for_seed(seed: &str, allow_external: bool) -> UrlResult<Self> {
        Ok(Self::new(seed_hostname(seed)?, allow_external))
    }

    /// The hostname used for same-host checks
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Whether absolute links to other hosts are accepted
    pub fn allow_external(&self) -> bool {
        self.allow_external
    }

    /// Classifies `href` as found on a page whose effective base is `base`
    pub fn classify(&self, href: Option<&str>, base: &str) -> Classification {
        let href = match href.map(str::trim) {
            None | Some("") => return Classification::Malformed,
            Some(href) => href,
        };

        if is_skipped(href) {
            return Classification::Skip;
        }

        let target = absolute_form(href, base).unwrap_or_else(|| resolve(base, href));
        if self.allow_external || self.is_same_host(&target) {
            Classification::Accept(target)
        } else {
            Classification::Skip
        }
    }

    /// Whether the host portion of an absolute address contains the crawl's hostname
    pub fn is_same_host(&self, address: &str) -> bool {
        host_portion(address).is_some_and(|host| host.contains(&self.hostname))
    }
}

/// Non-fetchable scheme or media/document extension
fn is_skipped(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();

    if SKIPPED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return true;
    }

    let path = match lower.find(|c: char| c == '?' || c == '#') {
        Some(index) => &lower[..index],
        None => lower.as_str(),
    };
    SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns the absolute address for `http(s)://` and `//` references
fn absolute_form(href: &str, base: &str) -> Option<String> {
    if href.starts_with("//") {
        let scheme = base.split_once("://").map_or("http", |(scheme, _)| scheme);
        return Some(format!("{}:{}", scheme, href));
    }

    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(href.to_string())
    } else {
        None
    }
}
