use crate::crawler::broken::FailureReason;
use crate::crawler::parser::Element;
use crate::crawler::record::UNDEFINED_TARGET;
use crate::url::resolve;

/// Target recorded when a page declares more than one `<base>` element
pub const MULTIPLE_BASE_TARGET: &str = "multiple base tags";

/// Effective base address of one page, plus any markup problem found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseResolution {
    /// Directory-form address relative references are resolved against
    pub address: String,

    /// Diagnostic target and reason for a malformed declaration
    pub problem: Option<(String, FailureReason)>,
}

/// Appends a trailing `/` unless the address already ends with one
pub fn with_trailing_separator(address: &str) -> String {
    if address.ends_with('/') {
        address.to_string()
    } else {
        format!("{}/", address)
    }
}

/// Determines the base address for a fetched page
///
/// - No `<base>`: the page address with a trailing `/`
/// - One `<base href>`: the href, resolved against the page address when
///   relative, cut after its last `/`
/// - One `<base>` without `href`: problem `"undefined"`, falls back to the
///   page address
/// - Several `<base>`: problem `"multiple base tags"`, falls back to the page
///   address
pub fn resolve_base(bases: &[Element], page_address: &str) -> BaseResolution {
    let fallback = with_trailing_separator(page_address);

    match bases {
        [] => BaseResolution {
            address: fallback,
            problem: None,
        },
        [base] => match base.attr("href") {
            Some(href) => BaseResolution {
                address: directory_form(&absolute_base(href.trim(), &fallback)),
                problem: None,
            },
            None => BaseResolution {
                address: fallback,
                problem: Some((UNDEFINED_TARGET.to_string(), FailureReason::MalformedBase)),
            },
        },
        _ => BaseResolution {
            address: fallback,
            problem: Some((MULTIPLE_BASE_TARGET.to_string(), FailureReason::MultipleBase)),
        },
    }
}

fn absolute_base(href: &str, page_address: &str) -> String {
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        href.to_string()
    } else if href.starts_with("//") {
        let scheme = page_address
            .split_once("://")
            .map_or("http", |(scheme, _)| scheme);
        format!("{}:{}", scheme, href)
    } else {
        resolve(page_address, href)
    }
}

/// Cuts an address after the last `/` of its path
///
/// A host-only address gets the root path, so `http://a.com` becomes
/// `http://a.com/`.
fn directory_form(address: &str) -> String {
    let authority_start = address.find("://").map_or(0, |index| index + 3);
    let rest = &address[authority_start..];
    let rest = &rest[..rest.find(['?', '#']).unwrap_or(rest.len())];

    match rest.rfind('/') {
        Some(index) => address[..=authority_start + index].to_string(),
        None => format!("{}/", &address[..authority_start + rest.len()]),
    }
}
