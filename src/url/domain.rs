use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the lowercase host from a parsed URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkwalk::url::extract_hostname;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_hostname(&url), Some("example.com".to_string()));
/// ```
pub fn extract_hostname(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses a seed address and returns its hostname
///
/// The seed must be an absolute `http`/`https` URL with a host.
pub fn seed_hostname(seed: &str) -> UrlResult<String> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    extract_hostname(&url).ok_or_else(|| UrlError::MissingHost(seed.to_string()))
}

/// Returns the lowercase host portion of an absolute address without parsing it
///
/// This is the text between `://` and the next `/`, `?` or `#`, minus any
/// `user@` prefix. The port, if present, stays attached.
pub fn host_portion(address: &str) -> Option<String> {
    let (_, rest) = address.split_once("://")?;
    let end = rest
        .find(|c: char| c == '/' || c == '?' || c == '#')
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = match authority.rsplit_once('@') {
        Some((_, host)) => host,
        None => authority,
    };
    Some(host.to_lowercase())
}
