use url::Url;

/// Computes the canonical key used to compare two addresses
///
/// The same key is used by the frontier's dedup index, by the known-broken
/// index and by report grouping.
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the address; if it does not parse, the trimmed text is the key
/// 3. Lowercase scheme and host, drop default ports, remove dot segments
///    (done by the `url` parser)
/// 4. Remove the fragment
/// 5. Remove a trailing slash from any path other than the root
///
/// # Examples
///
/// ```
/// use linkwalk::url::canonical_key;
///
/// assert_eq!(canonical_key("HTTP://Example.COM/Docs/#intro"), "http://example.com/Docs");
/// assert_eq!(canonical_key("http://example.com"), "http://example.com/");
/// ```
pub fn canonical_key(address: &str) -> String {
    let trimmed = address.trim();

    let mut url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => return trimmed.to_string(),
    };

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let normalized_path = path.trim_end_matches('/').to_string();
        url.set_path(&normalized_path);
    }

    url.to_string()
}
