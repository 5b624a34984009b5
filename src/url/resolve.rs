/// Resolves a relative reference against the address of the current page
///
/// This is a segment walk over `/`-separated parts rather than a full RFC 3986
/// merge:
///
/// 1. Split the current address on `/` and drop its last segment (the document
///    name, or the empty segment after a trailing `/`)
/// 2. A root-relative reference (`/...`) restarts from `scheme://host`
/// 3. Walk the reference: `.` is skipped, `..` pops one segment, anything else
///    is pushed
///
/// `..` never pops below `scheme://host`. A reference ending in `.` or `..`
/// yields a directory address with a trailing `/`. A `?query` or `#fragment`
/// on the reference is kept out of the walk and re-appended, and any query or
/// fragment on the current address is ignored.
///
/// The function is pure: no parsing, no network access.
///
/// # Examples
///
/// ```
/// use linkwalk::url::resolve;
///
/// let page = "http://a.com/dir/page.html";
/// assert_eq!(resolve(page, "../x.html"), "http://a.com/x.html");
/// assert_eq!(resolve(page, "./y.html"), "http://a.com/dir/y.html");
/// assert_eq!(resolve(page, "/z.html"), "http://a.com/z.html");
/// ```
pub fn resolve(current: &str, reference: &str) -> String {
    let (current_path, _) = split_suffix(current);
    let (reference_path, suffix) = split_suffix(reference);

    // Query-only reference: keeps the current document
    if reference_path.is_empty() && !suffix.is_empty() {
        return format!("{}{}", current_path, suffix);
    }

    let root_len = root_len(current_path);
    let mut stack: Vec<&str> = current_path.split('/').collect();
    if stack.len() > root_len {
        stack.pop();
    }

    let segments = match reference_path.strip_prefix('/') {
        Some(rest) => {
            stack.truncate(root_len);
            rest
        }
        None => reference_path,
    };

    let mut ends_in_dot_segment = false;
    for segment in segments.split('/') {
        ends_in_dot_segment = false;
        match segment {
            "." => ends_in_dot_segment = true,
            ".." => {
                if stack.len() > root_len {
                    stack.pop();
                }
                ends_in_dot_segment = true;
            }
            _ => stack.push(segment),
        }
    }

    if ends_in_dot_segment {
        stack.push("");
    }

    let mut resolved = stack.join("/");
    resolved.push_str(suffix);
    resolved
}

/// Number of leading segments that make up `scheme://host`
fn root_len(address: &str) -> usize {
    if address.contains("://") {
        3
    } else {
        0
    }
}

/// Splits an address at its first `?` or `#`
fn split_suffix(address: &str) -> (&str, &str) {
    match address.find(|c: char| c == '?' || c == '#') {
        Some(index) => address.split_at(index),
        None => (address, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "http://a.com/dir/page.html";

    #[test]
    fn test_parent_reference() {
        assert_eq!(resolve(PAGE, "../x.html"), "http://a.com/x.html");
    }

    #[test]
    fn test_current_directory_reference() {
        assert_eq!(resolve(PAGE, "./y.html"), "http://a.com/dir/y.html");
    }

    #[test]
    fn test_root_relative_reference() {
        assert_eq!(resolve(PAGE, "/z.html"), "http://a.com/z.html");
        assert_eq!(resolve(PAGE, "/a/b/c.html"), "http://a.com/a/b/c.html");
    }

    #[test]
    fn test_plain_relative_reference() {
        assert_eq!(resolve(PAGE, "other.html"), "http://a.com/dir/other.html");
        assert_eq!(resolve(PAGE, "sub/deep.html"), "http://a.com/dir/sub/deep.html");
    }

    #[test]
    fn test_empty_reference() {
        assert_eq!(resolve(PAGE, ""), "http://a.com/dir/");
    }

    #[test]
    fn test_dot_reference() {
        assert_eq!(resolve(PAGE, "."), "http://a.com/dir/");
    }

    #[test]
    fn test_dot_dot_reference() {
        assert_eq!(resolve(PAGE, ".."), "http://a.com/");
    }

    #[test]
    fn test_multiple_parent_segments() {
        let deep = "http://a.com/one/two/three/page.html";
        assert_eq!(resolve(deep, "../../x.html"), "http://a.com/one/x.html");
        assert_eq!(resolve(deep, "../.././../x.html"), "http://a.com/x.html");
    }

    #[test]
    fn test_never_escapes_host_root() {
        for depth in 1..10 {
            let reference = format!("{}x.html", "../".repeat(depth));
            assert_eq!(resolve(PAGE, &reference), "http://a.com/x.html");
        }
        assert_eq!(resolve(PAGE, "/../../x.html"), "http://a.com/x.html");
    }

    #[test]
    fn test_directory_base_with_trailing_separator() {
        assert_eq!(
            resolve("http://a.com/sub/", "page2.html"),
            "http://a.com/sub/page2.html"
        );
    }

    #[test]
    fn test_page_address_with_appended_separator() {
        // The fetched page address gets a trailing separator before extraction
        assert_eq!(
            resolve("http://a.com/dir/page.html/", "x.html"),
            "http://a.com/dir/page.html/x.html"
        );
    }

    #[test]
    fn test_host_only_current_address() {
        assert_eq!(resolve("http://a.com", "x.html"), "http://a.com/x.html");
        assert_eq!(resolve("http://a.com/", "../x.html"), "http://a.com/x.html");
    }

    #[test]
    fn test_query_and_fragment_kept_out_of_walk() {
        assert_eq!(
            resolve(PAGE, "search.html?q=../etc"),
            "http://a.com/dir/search.html?q=../etc"
        );
        assert_eq!(
            resolve(PAGE, "../x.html#part/2"),
            "http://a.com/x.html#part/2"
        );
        assert_eq!(
            resolve("http://a.com/dir/page.html?from=/a/b", "y.html"),
            "http://a.com/dir/y.html"
        );
    }

    #[test]
    fn test_query_only_reference() {
        assert_eq!(resolve(PAGE, "?page=2"), "http://a.com/dir/page.html?page=2");
    }

    #[test]
    fn test_deterministic() {
        let first = resolve(PAGE, "../a/./b/../c.html");
        let second = resolve(PAGE, "../a/./b/../c.html");
        assert_eq!(first, second);
        assert_eq!(first, "http://a.com/a/c.html");
    }
}
