/// Checks if a URL matches a wildcard exclusion pattern
///
/// Patterns are matched against the full URL string. A `*` matches any run
/// of characters (including none); everything else matches literally. A
/// pattern without any `*` is an exact match.
///
/// # Examples
///
/// ```
/// use hearth::source::matches_pattern;
///
/// // Exact match
/// assert!(matches_pattern("https://example.com/about", "https://example.com/about"));
///
/// // Wildcard match
/// assert!(matches_pattern("*/internal/*", "https://example.com/internal/tools"));
/// assert!(matches_pattern("https://example.com/*", "https://example.com/en/"));
/// assert!(!matches_pattern("*/internal/*", "https://example.com/public"));
/// ```
pub fn matches_pattern(pattern: &str, candidate: &str) -> bool {
    let segments: Vec<&str> = pattern.split('*').collect();

    if segments.len() == 1 {
        return candidate == pattern;
    }

    let mut rest = candidate;

    // First segment must anchor at the start, last at the end
    let first = segments[0];
    if !rest.starts_with(first) {
        return false;
    }
    rest = &rest[first.len()..];

    let last = segments[segments.len() - 1];

    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}
