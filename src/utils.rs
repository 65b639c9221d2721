use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// HTML phrasing-content tag names per the [HTML spec](https://html.spec.whatwg.org/multipage/dom.html#phrasing-content).
/// A `pre` nested in any of these (or in a `p`) renders inline.
pub static PHRASING_ELEMENTS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "a", "abbr", "audio", "b", "bdo", "big", "br", "button", "cite", "code", "data", "datalist",
        "dfn", "em", "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter",
        "noscript", "object", "output", "progress", "q", "ruby", "samp", "select", "small",
        "span", "strong", "sub", "sup", "textarea", "time", "tt", "var", "wbr",
    ])
});

/// Elements whose whole subtree is dropped by the front-end.
pub static SKIPPED_ELEMENTS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from(["head", "script", "style", "noscript", "template", "title", "meta", "link"])
});

/// Parents under which whitespace-only text is significant.
pub static WHITESPACE_KEEPING_ELEMENTS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from(["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th"])
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Matches an image caption already written as `|substitution|`.
pub static SUBSTITUTION_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|.+\|$").unwrap());

/// Matches a named hyperlink reference such as `` `text`_ ``.
pub static NAMED_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`.+`_$").unwrap());

/// Collapse every whitespace run in `src` (newlines and tabs included) into a
/// single ASCII space.  Leading and trailing runs are kept as one space.
pub fn normalize_text(src: &str) -> String {
    WHITESPACE_RUN.replace_all(src, " ").into_owned()
}

/// Decode every named (`&eacute;`, `&nbsp;`, ...) and numeric (`&#233;`,
/// `&#xE9;`) character reference in `value`.  Unknown references are left
/// as written.
pub fn unescape_html_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    html_escape::decode_html_entities(value).into_owned()
}

/// `true` for `data:` URIs (and a bare `data` scheme with nothing after it).
pub fn is_data_uri(src: &str) -> bool {
    src.split(':').next() == Some("data")
}

/// The last path component of `src`, used as an image caption of last
/// resort.  Query and fragment are ignored for absolute URLs.  Falls back to
/// `src` itself when the path ends with a slash.
pub fn file_name_of(src: &str) -> String {
    let path_name = match url::Url::parse(src) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string)),
        Err(_) => src.rsplit('/').next().map(str::to_string),
    };
    match path_name {
        Some(name) if !name.is_empty() => name,
        _ => src.to_string(),
    }
}

/// Resolve a `<base href>` value against the document URI.  If
/// `base_path` is empty the document URI is returned unchanged.
pub fn resolve_base_uri(doc_uri: &str, base_path: &str) -> String {
    if base_path.is_empty() {
        return doc_uri.to_string();
    }
    url::Url::parse(doc_uri)
        .and_then(|parsed| parsed.join(base_path))
        .map(String::from)
        .unwrap_or_else(|_| base_path.to_string())
}

/// Convert a potentially-relative URI to an absolute one using the
/// document URI and an optional `<base href>` path.  Bare hash links
/// (`#…`) are left as-is when they resolve to the same document.
pub fn to_absolute_uri(uri: &str, doc_uri: &str, base_path: &str) -> String {
    let uri = uri.trim();
    if let Ok(parsed) = url::Url::parse(uri) {
        return parsed.into();
    }
    if uri.starts_with('#') && (base_path.is_empty() || resolve_base_uri(doc_uri, base_path) == doc_uri) {
        return uri.to_string();
    }
    let base_uri = resolve_base_uri(doc_uri, base_path);
    url::Url::parse(base_uri.as_str())
        .and_then(|base| base.join(uri))
        .map(String::from)
        .unwrap_or_else(|_| uri.to_string())
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn normalize_text_collapses_newlines_and_tabs() {
        assert_eq!(normalize_text("a\n\t  b  "), "a b ");
        assert_eq!(normalize_text("plain"), "plain");
    }

    #[test]
    fn unescape_handles_named_and_numeric_references() {
        assert_eq!(unescape_html_entities("a &lt;b&gt; &amp; c"), "a <b> & c");
        assert_eq!(unescape_html_entities("caf&eacute; &#233; &#xE9;"), "café é é");
        assert_eq!(unescape_html_entities("no entities"), "no entities");
    }

    #[test]
    fn data_uri_detection_uses_the_scheme() {
        assert!(is_data_uri("data:image/png;base64,iVBORw0KGgo="));
        assert!(is_data_uri("data"));
        assert!(!is_data_uri("http://example.com/data.png"));
        assert!(!is_data_uri("/images/data:1.png"));
    }

    #[test]
    fn file_name_of_relative_and_absolute_sources() {
        assert_eq!(file_name_of("/url/to/image.png"), "image.png");
        assert_eq!(file_name_of("image.png"), "image.png");
        assert_eq!(file_name_of("http://example.com/a/b.jpg?size=2"), "b.jpg");
        assert_eq!(file_name_of("http://example.com/"), "http://example.com/");
    }

    #[test]
    fn wrapped_span_patterns() {
        assert!(SUBSTITUTION_REFERENCE.is_match("|logo|"));
        assert!(!SUBSTITUTION_REFERENCE.is_match("||"));
        assert!(NAMED_REFERENCE.is_match("`home`_"));
        assert!(!NAMED_REFERENCE.is_match("`home`"));
    }

    #[test]
    fn test_resolve_url_with_normal_base_and_relative() {
        let result = to_absolute_uri("index.html", "http://example.com", "");
        assert_eq!(result, "http://example.com/index.html");
    }

    #[test]
    fn test_resolve_url_with_normal_base_as_file_url_and_relative() {
        let result = to_absolute_uri("foo/bar/index.html", "http://fakehost/test/page.html", "");
        assert_eq!(result, "http://fakehost/test/foo/bar/index.html");
    }

    #[test]
    fn test_resolve_url_with_base_path() {
        let result = to_absolute_uri("index.html", "http://fakehost/test/page.html", "/foo/");
        assert_eq!(result, "http://fakehost/foo/index.html");
    }

    #[test]
    fn test_resolve_url_with_full_url() {
        let result = to_absolute_uri("http://example.com/index.html", "http://example.com/", "");
        assert_eq!(result, "http://example.com/index.html");
    }

    #[test]
    fn test_hash_link_without_base_is_kept() {
        let result = to_absolute_uri("#top", "http://fakehost/test/page.html", "");
        assert_eq!(result, "#top");
    }
}
