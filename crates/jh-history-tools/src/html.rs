//! Extraction of log text from the NodeManager's HTML log pages.

use std::sync::LazyLock;

use regex::Regex;

static PRE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    // (?is): case-insensitive, dot matches newlines. Lazy body so only the
    // first <pre> block is taken.
    Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").unwrap()
});

/// Extract the first `<pre>...</pre>` block of an HTML document, decode
/// the entities the log viewer escapes, and trim surrounding whitespace.
///
/// Returns an empty string when no block is present; callers treat empty
/// as "no content", not as an error.
pub fn extract_preformatted(html: &str) -> String {
    let Some(captures) = PRE_BLOCK.captures(html) else {
        return String::new();
    };
    let content = &captures[1];
    // The five entities the log viewer emits. No general numeric-reference
    // decoding; replacement order matches how the page was escaped.
    let decoded = content
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    decoded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_and_decodes() {
        assert_eq!(
            extract_preformatted("<html><pre>a &amp; b</pre></html>"),
            "a & b"
        );
    }

    #[test]
    fn missing_pre_is_empty() {
        assert_eq!(extract_preformatted("<html>no pre</html>"), "");
    }

    #[test]
    fn first_block_wins() {
        let html = "<pre>first</pre><pre>second</pre>";
        assert_eq!(extract_preformatted(html), "first");
    }

    #[test]
    fn case_insensitive_and_multiline() {
        let html = "<HTML><PRE class=\"logs\">line one\nline two</PRE></HTML>";
        assert_eq!(extract_preformatted(html), "line one\nline two");
    }

    #[test]
    fn decodes_all_five_entities() {
        let html = "<pre>&lt;tag&gt; &quot;q&quot; &#39;s&#39;&nbsp;end</pre>";
        assert_eq!(extract_preformatted(html), "<tag> \"q\" 's' end");
    }

    #[test]
    fn numeric_references_left_alone() {
        assert_eq!(extract_preformatted("<pre>&#60;kept&#62;</pre>"), "&#60;kept&#62;");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(extract_preformatted("<pre>\n  payload  \n</pre>"), "payload");
    }
}
