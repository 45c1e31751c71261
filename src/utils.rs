use crate::parser::NodeRef;

use regex::Regex;
use std::sync::LazyLock;

/// Tags that never carry article prose.  Headings are included on purpose:
/// they repeat the title and must not be scored as body text.
pub const NOISE_TAGS: &[&str] = &[
    "script", "img", "ul", "time", "h1", "h2", "h3", "iframe", "style", "form", "footer",
    "figcaption", "nav",
];

/// Id / class fragments of blocks that add noise or duplicate text.
/// Matching is by substring, so short fragments catch whole families
/// (`img` → `img-wrapper`, `image-credit`, ...).
pub const NOISE_MARKERS: &[&str] = &[
    "image", "img", "video", "subheadline", "editor", "fondea", "resumen", "tags", "sidebar",
    "comment", "entry-title", "breaking_content", "pie", "tract", "caption", "tweet", "expert",
    "previous", "next", "compartir", "rightbar", "mas", "copyright", "instagram-media", "cookie",
    "paywall", "mainlist", "sitelist", "hidden",
];

/// Id / class fragments of blocks that usually hold the article text.  These
/// are stems, so `artic` matches both `article` and `articulo`, `cont`
/// matches `content` and `contenido`.
pub const CONTENT_MARKERS: &[&str] = &["artic", "summary", "cont", "note", "cuerpo", "body"];

/// Closing tags of block containers (plus `<br>`) that need a line break
/// after them so adjacent blocks do not run together once flattened.
pub static BLOCK_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|blockquote|div|h2|h3)\s*>|<br\s*/?>").unwrap()
});

static NORMALIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Detach every descendant of `node` that matches the CSS `selector`.
pub fn remove_tags_with_selector(node: &NodeRef, selector: &str) {
    for n in select_descendants(node, selector) {
        n.detach();
    }
}

/// Return all descendants of `node` that match `selector`, excluding `node`
/// itself, in document order.  An invalid selector returns an empty `Vec`
/// rather than panicking.
pub fn select_descendants(node: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match node.select(selector) {
        Ok(iter) => iter
            .filter_map(|e| {
                let n = e.as_node();
                if n == node { None } else { Some(n.clone()) }
            })
            .collect(),
        Err(_) => vec![],
    }
}

/// Append a `\n` after every block boundary in raw markup.
pub fn insert_block_breaks(html: &str) -> String {
    BLOCK_BOUNDARY.replace_all(html, "$0\n").to_string()
}

/// Collapse every run of two or more whitespace characters in `src` into a
/// single ASCII space.
pub fn normalize_text(src: &str) -> String {
    NORMALIZE_REGEX.replace_all(src, " ").to_string()
}

/// Length in characters, which is what every threshold in this crate counts.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Length in characters once whitespace runs are collapsed and the ends
/// trimmed.  Indentation and inserted block breaks do not count as text.
pub fn content_len(text: &str) -> usize {
    char_len(normalize_text(text).trim())
}

/// `true` if `haystack` contains any of `needles`.
pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_ref()))
}

/// Uppercase the first character and lowercase the rest.
///
/// ```rust
/// use gist_rs::shared_utils::title_case;
///
/// assert_eq!(title_case("méxico"), "México");
/// assert_eq!(title_case("ONU"), "Onu");
/// assert_eq!(title_case(""), "");
/// ```
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// `true` for non-empty tokens made only of numeric characters.
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}

/// `true` if the first character of `token` is uppercase.
pub fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_html;
    use crate::utils::*;

    #[test]
    fn block_breaks_follow_closing_tags() {
        let marked = insert_block_breaks("<div><p>One</p><P>Two</P ><br/>x<br>y</div><span>z</span>");
        assert_eq!(
            marked,
            "<div><p>One</p>\n<P>Two</P >\n<br/>\nx<br>\ny</div>\n<span>z</span>"
        );
    }

    #[test]
    fn block_breaks_cover_subheadings_and_quotes() {
        let marked = insert_block_breaks("<h2>a</h2><h3>b</h3><h4>c</h4><blockquote>d</blockquote>");
        assert_eq!(
            marked,
            "<h2>a</h2>\n<h3>b</h3>\n<h4>c</h4><blockquote>d</blockquote>\n"
        );
    }

    #[test]
    fn remove_tags_with_selector_detaches_every_match() {
        let doc = parse_html("<div><script>x()</script><p>keep</p><script>y()</script></div>");
        remove_tags_with_selector(&doc, "script");
        assert!(select_descendants(&doc, "script").is_empty());
        assert_eq!(doc.text_contents(), "keep");
    }

    #[test]
    fn select_descendants_tolerates_bad_selectors() {
        let doc = parse_html("<div><p>hello</p></div>");
        assert!(select_descendants(&doc, "p[").is_empty());
        assert_eq!(select_descendants(&doc, "p").len(), 1);
    }

    #[test]
    fn numeric_tokens() {
        assert!(is_numeric_token("2024"));
        assert!(is_numeric_token("٣"));
        assert!(!is_numeric_token("3.5"));
        assert!(!is_numeric_token("G20"));
        assert!(!is_numeric_token(""));
    }

    #[test]
    fn uppercase_detection_and_lengths() {
        assert!(starts_uppercase("Élite"));
        assert!(!starts_uppercase("élite"));
        assert!(!starts_uppercase(""));
        assert_eq!(char_len("año"), 3);
        assert_eq!(normalize_text("a  \n\n b c"), "a b c");
    }

    #[test]
    fn content_length_ignores_layout_whitespace() {
        assert_eq!(content_len("\n    uno\n\n   dos  \n"), 7);
        assert_eq!(content_len(&"   \n".repeat(50)), 0);
        assert_eq!(content_len("año"), 3);
    }
}
