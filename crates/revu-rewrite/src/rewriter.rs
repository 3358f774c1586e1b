//! Streaming head rewriter.
//!
//! All rewrite targets (the title element and the og/twitter meta tags)
//! live inside `<head>`, so the rewriter buffers only until the head
//! closes, transforms it, and passes the rest of the document through
//! chunk-by-chunk. A bounded buffer guards pathological inputs; overflow
//! and non-UTF-8 heads degrade to unmodified passthrough.

use crate::meta::PageMeta;

const HEAD_CLOSE: &str = "</head>";

/// Cap on buffered head bytes before degrading to passthrough.
pub const DEFAULT_MAX_HEAD_BYTES: usize = 256 * 1024;

#[derive(Debug)]
enum State {
    Buffering(Vec<u8>),
    Passthrough,
}

/// Streaming tag-attribute/text substitution over the document head.
#[derive(Debug)]
pub struct MetaRewriter {
    meta: PageMeta,
    state: State,
    max_head_bytes: usize,
    rewrote: bool,
}

impl MetaRewriter {
    /// Create a rewriter for the given derived metadata.
    pub fn new(meta: PageMeta) -> Self {
        Self {
            meta,
            state: State::Buffering(Vec::new()),
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            rewrote: false,
        }
    }

    /// Override the head buffer cap.
    pub fn with_max_head_bytes(mut self, max: usize) -> Self {
        self.max_head_bytes = max;
        self
    }

    /// Feed a chunk of the upstream body; returns bytes ready to emit.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<u8> {
        let buf = match &mut self.state {
            State::Passthrough => return chunk.to_vec(),
            State::Buffering(buf) => buf,
        };
        buf.extend_from_slice(chunk);

        if let Some(at) = find_ci(buf, HEAD_CLOSE) {
            let split = at + HEAD_CLOSE.len();
            let rest = buf.split_off(split);
            let head = std::mem::take(buf);
            self.state = State::Passthrough;

            let mut out = match String::from_utf8(head) {
                Ok(head_str) => {
                    self.rewrote = true;
                    rewrite_head(&head_str, &self.meta).into_bytes()
                }
                // Not text we understand; leave the original bytes alone.
                Err(err) => err.into_bytes(),
            };
            out.extend_from_slice(&rest);
            return out;
        }

        if buf.len() > self.max_head_bytes {
            let out = std::mem::take(buf);
            self.state = State::Passthrough;
            return out;
        }

        Vec::new()
    }

    /// Signal end of input; returns whatever is still buffered,
    /// unmodified (a document without `</head>` is never touched).
    pub fn finish(&mut self) -> Vec<u8> {
        match std::mem::replace(&mut self.state, State::Passthrough) {
            State::Buffering(buf) => buf,
            State::Passthrough => Vec::new(),
        }
    }

    /// Whether the head was actually transformed.
    pub fn rewrote_head(&self) -> bool {
        self.rewrote
    }

    /// Rewrite a complete document in one pass.
    pub fn rewrite_document(meta: &PageMeta, html: &str) -> String {
        let mut rewriter = MetaRewriter::new(meta.clone());
        let mut out = rewriter.push(html.as_bytes());
        out.extend(rewriter.finish());
        String::from_utf8(out)
            .unwrap_or_else(|err| String::from_utf8_lossy(&err.into_bytes()).into_owned())
    }
}

/// Rewrite one head fragment: title inner text, then meta tags.
pub fn rewrite_head(head: &str, meta: &PageMeta) -> String {
    let with_title = rewrite_title(head, meta);
    rewrite_meta_tags(&with_title, meta)
}

fn rewrite_title(head: &str, meta: &PageMeta) -> String {
    let Some(open) = find_ci_str(head, "<title") else {
        return head.to_string();
    };
    let after = open + "<title".len();
    if !matches!(head.as_bytes().get(after), Some(b'>' | b' ' | b'\t' | b'\n' | b'\r')) {
        return head.to_string();
    }
    let Some(gt) = head[after..].find('>') else {
        return head.to_string();
    };
    let content_start = after + gt + 1;
    let Some(close) = find_ci_str(&head[content_start..], "</title") else {
        return head.to_string();
    };
    format!(
        "{}{}{}",
        &head[..content_start],
        escape_text(&meta.title),
        &head[content_start + close..]
    )
}

fn rewrite_meta_tags(head: &str, meta: &PageMeta) -> String {
    let mut out = String::with_capacity(head.len());
    let mut rest = head;

    loop {
        let Some(i) = find_ci_str(rest, "<meta") else {
            out.push_str(rest);
            break;
        };
        let after = i + "<meta".len();
        if !matches!(
            rest.as_bytes().get(after),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'/' | b'>')
        ) {
            out.push_str(&rest[..after]);
            rest = &rest[after..];
            continue;
        }
        let Some(end) = tag_end(&rest[i..]) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..i]);
        let tag = &rest[i..i + end];
        match rewrite_meta_tag(tag, meta) {
            Some(replaced) => out.push_str(&replaced),
            None => out.push_str(tag),
        }
        rest = &rest[i + end..];
    }

    out
}

/// Replace (or add) the `content` attribute of a meta tag whose
/// `property` names one of the rewritten values.
fn rewrite_meta_tag(tag: &str, meta: &PageMeta) -> Option<String> {
    let attrs = scan_attrs(tag);
    let property = attrs
        .iter()
        .find(|a| a.name == "property")
        .and_then(|a| a.value.as_deref())?;
    let new_value = meta.value_for(property.trim())?;
    let escaped = escape_attr(new_value);

    let content_span = attrs
        .iter()
        .find(|a| a.name == "content")
        .and_then(|a| a.value_span);

    match content_span {
        Some((start, end)) => Some(format!("{}{}{}", &tag[..start], escaped, &tag[end..])),
        None => {
            let insert_at = if tag.ends_with("/>") {
                tag.len() - 2
            } else {
                tag.len() - 1
            };
            Some(format!(
                r#"{} content="{}"{}"#,
                tag[..insert_at].trim_end(),
                escaped,
                &tag[insert_at..]
            ))
        }
    }
}

struct Attr {
    name: String,
    value: Option<String>,
    /// Span of the attribute value within the tag string.
    value_span: Option<(usize, usize)>,
}

fn scan_attrs(tag: &str) -> Vec<Attr> {
    let b = tag.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 1; // skip '<'

    // skip the tag name
    while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' {
        i += 1;
    }

    loop {
        while i < b.len() && (b[i].is_ascii_whitespace() || b[i] == b'/') {
            i += 1;
        }
        if i >= b.len() || b[i] == b'>' {
            break;
        }

        let name_start = i;
        while i < b.len()
            && !b[i].is_ascii_whitespace()
            && b[i] != b'='
            && b[i] != b'>'
            && b[i] != b'/'
        {
            i += 1;
        }
        let name = tag[name_start..i].to_ascii_lowercase();

        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }

        if i < b.len() && b[i] == b'=' {
            i += 1;
            while i < b.len() && b[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < b.len() && (b[i] == b'"' || b[i] == b'\'') {
                let quote = b[i];
                i += 1;
                let vstart = i;
                while i < b.len() && b[i] != quote {
                    i += 1;
                }
                let vend = i;
                if i < b.len() {
                    i += 1;
                }
                attrs.push(Attr {
                    name,
                    value: Some(tag[vstart..vend].to_string()),
                    value_span: Some((vstart, vend)),
                });
            } else {
                let vstart = i;
                while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' {
                    i += 1;
                }
                attrs.push(Attr {
                    name,
                    value: Some(tag[vstart..i].to_string()),
                    value_span: Some((vstart, i)),
                });
            }
        } else {
            attrs.push(Attr {
                name,
                value: None,
                value_span: None,
            });
        }
    }

    attrs
}

/// Index just past the closing `>` of the tag starting at byte 0,
/// quote-aware so attribute values may contain `>`.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &c) in s.as_bytes().iter().enumerate() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == b'"' || c == b'\'' => quote = Some(c),
            None if c == b'>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

fn find_ci(haystack: &[u8], needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

fn find_ci_str(haystack: &str, needle: &str) -> Option<usize> {
    find_ci(haystack.as_bytes(), needle)
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use revu_tenant::TenantConfig;
    use url::Url;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Roofing Experts - Leave a Review</title>
    <meta charset="utf-8">
    <meta property="og:title" content="Roofing Experts - Leave a Review">
    <meta property="og:description" content="Default description">
    <meta property="og:url" content="https://reviewsite.com/">
    <meta property="og:image" content="https://reviewsite.com/preview.png">
    <meta property="twitter:title" content="Roofing Experts - Leave a Review">
    <meta property="twitter:description" content="Default description">
    <meta property="twitter:url" content="https://reviewsite.com/">
    <meta property="twitter:image" content="https://reviewsite.com/preview.png">
</head>
<body>
<h1>Leave a review</h1>
</body>
</html>"#;

    fn summit_meta() -> PageMeta {
        let config = TenantConfig {
            company_name: Some("Summit Roofing".to_string()),
            ..Default::default()
        };
        let url = Url::parse("https://summit.reviewsite.com/").unwrap();
        PageMeta::derive(&config, &url, "summit")
    }

    #[test]
    fn test_rewrites_title_and_all_meta_tags() {
        let meta = summit_meta();
        let out = MetaRewriter::rewrite_document(&meta, PAGE);

        assert!(out.contains("<title>Share your experience about Summit Roofing!</title>"));
        assert!(out.contains(&format!(
            r#"<meta property="og:url" content="{}">"#,
            meta.canonical_url
        )));
        assert!(out.contains(&format!(
            r#"<meta property="twitter:url" content="{}">"#,
            meta.canonical_url
        )));
        assert!(out.contains(&format!(
            r#"<meta property="og:image" content="{}">"#,
            escape_attr(&meta.image_url)
        )));
        assert!(!out.contains("Default description"));
        // untouched parts survive byte-for-byte
        assert!(out.contains(r#"<meta charset="utf-8">"#));
        assert!(out.contains("<h1>Leave a review</h1>"));
    }

    #[test]
    fn test_chunked_output_matches_whole_document_rewrite() {
        let meta = summit_meta();
        let expected = MetaRewriter::rewrite_document(&meta, PAGE);

        // split in the middle of "</head>" to exercise carry-over
        for chunk_size in [1, 7, 64, 1024] {
            let mut rewriter = MetaRewriter::new(meta.clone());
            let mut out = Vec::new();
            for chunk in PAGE.as_bytes().chunks(chunk_size) {
                out.extend(rewriter.push(chunk));
            }
            out.extend(rewriter.finish());
            assert_eq!(String::from_utf8(out).unwrap(), expected, "chunk_size={}", chunk_size);
        }
    }

    #[test]
    fn test_document_without_head_passes_through_unchanged() {
        let meta = summit_meta();
        let body = "just some bytes, no head here";
        let mut rewriter = MetaRewriter::new(meta);
        let mut out = rewriter.push(body.as_bytes());
        out.extend(rewriter.finish());
        assert_eq!(out, body.as_bytes());
    }

    #[test]
    fn test_head_overflow_degrades_to_passthrough() {
        let meta = summit_meta();
        let mut rewriter = MetaRewriter::new(meta).with_max_head_bytes(16);
        let input = "<html><head><!-- a very long head without a close tag -->";
        let mut out = rewriter.push(input.as_bytes());
        out.extend(rewriter.push(b"more bytes"));
        out.extend(rewriter.finish());
        assert_eq!(out, format!("{}more bytes", input).into_bytes());
        assert!(!rewriter.rewrote_head());
    }

    #[test]
    fn test_single_quoted_and_reordered_attributes() {
        let meta = summit_meta();
        let head = "<head><meta content='old' property='og:title'></head>";
        let out = rewrite_head(head, &meta);
        assert!(out.contains(&format!("'{}'", escape_attr(&meta.title))));
        assert!(!out.contains("old"));
    }

    #[test]
    fn test_missing_content_attribute_is_added() {
        let meta = summit_meta();
        let head = r#"<head><meta property="og:title"></head>"#;
        let out = rewrite_head(head, &meta);
        assert!(out.contains(&format!(
            r#"<meta property="og:title" content="{}">"#,
            escape_attr(&meta.title)
        )));
    }

    #[test]
    fn test_unrelated_meta_tags_are_untouched() {
        let meta = summit_meta();
        let head =
            r#"<head><meta name="viewport" content="width=device-width"><meta property="og:type" content="website"></head>"#;
        let out = rewrite_head(head, &meta);
        assert_eq!(out, head);
    }

    #[test]
    fn test_display_name_with_markup_is_escaped() {
        let config = TenantConfig {
            company_name: Some(r#"A&B "Roofing" <Co>"#.to_string()),
            ..Default::default()
        };
        let url = Url::parse("https://reviewsite.com/").unwrap();
        let meta = PageMeta::derive(&config, &url, "ab");
        let out = rewrite_head(
            r#"<head><title>x</title><meta property="og:title" content="x"></head>"#,
            &meta,
        );
        assert!(out.contains("A&amp;B"));
        assert!(out.contains("&quot;Roofing&quot;"));
        assert!(!out.contains("<Co>"));
    }
}
