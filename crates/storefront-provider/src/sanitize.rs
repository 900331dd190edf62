//! HTML sanitization for article bodies.
//!
//! Article bodies arrive as editor-authored HTML. They are rendered as-is by
//! the presentation layer, so everything that can execute script is removed
//! before an [`Article`](storefront_core::Article) is built. Everything else
//! (headings, lists, links, images, inline formatting) is kept.
//!
//! The input is tokenized the way a browser reads tags: `/` separates
//! attributes like whitespace does, and a `>` inside a quoted attribute value
//! does not end the tag. Start tags are re-serialized with every kept
//! attribute value double-quoted.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Turns untrusted HTML into HTML that is safe to render.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

/// Elements removed together with everything inside them.
const BLOCKED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template",
];

/// Schemes that make any attribute value `#`, compared after entity decoding.
///
/// Every attribute is checked, not only `href`/`src`: SVG animation attributes
/// such as `values` can set a link target too, and take `;`-separated lists,
/// so a scheme anywhere in the value counts.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:text/html"];

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|([a-zA-Z]+));?").expect("valid entity regex")
});

/// Conservative default [`Sanitizer`].
///
/// Removes `script`, `style`, `iframe`, `object`, `embed`, `noscript` and
/// `template` elements with their content, drops comments, strips `on*`
/// event-handler attributes, and replaces `javascript:`/`vbscript:` URLs
/// (entity-encoded or not) with `#`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSanitizer;

impl Sanitizer for DefaultSanitizer {
    fn sanitize(&self, html: &str) -> String {
        // ASCII lowercasing keeps byte offsets identical to `html`.
        let lower = html.to_ascii_lowercase();
        let bytes = html.as_bytes();
        let mut out = String::with_capacity(html.len());
        let mut pos = 0;

        while let Some(offset) = html[pos..].find('<') {
            let start = pos + offset;
            out.push_str(&html[pos..start]);

            pos = match bytes.get(start + 1) {
                Some(b) if b.is_ascii_alphabetic() => {
                    let tag = parse_tag(html, start + 1);
                    if is_blocked(tag.name) {
                        skip_blocked_content(&lower, tag.end, tag.name)
                    } else {
                        write_start_tag(&mut out, &tag);
                        tag.end
                    }
                }
                Some(b'/') if bytes.get(start + 2).is_some_and(u8::is_ascii_alphabetic) => {
                    let tag = parse_tag(html, start + 2);
                    if !is_blocked(tag.name) {
                        out.push_str("</");
                        out.push_str(tag.name);
                        out.push('>');
                    }
                    tag.end
                }
                Some(b'!' | b'?' | b'/') => skip_markup_declaration(html, start),
                _ => {
                    out.push('<');
                    start + 1
                }
            };
        }

        out.push_str(&html[pos..]);
        out
    }
}

#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    attributes: Vec<Attribute<'a>>,
    self_closing: bool,
    /// Byte offset just past the closing `>` (or the end of input).
    end: usize,
}

#[derive(Debug)]
struct Attribute<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

fn is_tag_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

fn is_blocked(name: &str) -> bool {
    BLOCKED_ELEMENTS
        .iter()
        .any(|blocked| name.eq_ignore_ascii_case(blocked))
}

/// Parses a tag whose name starts at `name_start`.
fn parse_tag(html: &str, name_start: usize) -> Tag<'_> {
    let bytes = html.as_bytes();
    let mut i = name_start;
    while i < bytes.len() && !is_tag_delimiter(bytes[i]) {
        i += 1;
    }
    let name = &html[name_start..i];

    let mut attributes = Vec::new();
    let mut self_closing;
    loop {
        self_closing = false;
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            self_closing = bytes[i] == b'/';
            i += 1;
        }
        match bytes.get(i) {
            None => break,
            Some(b'>') => {
                i += 1;
                break;
            }
            Some(_) => {}
        }

        // A leading `=` belongs to the name.
        let name_start = i;
        i += 1;
        while i < bytes.len() && !is_tag_delimiter(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        let attr_name = &html[name_start..i];

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }

        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let value = match bytes.get(j) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let value_start = j + 1;
                match html[value_start..].find(char::from(quote)) {
                    Some(len) => {
                        i = value_start + len + 1;
                        &html[value_start..value_start + len]
                    }
                    None => {
                        i = html.len();
                        &html[value_start..]
                    }
                }
            }
            _ => {
                let value_start = j;
                i = j;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                &html[value_start..i]
            }
        };
        attributes.push(Attribute {
            name: attr_name,
            value: Some(value),
        });
    }

    Tag {
        name,
        attributes,
        self_closing,
        end: i,
    }
}

fn write_start_tag(out: &mut String, tag: &Tag<'_>) {
    out.push('<');
    out.push_str(tag.name);
    for attr in &tag.attributes {
        if !is_plain_attribute_name(attr.name) || is_event_handler(attr.name) {
            continue;
        }
        out.push(' ');
        out.push_str(attr.name);
        let Some(value) = attr.value else {
            continue;
        };
        let value = if has_blocked_scheme(value) {
            "#"
        } else {
            value
        };
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    if tag.self_closing {
        out.push('/');
    }
    out.push('>');
}

fn is_plain_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'))
}

fn is_event_handler(name: &str) -> bool {
    name.len() > 2 && name[..2].eq_ignore_ascii_case("on")
}

/// Browsers ignore whitespace and control characters inside a scheme and
/// decode entities before resolving it.
fn has_blocked_scheme(value: &str) -> bool {
    let decoded: String = decode_entities(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();
    BLOCKED_SCHEMES
        .iter()
        .any(|scheme| decoded.contains(scheme))
}

fn decode_entities(value: &str) -> Cow<'_, str> {
    ENTITY.replace_all(value, |caps: &Captures<'_>| {
        let numeric = caps
            .get(1)
            .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
            .or_else(|| caps.get(2).and_then(|dec| dec.as_str().parse().ok()));
        if let Some(code) = numeric {
            return char::from_u32(code).map(String::from).unwrap_or_default();
        }
        let named = caps.get(3).map_or("", |m| m.as_str());
        match named.to_ascii_lowercase().as_str() {
            "colon" => ":".to_owned(),
            "tab" => "\t".to_owned(),
            "newline" => "\n".to_owned(),
            "sol" => "/".to_owned(),
            "amp" => "&".to_owned(),
            "lt" => "<".to_owned(),
            "gt" => ">".to_owned(),
            "quot" => "\"".to_owned(),
            "apos" => "'".to_owned(),
            "lpar" => "(".to_owned(),
            "rpar" => ")".to_owned(),
            _ if caps.get(1).is_some() || caps.get(2).is_some() => String::new(),
            _ => caps[0].to_owned(),
        }
    })
}

/// Returns the offset just past `</name ...>`, or the end of input when the
/// element is never closed.
fn skip_blocked_content(lower: &str, from: usize, name: &str) -> usize {
    let needle = format!("</{}", name.to_ascii_lowercase());
    let bytes = lower.as_bytes();
    let mut search = from;
    while let Some(offset) = lower[search..].find(needle.as_str()) {
        let after = search + offset + needle.len();
        if bytes.get(after).is_none_or(|b| is_tag_delimiter(*b)) {
            return lower[after..]
                .find('>')
                .map_or(lower.len(), |gt| after + gt + 1);
        }
        search = after;
    }
    lower.len()
}

/// Comments, doctypes, processing instructions and bogus end tags.
fn skip_markup_declaration(html: &str, start: usize) -> usize {
    if html[start..].starts_with("<!--") {
        return html[start + 4..]
            .find("-->")
            .map_or(html.len(), |end| start + 4 + end + 3);
    }
    html[start..]
        .find('>')
        .map_or(html.len(), |end| start + end + 1)
}
