//! Restrictive HTML sanitization for host-rendered text.
//!
//! Release changelogs and author markup end up in the host's update UI,
//! so only a small allow-list of tags survives: anchors, line breaks,
//! paragraphs, bold, italic and lists. Disallowed tags are stripped
//! while their text content is kept, except `script` and `style` whose
//! content goes with them. Anchors keep `href` and `title` only, and an
//! `href` with a scripting scheme is dropped.

const ALLOWED_TAGS: &[&str] = &["a", "b", "br", "em", "i", "li", "p", "strong", "ul"];
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

struct Tag {
    name: String,
    closing: bool,
    attrs: Vec<(String, String)>,
    /// Byte offset just past the closing `>`.
    end: usize,
}

/// Reduces `input` to the allow-listed subset of HTML.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        match tail.as_bytes().get(1) {
            Some(b) if b.is_ascii_alphabetic() || *b == b'/' => match parse_tag(tail) {
                Some(tag) => {
                    if ALLOWED_TAGS.contains(&tag.name.as_str()) {
                        render_tag(&tag, &mut out);
                        rest = &tail[tag.end..];
                    } else if !tag.closing && (tag.name == "script" || tag.name == "style") {
                        rest = skip_element_content(&tail[tag.end..], &tag.name);
                    } else {
                        rest = &tail[tag.end..];
                    }
                }
                // Unterminated markup: drop the remainder rather than
                // emit a half-open tag.
                None => return out,
            },
            Some(b'!') => {
                rest = skip_declaration(tail);
            }
            _ => {
                // A '<' that opens no tag is plain text.
                out.push('<');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses one tag starting at the `<` in `tail`. Returns `None` when
/// the tag never closes.
fn parse_tag(tail: &str) -> Option<Tag> {
    let bytes = tail.as_bytes();
    let mut i = 1;
    let closing = bytes.get(1) == Some(&b'/');
    if closing {
        i = 2;
    }

    let name_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = tail[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        if bytes[i] == b'>' {
            return Some(Tag {
                name,
                closing,
                attrs,
                end: i + 1,
            });
        }

        let attr_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i == attr_start {
            i += 1;
            continue;
        }
        let attr_name = tail[attr_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
                value = tail[value_start..i].to_string();
                i += 1;
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = tail[value_start..i].to_string();
            }
        }
        attrs.push((attr_name, value));
    }
}

fn render_tag(tag: &Tag, out: &mut String) {
    if tag.closing {
        out.push_str("</");
        out.push_str(&tag.name);
        out.push('>');
        return;
    }

    out.push('<');
    out.push_str(&tag.name);
    if tag.name == "a" {
        for (name, value) in &tag.attrs {
            let keep = match name.as_str() {
                "href" => safe_href(value),
                "title" => true,
                _ => false,
            };
            if keep {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&value.replace('"', "&quot;"));
                out.push('"');
            }
        }
    }
    out.push('>');
}

fn safe_href(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    !BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Skips everything up to and including the close tag of `name`.
fn skip_element_content<'a>(rest: &'a str, name: &str) -> &'a str {
    let lower = rest.to_ascii_lowercase();
    let close = format!("</{}", name);
    match lower.find(&close) {
        Some(idx) => match rest[idx..].find('>') {
            Some(gt) => &rest[idx + gt + 1..],
            None => "",
        },
        None => "",
    }
}

/// Skips a comment or other `<!` declaration.
fn skip_declaration(tail: &str) -> &str {
    if let Some(stripped) = tail.strip_prefix("<!--") {
        match stripped.find("-->") {
            Some(idx) => &stripped[idx + 3..],
            None => "",
        }
    } else {
        match tail.find('>') {
            Some(idx) => &tail[idx + 1..],
            None => "",
        }
    }
}
