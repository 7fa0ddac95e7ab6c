use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.+?)[ \t]*\r?$").unwrap());
static NEXT_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## ").unwrap());

/// Text under a `## <name>` heading (case-insensitive), up to the next
/// `## ` heading or end of document. Empty when the heading is absent.
///
/// Headings inside fenced code blocks are not special-cased.
pub fn extract(text: &str, name: &str) -> String {
    let wanted = name.to_lowercase();
    let Some(heading) = HEADING_RE
        .captures_iter(text)
        .find(|caps| caps[1].to_lowercase() == wanted)
        .and_then(|caps| caps.get(0))
    else {
        return String::new();
    };

    // Body begins on the line after the heading.
    let rest = &text[heading.end()..];
    let body = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => return String::new(),
    };
    let end = NEXT_HEADING_RE.find(body).map_or(body.len(), |m| m.start());
    body[..end].trim().to_string()
}

// ── Tests ──
