use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static FRONT_MATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\s*\n(.*?\n)---").unwrap());

/// Flat `key: value` pairs from a leading `---` block.
pub type FrontMatter = HashMap<String, String>;

/// Parse the front matter block at the very top of `text`.
/// Missing or unterminated blocks yield an empty map.
pub fn parse(text: &str) -> FrontMatter {
    let mut fields = FrontMatter::new();
    let Some(caps) = FRONT_MATTER_RE.captures(text) else {
        return fields;
    };

    for line in caps[1].lines() {
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            fields.insert(key.trim().to_string(), value.to_string());
        }
    }
    fields
}

// ── Tests ──
