use std::sync::LazyLock;

use regex::Regex;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:powershell|ps1|posh)?\s*\n(.*?)```").unwrap());

pub const DEFAULT_MAX_BLOCKS: usize = 3;

/// Up to `max` fenced code blocks from `section`, in source order.
///
/// Lines whose trimmed text starts with `#` are dropped as comments, and a
/// block left empty afterwards is skipped. Only the first `max` fences are
/// considered, so skipped blocks still count toward the limit.
pub fn extract_code_blocks(section: &str, max: usize) -> Vec<String> {
    FENCE_RE
        .captures_iter(section)
        .take(max)
        .filter_map(|caps| {
            let code = caps[1]
                .trim()
                .lines()
                .filter(|line| !line.trim().starts_with('#'))
                .collect::<Vec<_>>()
                .join("\n");
            let code = code.trim();
            (!code.is_empty()).then(|| code.to_string())
        })
        .collect()
}

// ── Tests ──
