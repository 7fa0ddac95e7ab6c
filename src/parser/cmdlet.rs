use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::blocks::{extract_code_blocks, DEFAULT_MAX_BLOCKS};
use super::{frontmatter, sections};
use crate::error::{IndexError, Result};

/// Namespace shared by every module directory and `Module Name` value.
pub const MODULE_PREFIX: &str = "Az.";

static MODULE_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Az\.[A-Za-z]+$").unwrap());
static CMDLET_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+-Az").unwrap());
static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*_`]").unwrap());

/// Fields pulled from one cmdlet reference page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDoc {
    pub name: String,
    pub module: String,
    pub description: String,
    pub syntax: String,
    pub examples: Vec<String>,
}

/// Read and classify one markdown file. `Ok(None)` means the file is not a
/// cmdlet page and should be skipped.
pub fn parse_file(path: &Path) -> Result<Option<CommandDoc>> {
    let bytes = std::fs::read(path).map_err(|e| IndexError::read(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(classify(path, &text))
}

/// Classify already-loaded document text. `path` supplies the file stem and
/// parent directory used as fallbacks for name and module.
pub fn classify(path: &Path, text: &str) -> Option<CommandDoc> {
    let front = frontmatter::parse(text);
    let stem = path.file_stem()?.to_string_lossy();

    // Module overview pages (Az.Compute.md)
    if MODULE_PAGE_RE.is_match(&stem) {
        return None;
    }

    let name = match front.get("title") {
        Some(title) if !title.is_empty() => title.clone(),
        _ => stem.to_string(),
    };
    if !is_cmdlet_name(&name) {
        return None;
    }

    let mut module = front.get("Module Name").cloned().unwrap_or_default();
    if module.is_empty() {
        if let Some(parent) = parent_dir_name(path) {
            if parent.starts_with(MODULE_PREFIX) {
                module = parent;
            }
        }
    }
    if !module.starts_with(MODULE_PREFIX) {
        return None;
    }

    let description = clean_description(&sections::extract(text, "SYNOPSIS"));
    let syntax = extract_code_blocks(&sections::extract(text, "SYNTAX"), 1)
        .into_iter()
        .next()
        .unwrap_or_default();
    let examples = extract_code_blocks(&sections::extract(text, "EXAMPLES"), DEFAULT_MAX_BLOCKS);

    Some(CommandDoc {
        name,
        module,
        description,
        syntax,
        examples,
    })
}

pub fn is_cmdlet_name(name: &str) -> bool {
    CMDLET_NAME_RE.is_match(name)
}

/// First synopsis line with links reduced to their text and emphasis/code
/// markers removed.
fn clean_description(synopsis: &str) -> String {
    let first = synopsis.lines().next().unwrap_or("").trim();
    let unlinked = MD_LINK_RE.replace_all(first, "$1");
    EMPHASIS_RE.replace_all(&unlinked, "").trim().to_string()
}

fn parent_dir_name(path: &Path) -> Option<String> {
    path.parent()?
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc_path(module_dir: &str, file: &str) -> PathBuf {
        PathBuf::from("azps-12.0.0").join(module_dir).join(file)
    }

    #[test]
    fn get_azvm_fixture() {
        let md = std::fs::read_to_string("tests/fixtures/Get-AzVM.md").unwrap();
        let doc = classify(&doc_path("Az.Compute", "Get-AzVM.md"), &md).unwrap();
        assert_eq!(doc.name, "Get-AzVM");
        assert_eq!(doc.module, "Az.Compute");
        assert_eq!(doc.description, "Gets the properties of a virtual machine.");
        assert!(doc.syntax.starts_with("Get-AzVM [[-ResourceGroupName] <String>]"));
        assert_eq!(doc.examples.len(), 3, "Expected 3 of 4 examples, got: {:?}", doc.examples);
        assert!(doc.examples.iter().all(|e| !e.contains('#')));
    }

    #[test]
    fn module_page_fixture_skipped() {
        let md = std::fs::read_to_string("tests/fixtures/Az.Compute.md").unwrap();
        assert!(classify(&doc_path("Az.Compute", "Az.Compute.md"), &md).is_none());
    }

    #[test]
    fn accepts_cmdlet_names() {
        for name in ["Get-AzVM", "New-AzResourceGroup", "Set-AzKeyVaultSecret", "Remove-Az"] {
            assert!(is_cmdlet_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_non_cmdlet_names() {
        for name in ["Az.Compute", "get-AzVM", "lowercase-az", "GET-AzVM", "Get-VM", "about_Az"] {
            assert!(!is_cmdlet_name(name), "{name} should be rejected");
        }
    }

    #[test]
    fn title_preferred_over_file_name() {
        let md = "---\ntitle: Get-AzFoo\nModule Name: Az.Foo\n---\n";
        let doc = classify(&doc_path("Az.Foo", "something-else.md"), md).unwrap();
        assert_eq!(doc.name, "Get-AzFoo");
    }

    #[test]
    fn file_name_fallback() {
        let doc = classify(&doc_path("Az.Foo", "New-AzFoo.md"), "## SYNOPSIS\nMakes a foo.").unwrap();
        assert_eq!(doc.name, "New-AzFoo");
        assert_eq!(doc.module, "Az.Foo");
        assert_eq!(doc.description, "Makes a foo.");
    }

    #[test]
    fn invalid_title_rejected() {
        let md = "---\ntitle: about_Az_Foo\nModule Name: Az.Foo\n---\n";
        assert!(classify(&doc_path("Az.Foo", "Get-AzFoo.md"), md).is_none());
    }

    #[test]
    fn module_from_front_matter_wins() {
        let md = "---\ntitle: Get-AzFoo\nModule Name: Az.Bar\n---\n";
        let doc = classify(&doc_path("Az.Foo", "Get-AzFoo.md"), md).unwrap();
        assert_eq!(doc.module, "Az.Bar");
    }

    #[test]
    fn unresolvable_module_rejected() {
        assert!(classify(&doc_path("docs", "Get-AzFoo.md"), "").is_none());
        let md = "---\nModule Name: Microsoft.Foo\n---\n";
        assert!(classify(&doc_path("Az.Foo", "Get-AzFoo.md"), md).is_none());
    }

    #[test]
    fn description_markup_cleaned() {
        let md = "## SYNOPSIS\nGets a **[virtual machine](https://x/vm)** in `RG_NAME`.\nSecond line.\n";
        let doc = classify(&doc_path("Az.Foo", "Get-AzFoo.md"), md).unwrap();
        assert_eq!(doc.description, "Gets a virtual machine in RGNAME.");
    }

    #[test]
    fn invalid_utf8_read_lossily() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("Az.Foo");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("Get-AzFoo.md");
        std::fs::write(&file, b"## SYNOPSIS\nGets \xff foo.\n").unwrap();

        let doc = parse_file(&file).unwrap().unwrap();
        assert_eq!(doc.name, "Get-AzFoo");
        assert_eq!(doc.description, "Gets \u{FFFD} foo.");
    }

    #[test]
    fn missing_sections_give_empty_fields() {
        let doc = classify(&doc_path("Az.Foo", "Get-AzFoo.md"), "# Get-AzFoo\n").unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.syntax, "");
        assert!(doc.examples.is_empty());
    }
}
