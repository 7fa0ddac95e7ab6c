use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::category::category_for;
use crate::error::{IndexError, Result};
use crate::parser::{self, cmdlet::MODULE_PREFIX, frontmatter};
use crate::resolver::{release_version, FALLBACK_VERSION};

static VERB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Z][a-z]+)-Az").unwrap());

const DEFAULT_VERB: &str = "Other";

/// One row of `manifest.json`. Keys are shortened to keep the file small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "v")]
    pub verb: String,
    #[serde(rename = "m")]
    pub module: String,
    #[serde(rename = "c")]
    pub category: String,
    #[serde(rename = "e")]
    pub has_examples: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    #[serde(rename = "v")]
    pub version: String,
    #[serde(rename = "d")]
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdletEntry {
    pub syntax: String,
    pub examples: Vec<String>,
}

/// Per-module payload; `cmdlets` maps cmdlet name to a serialized [`CmdletEntry`]
/// in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleBundle {
    pub module: String,
    pub version: String,
    pub cmdlets: Map<String, Value>,
}

/// Everything the writer needs, fully materialized.
#[derive(Debug, Clone)]
pub struct Index {
    pub manifest: Manifest,
    pub descriptions: Map<String, Value>,
    pub modules: Vec<ModuleBundle>,
}

/// Walk every `Az.*` module directory in `release_dir` and collect the three
/// output structures.
pub fn build_index(release_dir: &Path) -> Result<Index> {
    let version = release_version(release_dir);
    let module_versions = scan_module_versions(release_dir)?;
    let module_dirs = module_dirs(release_dir)?;
    info!(
        release = %release_dir.display(),
        modules = module_dirs.len(),
        "building index"
    );

    let pb = ProgressBar::new(module_dirs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut entries = Vec::new();
    let mut descriptions = Map::new();
    let mut modules = Vec::new();

    for dir in module_dirs {
        let module = dir_name(&dir);
        pb.set_message(module.clone());
        let category = category_for(&module);
        let mut cmdlets = Map::new();

        for file in markdown_files(&dir)? {
            let Some(doc) = parser::cmdlet::parse_file(&file)? else {
                debug!(file = %file.display(), "skipped: not a cmdlet page");
                continue;
            };

            entries.push(ManifestEntry {
                name: doc.name.clone(),
                verb: verb_of(&doc.name).to_string(),
                module: module.clone(),
                category: category.to_string(),
                has_examples: !doc.examples.is_empty(),
            });
            if !doc.description.is_empty() {
                descriptions.insert(doc.name.clone(), Value::String(doc.description));
            }
            let entry = CmdletEntry {
                syntax: doc.syntax,
                examples: doc.examples,
            };
            cmdlets.insert(doc.name, serde_json::to_value(entry)?);
        }

        if cmdlets.is_empty() {
            debug!(%module, "no cmdlet pages; module omitted");
        } else {
            let version = module_versions
                .get(&module)
                .cloned()
                .unwrap_or_else(|| FALLBACK_VERSION.to_string());
            modules.push(ModuleBundle {
                module,
                version,
                cmdlets,
            });
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(Index {
        manifest: Manifest { version, entries },
        descriptions,
        modules,
    })
}

/// Leading capitalized word before `-Az`, or `Other`.
pub fn verb_of(name: &str) -> &str {
    VERB_RE
        .captures(name)
        .and_then(|c| c.get(1))
        .map_or(DEFAULT_VERB, |m| m.as_str())
}

/// First `Module Version` seen per `Module Name`, from every markdown file
/// below `release_dir`.
pub fn scan_module_versions(release_dir: &Path) -> Result<HashMap<String, String>> {
    let mut versions = HashMap::new();
    for entry in WalkDir::new(release_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let bytes = fs::read(entry.path()).map_err(|e| IndexError::read(entry.path(), e))?;
        let front = frontmatter::parse(&String::from_utf8_lossy(&bytes));
        if let (Some(name), Some(version)) = (front.get("Module Name"), front.get("Module Version")) {
            versions.entry(name.clone()).or_insert_with(|| version.clone());
        }
    }
    Ok(versions)
}

fn module_dirs(release_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = list_dir(release_dir)?
        .into_iter()
        .filter(|p| p.is_dir() && dir_name(p).starts_with(MODULE_PREFIX))
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file() && is_markdown(p))
        .collect();
    files.sort();
    Ok(files)
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::read_dir(dir)
        .map_err(|e| IndexError::read(dir, e))?
        .map(|entry| entry.map(|e| e.path()).map_err(|e| IndexError::read(dir, e)))
        .collect()
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Tests ──
