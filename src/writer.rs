use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IndexError, Result};
use crate::index::Index;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const DESCRIPTIONS_FILE: &str = "descriptions.json";
pub const MODULES_DIR: &str = "modules";

/// Counts reported back to the CLI after a write.
pub struct WriteStats {
    pub entries: usize,
    pub descriptions: usize,
    pub modules: usize,
    pub modules_dir: PathBuf,
}

/// Write all outputs under `out_dir`, replacing whatever is there. Module
/// files left over from earlier runs are removed first.
pub fn write_index(index: &Index, out_dir: &Path) -> Result<WriteStats> {
    let modules_dir = out_dir.join(MODULES_DIR);
    fs::create_dir_all(&modules_dir).map_err(|e| IndexError::write(&modules_dir, e))?;
    remove_stale_modules(&modules_dir)?;

    write_file(&out_dir.join(MANIFEST_FILE), &serde_json::to_vec(&index.manifest)?)?;
    debug!(entries = index.manifest.entries.len(), "wrote {}", MANIFEST_FILE);

    write_file(
        &out_dir.join(DESCRIPTIONS_FILE),
        &serde_json::to_vec_pretty(&index.descriptions)?,
    )?;
    debug!(entries = index.descriptions.len(), "wrote {}", DESCRIPTIONS_FILE);

    for bundle in &index.modules {
        let path = modules_dir.join(format!("{}.json", bundle.module));
        write_file(&path, &serde_json::to_vec(bundle)?)?;
    }
    debug!(modules = index.modules.len(), dir = %modules_dir.display(), "wrote module files");

    Ok(WriteStats {
        entries: index.manifest.entries.len(),
        descriptions: index.descriptions.len(),
        modules: index.modules.len(),
        modules_dir,
    })
}

fn remove_stale_modules(modules_dir: &Path) -> Result<()> {
    let entries = fs::read_dir(modules_dir).map_err(|e| IndexError::read(modules_dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| IndexError::read(modules_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            fs::remove_file(&path).map_err(|e| IndexError::write(&path, e))?;
            debug!(file = %path.display(), "removed stale module file");
        }
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| IndexError::write(path, e))
}

// ── Tests ──
