mod category;
mod error;
mod index;
mod parser;
mod resolver;
mod settings;
mod writer;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "azindex",
    about = "Build AzIndex JSON data files from an azure-docs-powershell checkout"
)]
struct Cli {
    /// Root of the azure-docs-powershell tree (contains azps-* folders)
    docs_root: PathBuf,
    /// Output directory (default: $AZINDEX_OUT_DIR or public/data)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let out_dir = match cli.out {
        Some(dir) => dir,
        None => settings::Settings::load().context("Failed to load settings")?.out_dir,
    };

    generate(&cli.docs_root, &out_dir)?;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

/// Resolve the newest release folder under `docs_root`, index it, and write
/// the data files into `out_dir`.
fn generate(docs_root: &Path, out_dir: &Path) -> anyhow::Result<()> {
    println!("Scanning {} ...", docs_root.display());
    let release_dir = resolver::find_latest_release_dir(docs_root)?;
    let release_name = release_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!(
        "Found: {}  (version {})",
        release_name,
        resolver::release_version(&release_dir)
    );

    let index = index::build_index(&release_dir)
        .with_context(|| format!("Failed to index {}", release_dir.display()))?;
    println!(
        "Processed {} cmdlets across {} modules",
        index.manifest.entries.len(),
        index.modules.len()
    );

    let stats = writer::write_index(&index, out_dir)
        .with_context(|| format!("Failed to write output to {}", out_dir.display()))?;
    println!("Wrote {} ({} entries)", writer::MANIFEST_FILE, stats.entries);
    println!("Wrote {} ({} entries)", writer::DESCRIPTIONS_FILE, stats.descriptions);
    println!(
        "Wrote {} module JSON files to {}",
        stats.modules,
        stats.modules_dir.display()
    );
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──
