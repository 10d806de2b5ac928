//! Pack command implementation
//!
//! Resolves the request inputs, selects the packaging strategy, streams the
//! archive into a temporary file next to the destination, and persists it
//! only on success, so a failed run never leaves a partial archive behind.

use std::path::{Path, PathBuf};

use console::style;
use tempfile::NamedTempFile;
use tracing::info;

use crate::cli::PackArgs;
use crate::commands::helpers;
use crate::config::Config;
use crate::error::{RendpackError, Result};
use crate::packer::{PackRequest, PackageSummary, timestamped_archive_name};
use crate::progress::ProgressDisplay;
use crate::store::ContentStore;

/// Run the pack command
pub fn run(config_path: Option<PathBuf>, args: PackArgs) -> Result<()> {
    let config = Config::load_or_default(config_path.as_deref())?;
    let store = ContentStore::new(&args.content);
    let registry = helpers::build_registry(&config, &store)?;

    let request = PackRequest::new(&args.strategy).with_base_name(args.name.clone());
    let packager = registry.select(&request)?;
    let assets = store.load_assets(&args.assets)?;

    let (dest_dir, explicit_file) = destination(args.out.as_deref());
    let mut temp =
        NamedTempFile::new_in(&dest_dir).map_err(|e| RendpackError::FileWriteFailed {
            path: dest_dir.display().to_string(),
            reason: e.to_string(),
        })?;

    let progress = ProgressDisplay::start(assets.len(), args.renditions.len());
    let result = packager.execute(&request, &assets, &args.renditions, temp.as_file_mut());
    progress.finish();
    let summary = result?;

    // An archive with no entries is a usage problem, not a download; the
    // temporary file is discarded on drop.
    if summary.entry_count == 0 {
        return Err(RendpackError::EmptyArchive);
    }

    let dest = match explicit_file {
        Some(path) => path,
        None => dest_dir.join(archive_file_name(&summary, args.timestamp)),
    };
    temp.persist(&dest)
        .map_err(|e| RendpackError::FileWriteFailed {
            path: dest.display().to_string(),
            reason: e.to_string(),
        })?;
    info!(archive = %dest.display(), "archive persisted");

    report(&summary, &dest, packager.content_type(), args.json);
    Ok(())
}

/// Split `--out` into the directory the archive lands in and, when the caller
/// named a file directly, the explicit destination path
fn destination(out: Option<&Path>) -> (PathBuf, Option<PathBuf>) {
    match out {
        Some(path) if path.is_dir() => (path.to_path_buf(), None),
        Some(path) => {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, Some(path.to_path_buf()))
        }
        None => (PathBuf::from("."), None),
    }
}

/// Final archive file name, optionally carrying the request timestamp
fn archive_file_name(summary: &PackageSummary, timestamp: bool) -> String {
    if timestamp {
        let base = summary
            .file_name
            .strip_suffix(".zip")
            .unwrap_or(&summary.file_name);
        timestamped_archive_name(base)
    } else {
        summary.file_name.clone()
    }
}

fn report(summary: &PackageSummary, dest: &Path, content_type: &str, json: bool) {
    if json {
        let body = serde_json::json!({
            "archiveName": dest
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| summary.file_name.clone()),
            "assetCount": summary.asset_count,
            "entryCount": summary.entry_count,
            "totalBytes": summary.total_bytes,
            "contentType": content_type,
        });
        println!("{body}");
        return;
    }

    println!(
        "{} {}",
        style("Created").green().bold(),
        style(dest.display()).bold()
    );
    println!("  Assets:  {}", summary.asset_count);
    println!("  Entries: {}", summary.entry_count);
    println!("  Bytes:   {} (uncompressed)", summary.total_bytes);
}
