//! Zip packaging orchestrator
//!
//! Streams each resolved rendition into a zip archive through a fixed-size
//! copy buffer, checking the size guard after every chunk so the cumulative
//! uncompressed ceiling holds even for sources of unknown length.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};

use tracing::{debug, info};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::asset::Asset;
use crate::config::{DEFAULT_BASE_NAME, PackagerConfig};
use crate::error::{RendpackError, Result};
use crate::naming::{EntryNamer, group_by_asset_folder};
use crate::packer::{PackRequest, PackageSummary, Packager};
use crate::quota::SizeGuard;
use crate::resolver::{RenditionResolver, ResolvedRendition};

/// MIME type of the produced archive
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Copy buffer size; the quota is checked after every chunk of this size
const COPY_CHUNK_BYTES: usize = 8 * 1024;

/// Orchestrator packing renditions into a single zip archive
pub struct ZipPacker {
    config: PackagerConfig,
    resolver: RenditionResolver,
    namer: EntryNamer,
    guard: SizeGuard,
}

impl ZipPacker {
    pub fn new(config: PackagerConfig, resolver: RenditionResolver) -> Self {
        let namer = EntryNamer::new(config.rendition_filename_expression.clone());
        let guard = SizeGuard::from_kilobytes(config.max_size);
        Self {
            config,
            resolver,
            namer,
            guard,
        }
    }

    /// Copy one rendition stream into the open entry, enforcing the quota
    /// chunk by chunk
    ///
    /// Returns the new cumulative total. The source stream is dropped by the
    /// caller whether or not the copy completed.
    fn copy_entry(
        &self,
        asset: &Asset,
        rendition_name: &str,
        entry_name: &str,
        source: &mut dyn Read,
        writer: &mut ZipWriter<&mut File>,
        mut cumulative_bytes: u64,
    ) -> Result<u64> {
        let mut buffer = [0u8; COPY_CHUNK_BYTES];
        loop {
            let read = source
                .read(&mut buffer)
                .map_err(|e| RendpackError::SourceReadFailed {
                    asset: asset.name.clone(),
                    rendition: rendition_name.to_string(),
                    reason: e.to_string(),
                })?;
            if read == 0 {
                return Ok(cumulative_bytes);
            }

            writer
                .write_all(&buffer[..read])
                .map_err(|e| RendpackError::SinkWriteFailed {
                    entry: entry_name.to_string(),
                    reason: e.to_string(),
                })?;

            cumulative_bytes += read as u64;
            self.guard.check_for_max_size(cumulative_bytes)?;
        }
    }
}

impl Packager for ZipPacker {
    fn strategy_name(&self) -> &str {
        &self.config.strategy
    }

    fn priority(&self) -> i32 {
        self.config.priority
    }

    fn content_type(&self) -> &str {
        ZIP_CONTENT_TYPE
    }

    fn file_name(&self, request: &PackRequest) -> String {
        let base = request
            .base_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                if self.config.file_name.trim().is_empty() {
                    DEFAULT_BASE_NAME
                } else {
                    &self.config.file_name
                }
            });
        format!("{base}.zip")
    }

    fn execute(
        &self,
        request: &PackRequest,
        assets: &[Asset],
        rendition_names: &[String],
        sink: &mut File,
    ) -> Result<PackageSummary> {
        let grouped = group_by_asset_folder(assets.len(), rendition_names.len());
        let mut used_names: HashSet<String> = HashSet::new();
        let mut represented: HashSet<&str> = HashSet::new();
        let mut entry_count = 0usize;
        let mut total_bytes = 0u64;

        let mut writer = ZipWriter::new(sink);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .large_file(true);

        for asset in assets {
            for rendition_name in rendition_names {
                let resolved = match self.resolver.resolve(asset, rendition_name) {
                    Ok(resolved) => resolved,
                    Err(err @ RendpackError::RenditionUnavailable { .. }) => {
                        debug!(%err, "skipping pair");
                        continue;
                    }
                    Err(err) => return Err(err),
                };

                let group_path = if grouped { asset.name.as_str() } else { "" };
                let entry_name = self.namer.entry_name(
                    group_path,
                    asset,
                    rendition_name,
                    &resolved.mime_type,
                    &mut used_names,
                );

                writer
                    .start_file(entry_name.as_str(), options)
                    .map_err(|e| RendpackError::SinkWriteFailed {
                        entry: entry_name.clone(),
                        reason: e.to_string(),
                    })?;

                // `stream` is moved out so it is dropped (and the source
                // released) as soon as the copy ends, success or not.
                let ResolvedRendition { mut stream, .. } = resolved;
                total_bytes = self.copy_entry(
                    asset,
                    rendition_name,
                    &entry_name,
                    stream.as_mut(),
                    &mut writer,
                    total_bytes,
                )?;

                entry_count += 1;
                represented.insert(asset.name.as_str());
                debug!(entry = %entry_name, bytes = total_bytes, "entry written");
            }
        }

        writer.finish().map_err(|e| RendpackError::SinkWriteFailed {
            entry: self.file_name(request),
            reason: e.to_string(),
        })?;

        let summary = PackageSummary {
            file_name: self.file_name(request),
            asset_count: represented.len(),
            entry_count,
            total_bytes,
        };
        info!(
            archive = %summary.file_name,
            assets = summary.asset_count,
            entries = summary.entry_count,
            bytes = summary.total_bytes,
            "archive finalized"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticRenditionDispatcher;
    use crate::store::ContentStore;
    use std::fs;
    use std::io::Seek;
    use tempfile::{TempDir, tempfile};

    fn write_asset(root: &std::path::Path, name: &str, renditions: &[(&str, &[u8])]) {
        let dir = root.join(name).join("renditions");
        fs::create_dir_all(&dir).unwrap();
        for (file_name, bytes) in renditions {
            fs::write(dir.join(file_name), bytes).unwrap();
        }
    }

    fn packer(root: &std::path::Path, config: PackagerConfig) -> ZipPacker {
        let store = ContentStore::new(root);
        let mappings = StaticRenditionDispatcher::parse_mappings(&[
            "test=original.png".to_string(),
            "web=web.jpeg".to_string(),
        ])
        .unwrap();
        let dispatcher = StaticRenditionDispatcher::new(
            "Static rendition dispatcher",
            vec!["image".to_string()],
            mappings,
            store,
        );
        ZipPacker::new(config, RenditionResolver::new(vec![Box::new(dispatcher)]))
    }

    fn read_archive(sink: &mut File) -> zip::ZipArchive<&mut File> {
        sink.rewind().unwrap();
        zip::ZipArchive::new(sink).unwrap()
    }

    #[test]
    fn test_accepts_matching_strategy_only() {
        let temp = TempDir::new().unwrap();
        let packer = packer(temp.path(), PackagerConfig::default());

        assert!(packer.accepts(&PackRequest::new("zip")));
        assert!(!packer.accepts(&PackRequest::new("tarball")));
        assert!(!packer.accepts(
            &PackRequest::new("tarball").with_base_name(Some("My Assets".to_string()))
        ));
    }

    #[test]
    fn test_file_name_precedence() {
        let temp = TempDir::new().unwrap();

        let packer_with_config = packer(
            temp.path(),
            PackagerConfig {
                file_name: "Team Assets".to_string(),
                ..PackagerConfig::default()
            },
        );
        let request = PackRequest::new("zip");
        assert_eq!(packer_with_config.file_name(&request), "Team Assets.zip");

        let override_request =
            PackRequest::new("zip").with_base_name(Some("My Assets".to_string()));
        assert_eq!(
            packer_with_config.file_name(&override_request),
            "My Assets.zip"
        );

        let packer_default = packer(
            temp.path(),
            PackagerConfig {
                file_name: String::new(),
                ..PackagerConfig::default()
            },
        );
        assert_eq!(packer_default.file_name(&request), "Assets.zip");
    }

    #[test]
    fn test_execute_writes_resolved_pairs() {
        let temp = TempDir::new().unwrap();
        write_asset(
            temp.path(),
            "test.png",
            &[("original.png", b"original-bytes"), ("web.jpeg", b"web-bytes")],
        );
        let packer = packer(temp.path(), PackagerConfig::default());
        let store = ContentStore::new(temp.path());
        let assets = store.load_assets(&["test.png".to_string()]).unwrap();

        let mut sink = tempfile().unwrap();
        let summary = packer
            .execute(
                &PackRequest::new("zip"),
                &assets,
                &["test".to_string(), "web".to_string()],
                &mut sink,
            )
            .unwrap();

        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.asset_count, 1);
        assert_eq!(summary.total_bytes, 23);
        assert_eq!(summary.file_name, "Assets.zip");

        let mut archive = read_archive(&mut sink);
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "test__test.png");
        assert_eq!(archive.by_index(1).unwrap().name(), "test__web.jpeg");
    }

    #[test]
    fn test_execute_skips_unresolvable_pairs() {
        let temp = TempDir::new().unwrap();
        write_asset(temp.path(), "test.png", &[("original.png", b"original-bytes")]);
        let packer = packer(temp.path(), PackagerConfig::default());
        let store = ContentStore::new(temp.path());
        let assets = store.load_assets(&["test.png".to_string()]).unwrap();

        let mut sink = tempfile().unwrap();
        let summary = packer
            .execute(
                &PackRequest::new("zip"),
                &assets,
                &[
                    "test".to_string(),
                    "unmapped".to_string(),
                    "web".to_string(), // mapped but no stored binary
                ],
                &mut sink,
            )
            .unwrap();

        assert_eq!(summary.entry_count, 1);
        assert_eq!(summary.asset_count, 1);
    }

    #[test]
    fn test_execute_entry_order_is_asset_major() {
        let temp = TempDir::new().unwrap();
        write_asset(
            temp.path(),
            "b.png",
            &[("original.png", b"b-orig"), ("web.jpeg", b"b-web")],
        );
        write_asset(
            temp.path(),
            "a.png",
            &[("original.png", b"a-orig"), ("web.jpeg", b"a-web")],
        );
        let packer = packer(temp.path(), PackagerConfig::default());
        let store = ContentStore::new(temp.path());
        let assets = store
            .load_assets(&["b.png".to_string(), "a.png".to_string()])
            .unwrap();

        let mut sink = tempfile().unwrap();
        packer
            .execute(
                &PackRequest::new("zip"),
                &assets,
                &["test".to_string(), "web".to_string()],
                &mut sink,
            )
            .unwrap();

        // Caller-supplied asset order outer, rendition order inner; more than
        // one asset and rendition, so entries are grouped per asset folder.
        let mut archive = read_archive(&mut sink);
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "b.png/b__test.png",
                "b.png/b__web.jpeg",
                "a.png/a__test.png",
                "a.png/a__web.jpeg",
            ]
        );
    }

    #[test]
    fn test_execute_quota_breach_aborts() {
        let temp = TempDir::new().unwrap();
        let payload = vec![0u8; 4096];
        write_asset(temp.path(), "test.png", &[("original.png", &payload)]);
        let packer = packer(
            temp.path(),
            PackagerConfig {
                max_size: 2, // 2 KB ceiling against a 4 KB rendition
                ..PackagerConfig::default()
            },
        );
        let store = ContentStore::new(temp.path());
        let assets = store.load_assets(&["test.png".to_string()]).unwrap();

        let mut sink = tempfile().unwrap();
        let result = packer.execute(
            &PackRequest::new("zip"),
            &assets,
            &["test".to_string()],
            &mut sink,
        );
        assert!(matches!(result, Err(RendpackError::QuotaExceeded { .. })));
    }

    #[test]
    fn test_execute_duplicate_names_get_counter_prefix() {
        let temp = TempDir::new().unwrap();
        write_asset(
            temp.path(),
            "test.png",
            &[("original.png", b"one"), ("web.jpeg", b"two")],
        );
        let packer = packer(
            temp.path(),
            PackagerConfig {
                // Collapses every pair of one asset to the same name
                rendition_filename_expression: "{assetName}".to_string(),
                ..PackagerConfig::default()
            },
        );
        let store = ContentStore::new(temp.path());
        let assets = store.load_assets(&["test.png".to_string()]).unwrap();

        let mut sink = tempfile().unwrap();
        packer
            .execute(
                &PackRequest::new("zip"),
                &assets,
                &["test".to_string(), "web".to_string()],
                &mut sink,
            )
            .unwrap();

        let mut archive = read_archive(&mut sink);
        assert_eq!(archive.by_index(0).unwrap().name(), "test");
        assert_eq!(archive.by_index(1).unwrap().name(), "1-test");
    }
}
