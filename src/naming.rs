//! Archive entry naming engine
//!
//! Expands a user-configurable template into one entry name per
//! (asset, rendition) pair, then guarantees uniqueness within the archive by
//! prefixing an incrementing counter on collision.
//!
//! Recognized placeholders:
//! - `{assetName}` — the asset's display name
//! - `{renditionName}` — the requested rendition name
//! - `{assetExtension}` — extension derived from the resolved MIME type,
//!   falling back to the asset's native extension
//!
//! Substituted user data is sanitized so it can never introduce a path
//! separator into the entry name.

use std::collections::HashSet;

use crate::asset::{Asset, extension_for_mime_type};

/// Default entry-name template
pub const DEFAULT_EXPRESSION: &str = "{assetName}__{renditionName}.{assetExtension}";

pub const VAR_ASSET_NAME: &str = "{assetName}";
pub const VAR_RENDITION_NAME: &str = "{renditionName}";
pub const VAR_ASSET_EXTENSION: &str = "{assetExtension}";

/// Expands the entry-name template and resolves collisions
#[derive(Debug, Clone)]
pub struct EntryNamer {
    expression: String,
}

impl EntryNamer {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// Compute a unique archive entry name for one (asset, rendition) pair
    ///
    /// `group_path` is a per-asset folder prefix ("" for flat naming). The
    /// chosen name is recorded into `used_names` before being returned, so
    /// the same registry never hands out the same name twice. Given the same
    /// insertion order the result is deterministic.
    pub fn entry_name(
        &self,
        group_path: &str,
        asset: &Asset,
        rendition_name: &str,
        mime_type: &str,
        used_names: &mut HashSet<String>,
    ) -> String {
        let base = self.expand(asset, rendition_name, mime_type);
        let group = sanitize(group_path);

        let mut candidate = join(&group, &base);
        let mut counter = 0u32;
        while used_names.contains(&candidate) {
            counter += 1;
            candidate = join(&group, &format!("{counter}-{base}"));
        }

        used_names.insert(candidate.clone());
        candidate
    }

    /// Pure template expansion, no collision handling
    fn expand(&self, asset: &Asset, rendition_name: &str, mime_type: &str) -> String {
        let extension = extension_for_mime_type(mime_type).unwrap_or(asset.extension.as_str());
        // {assetName} is the display name without its extension; the template
        // appends {assetExtension} itself.
        let stem = asset
            .name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&asset.name);

        self.expression
            .replace(VAR_ASSET_NAME, &sanitize(stem))
            .replace(VAR_RENDITION_NAME, &sanitize(rendition_name))
            .replace(VAR_ASSET_EXTENSION, &sanitize(extension))
    }
}

impl Default for EntryNamer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPRESSION)
    }
}

/// Grouping policy: prefix entries with a per-asset folder only when the
/// archive mixes several assets with several renditions, where flat naming
/// becomes visually ambiguous
pub fn group_by_asset_folder(asset_count: usize, rendition_count: usize) -> bool {
    asset_count > 1 && rendition_count > 1
}

/// Strip path separators from user-supplied template values
fn sanitize(value: &str) -> String {
    value.replace(['/', '\\'], "-")
}

fn join(group: &str, name: &str) -> String {
    if group.is_empty() {
        name.to_string()
    } else {
        format!("{group}/{name}")
    }
}
