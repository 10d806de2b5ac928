//! Filesystem content store
//!
//! The store is the boundary to the content host. Each asset is a directory
//! directly under the content root, holding its stored renditions:
//!
//! ```text
//! <content root>/
//!   test.png/
//!     renditions/
//!       original.png
//!       thumbnail.png
//! ```
//!
//! The engine never walks this layout itself; dispatchers ask the store to
//! open a named stored rendition as a stream.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::asset::{Asset, mime_type_for_extension};
use crate::error::{RendpackError, Result};

/// Directory holding an asset's stored renditions
const RENDITIONS_DIR: &str = "renditions";

/// Filesystem-backed content store rooted at a single directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the snapshot of one asset by its directory name
    pub fn load_asset(&self, name: &str) -> Result<Asset> {
        if name.contains('/') || name.contains('\\') {
            return Err(RendpackError::InvalidAssetName {
                name: name.to_string(),
            });
        }

        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(RendpackError::AssetNotFound {
                name: name.to_string(),
            });
        }

        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        let mime_type = mime_type_for_extension(&extension).to_string();

        Ok(Asset {
            path: dir.display().to_string(),
            name: name.to_string(),
            extension,
            mime_type,
        })
    }

    /// Load snapshots for a list of asset names, preserving order
    pub fn load_assets(&self, names: &[String]) -> Result<Vec<Asset>> {
        names.iter().map(|name| self.load_asset(name)).collect()
    }

    /// Open a stored rendition file of an asset as a readable stream
    ///
    /// Returns `Ok(None)` when the stored rendition does not exist or is
    /// empty; a missing or empty binary is a skip for the caller, not a
    /// failure. Only an actual I/O error opening an existing file is an error.
    pub fn open_rendition(
        &self,
        asset: &Asset,
        stored_name: &str,
    ) -> Result<Option<(Box<dyn Read>, u64)>> {
        let path = self.rendition_path(asset, stored_name);
        if !path.is_file() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path).map_err(|e| RendpackError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if metadata.len() == 0 {
            return Ok(None);
        }

        let file = File::open(&path).map_err(|e| RendpackError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some((Box::new(file), metadata.len())))
    }

    fn rendition_path(&self, asset: &Asset, stored_name: &str) -> PathBuf {
        Path::new(&asset.path).join(RENDITIONS_DIR).join(stored_name)
    }
}
