//! Static rendition dispatcher
//!
//! Maps logical rendition names to stored rendition file names through a
//! fixed table declared in configuration, e.g. `thumbnail=thumbnail.png`.
//! The dispatcher also declares the asset types it serves (`image`, `video`,
//! ...), keyed on the primary component of the asset's MIME type.

use std::path::Path;

use crate::asset::{Asset, mime_type_for_extension};
use crate::error::{RendpackError, Result};
use crate::resolver::{RenditionDispatcher, ResolvedRendition};
use crate::store::ContentStore;

/// Dispatcher backed by a static name mapping over the content store
pub struct StaticRenditionDispatcher {
    label: String,
    asset_types: Vec<String>,
    /// (logical rendition name, stored file name), declaration order preserved
    mappings: Vec<(String, String)>,
    store: ContentStore,
}

impl StaticRenditionDispatcher {
    pub fn new(
        label: impl Into<String>,
        asset_types: Vec<String>,
        mappings: Vec<(String, String)>,
        store: ContentStore,
    ) -> Self {
        Self {
            label: label.into(),
            asset_types,
            mappings,
            store,
        }
    }

    /// Parse `logical=stored` mapping declarations from configuration
    pub fn parse_mappings(declarations: &[String]) -> Result<Vec<(String, String)>> {
        declarations
            .iter()
            .map(|declaration| {
                declaration
                    .split_once('=')
                    .map(|(logical, stored)| (logical.trim().to_string(), stored.trim().to_string()))
                    .filter(|(logical, stored)| !logical.is_empty() && !stored.is_empty())
                    .ok_or_else(|| RendpackError::ConfigInvalid {
                        message: format!(
                            "rendition mapping '{declaration}' is not of the form 'logical=stored'"
                        ),
                    })
            })
            .collect()
    }

    fn stored_name(&self, rendition_name: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(logical, _)| logical == rendition_name)
            .map(|(_, stored)| stored.as_str())
    }
}

impl RenditionDispatcher for StaticRenditionDispatcher {
    fn label(&self) -> &str {
        &self.label
    }

    fn accepts(&self, asset: &Asset, rendition_name: &str) -> bool {
        self.asset_types.iter().any(|t| t == asset.asset_type())
            && self.stored_name(rendition_name).is_some()
    }

    fn dispatch(&self, asset: &Asset, rendition_name: &str) -> Result<Option<ResolvedRendition>> {
        let Some(stored) = self.stored_name(rendition_name) else {
            return Ok(None);
        };

        let Some((stream, size)) = self.store.open_rendition(asset, stored)? else {
            return Ok(None);
        };

        let extension = Path::new(stored)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(&asset.extension)
            .to_string();
        let mime_type = mime_type_for_extension(&extension).to_string();

        Ok(Some(ResolvedRendition {
            stream,
            mime_type,
            extension,
            size,
        }))
    }
}
