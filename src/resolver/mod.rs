//! Rendition resolution strategy chain
//!
//! A [`RenditionResolver`] owns an ordered list of [`RenditionDispatcher`]s.
//! Resolution asks each dispatcher, in declaration order, whether it claims
//! the (asset type, rendition name) pair; the first claimant is asked to open
//! the stream. Declaration order is the tie-break, so resolution is
//! deterministic for identical inputs.
//!
//! A pair nobody claims, or a claimed pair whose stored binary is missing or
//! empty, fails with the recoverable `RenditionUnavailable` kind: callers
//! skip the pair and continue. Real I/O failures are fatal and propagate.

mod static_dispatcher;

pub use static_dispatcher::StaticRenditionDispatcher;

use std::io::Read;

use tracing::debug;

use crate::asset::Asset;
use crate::error::{RendpackError, Result};

/// A resolved rendition: a single-use byte stream plus its metadata
///
/// The stream is consumed exactly once by the orchestrator and released when
/// dropped, including on a failed copy.
pub struct ResolvedRendition {
    /// Readable byte stream of the rendition binary
    pub stream: Box<dyn Read>,
    /// MIME type of the rendition binary
    pub mime_type: String,
    /// File extension of the stored rendition
    pub extension: String,
    /// Uncompressed size in bytes, when the source knows it up front
    pub size: u64,
}

impl std::fmt::Debug for ResolvedRendition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRendition")
            .field("mime_type", &self.mime_type)
            .field("extension", &self.extension)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// One strategy in the resolution chain
pub trait RenditionDispatcher {
    /// Human-readable label, used in logs and `rendpack strategies` output
    fn label(&self) -> &str;

    /// True when this dispatcher's declared asset types include the asset's
    /// type and its mapping table contains the rendition name
    fn accepts(&self, asset: &Asset, rendition_name: &str) -> bool;

    /// Open the rendition stream; `Ok(None)` when the stored binary is
    /// missing or empty
    ///
    /// Dispatchers open streams, they never consume them.
    fn dispatch(&self, asset: &Asset, rendition_name: &str) -> Result<Option<ResolvedRendition>>;
}

/// Ordered chain of rendition dispatchers
pub struct RenditionResolver {
    dispatchers: Vec<Box<dyn RenditionDispatcher>>,
}

impl RenditionResolver {
    pub fn new(dispatchers: Vec<Box<dyn RenditionDispatcher>>) -> Self {
        Self { dispatchers }
    }

    /// All dispatchers in declaration order
    pub fn dispatchers(&self) -> &[Box<dyn RenditionDispatcher>] {
        &self.dispatchers
    }

    /// Resolve one (asset, rendition name) pair to a byte stream
    ///
    /// The first dispatcher that claims the pair wins; there is no fallthrough
    /// to later dispatchers once a claimant is found. A pair nobody claims,
    /// or a claimed pair whose stored binary turns out to be missing or
    /// empty, fails with [`RendpackError::RenditionUnavailable`], which
    /// callers recover from by skipping the pair.
    pub fn resolve(&self, asset: &Asset, rendition_name: &str) -> Result<ResolvedRendition> {
        let unavailable = || RendpackError::RenditionUnavailable {
            asset: asset.name.clone(),
            rendition: rendition_name.to_string(),
        };

        for dispatcher in &self.dispatchers {
            if dispatcher.accepts(asset, rendition_name) {
                debug!(
                    dispatcher = dispatcher.label(),
                    asset = %asset.name,
                    rendition = rendition_name,
                    "dispatching rendition"
                );
                return dispatcher
                    .dispatch(asset, rendition_name)?
                    .ok_or_else(unavailable);
            }
        }

        debug!(
            asset = %asset.name,
            rendition = rendition_name,
            "no dispatcher claims rendition"
        );
        Err(unavailable())
    }
}
