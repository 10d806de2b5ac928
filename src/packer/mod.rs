//! Packaging orchestrators and strategy selection
//!
//! A [`Packager`] drives one packaging invocation: it iterates the requested
//! (asset × rendition) pairs, resolves each to a stream, names it, copies it
//! into the archive under the size guard, and finalizes the archive. Multiple
//! packagers can be registered; the [`selector`] picks the one the request
//! names.

pub mod selector;

mod zip;

pub use zip::ZipPacker;

use std::fs::File;

use chrono::Local;

use crate::asset::Asset;
use crate::error::Result;

/// One packaging invocation as the caller describes it
///
/// Assets and rendition names arrive already resolved and ordered; the
/// request only carries the strategy identifier and per-invocation overrides.
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// Strategy identifier matched against `Packager::strategy_name`
    pub strategy: String,
    /// Request-scoped base archive name, overriding the configured one
    pub base_name: Option<String>,
}

impl PackRequest {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            base_name: None,
        }
    }

    pub fn with_base_name(mut self, base_name: Option<String>) -> Self {
        self.base_name = base_name;
        self
    }
}

/// Outcome of a completed packaging invocation
///
/// The archive bytes live in the caller-supplied sink; the summary carries
/// the counts and the synthesized archive file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    /// Resolved archive file name, e.g. `Assets.zip`
    pub file_name: String,
    /// Number of assets represented by at least one entry
    pub asset_count: usize,
    /// Number of entries written
    pub entry_count: usize,
    /// Cumulative uncompressed bytes written
    pub total_bytes: u64,
}

/// A packaging strategy competing for requests
pub trait Packager {
    /// Strategy identifier the selector matches requests against
    fn strategy_name(&self) -> &str;

    /// Tie-break rank among accepting packagers; higher wins
    fn priority(&self) -> i32;

    /// MIME type of the produced archive
    fn content_type(&self) -> &str;

    /// True only when the request explicitly names this packager's strategy
    ///
    /// Pure; the selector calls this for every registered packager.
    fn accepts(&self, request: &PackRequest) -> bool {
        request.strategy == self.strategy_name()
    }

    /// Archive file name for this request: request override, then the
    /// configured base name, then the hard default
    fn file_name(&self, request: &PackRequest) -> String;

    /// Run the packaging invocation, streaming the archive into `sink`
    ///
    /// Entries are written asset-major, rendition-minor, in caller-supplied
    /// order. Unresolvable pairs are skipped; a quota breach or I/O failure
    /// aborts the whole run. The caller owns the sink's teardown.
    fn execute(
        &self,
        request: &PackRequest,
        assets: &[Asset],
        rendition_names: &[String],
        sink: &mut File,
    ) -> Result<PackageSummary>;
}

/// Archive name carrying a request timestamp, e.g. `Assets (08-26 03-45PM).zip`
///
/// Used when packing into a directory, so repeated invocations do not clobber
/// each other.
pub fn timestamped_archive_name(base_name: &str) -> String {
    let stamp = Local::now().format("%m-%d %I-%M%p");
    format!("{base_name} ({stamp}).zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_archive_name_shape() {
        let name = timestamped_archive_name("My Assets");
        assert!(name.starts_with("My Assets ("));
        assert!(name.ends_with(").zip"));
        // MM-dd hh-mmAM/PM inside the parentheses
        let stamp = &name["My Assets (".len()..name.len() - ").zip".len()];
        assert_eq!(stamp.len(), "08-26 03-45PM".len());
        assert!(stamp.ends_with("AM") || stamp.ends_with("PM"));
    }
}
