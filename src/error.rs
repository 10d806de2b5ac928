//! Error types and handling for rendpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rendpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum RendpackError {
    // Resolution errors
    #[error("No rendition '{rendition}' available for asset '{asset}'")]
    #[diagnostic(
        code(rendpack::resolve::unavailable),
        help("Check that a dispatcher maps this rendition name for the asset's type")
    )]
    RenditionUnavailable { asset: String, rendition: String },

    #[error("Failed to read rendition '{rendition}' of asset '{asset}': {reason}")]
    #[diagnostic(code(rendpack::resolve::read_failed))]
    SourceReadFailed {
        asset: String,
        rendition: String,
        reason: String,
    },

    // Packaging errors
    #[error("Archive exceeds the maximum allowed size of {max_bytes} bytes")]
    #[diagnostic(
        code(rendpack::pack::quota_exceeded),
        help("The selection is too large; request fewer assets or renditions")
    )]
    QuotaExceeded { total_bytes: u64, max_bytes: u64 },

    #[error("Failed to write archive entry '{entry}': {reason}")]
    #[diagnostic(code(rendpack::pack::write_failed))]
    SinkWriteFailed { entry: String, reason: String },

    #[error("No packaging strategy accepted the request: {strategy}")]
    #[diagnostic(
        code(rendpack::pack::no_strategy),
        help("Run 'rendpack strategies' to list the registered strategy names")
    )]
    NoStrategyAvailable { strategy: String },

    #[error("Archive produced no entries")]
    #[diagnostic(
        code(rendpack::pack::empty),
        help("None of the requested renditions could be resolved")
    )]
    EmptyArchive,

    // Content store errors
    #[error("Asset not found: {name}")]
    #[diagnostic(
        code(rendpack::store::asset_not_found),
        help("Asset directories live directly under the content root")
    )]
    AssetNotFound { name: String },

    #[error("Invalid asset name: {name}")]
    #[diagnostic(
        code(rendpack::store::invalid_asset_name),
        help("Asset names must not contain path separators")
    )]
    InvalidAssetName { name: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(rendpack::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(rendpack::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(rendpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(rendpack::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(rendpack::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(rendpack::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rendpack::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for RendpackError {
    fn from(err: std::io::Error) -> Self {
        RendpackError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RendpackError {
    fn from(err: serde_yaml::Error) -> Self {
        RendpackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RendpackError>;
