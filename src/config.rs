//! Configuration loading for rendpack
//!
//! A `rendpack.yaml` file declares the packaging strategies and the rendition
//! dispatcher chain. Everything has a sensible default, so the file is
//! optional; request-scoped CLI flags override per invocation.
//!
//! ```yaml
//! packagers:
//!   - strategy: zip
//!     file_name: Assets
//!     max_size: 102400          # kilobytes, uncompressed
//!     rendition_filename_expression: "{assetName}__{renditionName}.{assetExtension}"
//!     priority: 0
//! dispatchers:
//!   - label: Static rendition dispatcher
//!     types: [image, video]
//!     mappings:
//!       - "original=original"
//!       - "thumbnail=thumbnail.png"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RendpackError, Result};
use crate::naming;

/// Base archive name used when neither the request nor the configuration
/// names one
pub const DEFAULT_BASE_NAME: &str = "Assets";

/// Default uncompressed ceiling in kilobytes (100 MB)
pub const DEFAULT_MAX_SIZE_KB: u64 = 102_400;

/// Top-level configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_packagers")]
    pub packagers: Vec<PackagerConfig>,
    #[serde(default = "default_dispatchers")]
    pub dispatchers: Vec<DispatcherConfig>,
}

/// Configuration of one packaging orchestrator
///
/// Read-only once loaded; safely shared across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagerConfig {
    /// Strategy identifier the selector matches requests against
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Base archive file name, without extension
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Maximum cumulative uncompressed size, in kilobytes
    #[serde(default = "default_max_size")]
    pub max_size: u64,
    /// Entry-name template
    #[serde(default = "default_expression")]
    pub rendition_filename_expression: String,
    /// Tie-break rank among accepting packagers; higher wins
    #[serde(default)]
    pub priority: i32,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            file_name: default_file_name(),
            max_size: default_max_size(),
            rendition_filename_expression: default_expression(),
            priority: 0,
        }
    }
}

/// Configuration of one rendition dispatcher in the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    #[serde(default = "default_dispatcher_label")]
    pub label: String,
    /// Asset types served, keyed on the MIME type's primary component
    #[serde(default = "default_types")]
    pub types: Vec<String>,
    /// `logical=stored` rendition name mappings, tried in declaration order
    #[serde(default = "default_mappings")]
    pub mappings: Vec<String>,
}

fn default_strategy() -> String {
    "zip".to_string()
}

fn default_file_name() -> String {
    DEFAULT_BASE_NAME.to_string()
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_SIZE_KB
}

fn default_expression() -> String {
    naming::DEFAULT_EXPRESSION.to_string()
}

fn default_dispatcher_label() -> String {
    "Static rendition dispatcher".to_string()
}

fn default_types() -> Vec<String> {
    vec!["image".to_string(), "video".to_string()]
}

fn default_mappings() -> Vec<String> {
    vec!["original=original".to_string()]
}

fn default_packagers() -> Vec<PackagerConfig> {
    vec![PackagerConfig::default()]
}

fn default_dispatchers() -> Vec<DispatcherConfig> {
    vec![DispatcherConfig {
        label: default_dispatcher_label(),
        types: default_types(),
        mappings: default_mappings(),
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packagers: default_packagers(),
            dispatchers: default_dispatchers(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RendpackError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| RendpackError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| RendpackError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or fall back to `rendpack.yaml` in the
    /// working directory when present, or built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new("rendpack.yaml");
                if implicit.is_file() {
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.packagers.is_empty() {
            return Err(RendpackError::ConfigInvalid {
                message: "at least one packager must be configured".to_string(),
            });
        }
        for packager in &self.packagers {
            if packager.strategy.trim().is_empty() {
                return Err(RendpackError::ConfigInvalid {
                    message: "packager strategy name must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
