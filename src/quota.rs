//! Cumulative archive size guard
//!
//! Tracks nothing itself; callers hand it the running uncompressed total and
//! it fails once the configured ceiling is strictly exceeded. The zip
//! orchestrator checks after every copied chunk, so a streaming source of
//! unknown length cannot run past the ceiling by more than one chunk.

use crate::error::{RendpackError, Result};

/// Multiplier from the configured kilobyte ceiling to bytes
pub const BYTES_PER_KB: u64 = 1024;

/// Enforces the configured maximum uncompressed archive size
#[derive(Debug, Clone, Copy)]
pub struct SizeGuard {
    max_bytes: u64,
}

impl SizeGuard {
    /// Build a guard from a ceiling expressed in kilobytes
    pub fn from_kilobytes(max_size_kb: u64) -> Self {
        Self {
            max_bytes: max_size_kb.saturating_mul(BYTES_PER_KB),
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Fail with `QuotaExceeded` when the cumulative total strictly exceeds
    /// the ceiling
    pub fn check_for_max_size(&self, cumulative_bytes: u64) -> Result<()> {
        if cumulative_bytes > self.max_bytes {
            return Err(RendpackError::QuotaExceeded {
                total_bytes: cumulative_bytes,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}
