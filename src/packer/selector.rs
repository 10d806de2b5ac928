//! Strategy selection among registered packagers
//!
//! The registry keeps packagers in registration order. Selection filters by
//! `accepts` and picks the highest priority; a strictly-greater comparison
//! keeps registration order as the stable tie-break.

use tracing::debug;

use crate::error::{RendpackError, Result};
use crate::packer::{PackRequest, Packager};

/// Registry of competing packaging orchestrators
pub struct PackagerRegistry {
    packagers: Vec<Box<dyn Packager>>,
}

impl PackagerRegistry {
    pub fn new(packagers: Vec<Box<dyn Packager>>) -> Self {
        Self { packagers }
    }

    /// All registered packagers in registration order
    pub fn packagers(&self) -> &[Box<dyn Packager>] {
        &self.packagers
    }

    /// Pick the accepting packager with the highest priority
    ///
    /// Deterministic under ties: the first-registered of the highest-priority
    /// accepting packagers wins. Fails with `NoStrategyAvailable` when none
    /// accept.
    pub fn select(&self, request: &PackRequest) -> Result<&dyn Packager> {
        let mut best: Option<&dyn Packager> = None;

        for packager in &self.packagers {
            if !packager.accepts(request) {
                continue;
            }
            match best {
                Some(current) if packager.priority() <= current.priority() => {}
                _ => best = Some(packager.as_ref()),
            }
        }

        match best {
            Some(packager) => {
                debug!(
                    strategy = packager.strategy_name(),
                    priority = packager.priority(),
                    "packager selected"
                );
                Ok(packager)
            }
            None => Err(RendpackError::NoStrategyAvailable {
                strategy: request.strategy.clone(),
            }),
        }
    }
}
