//! Shared construction helpers for CLI commands
//!
//! Wires the configured dispatcher chain and packagers together. Everything
//! here is explicit constructor injection; there is no global registry.

use crate::config::Config;
use crate::error::Result;
use crate::packer::{Packager, ZipPacker, selector::PackagerRegistry};
use crate::resolver::{RenditionDispatcher, RenditionResolver, StaticRenditionDispatcher};
use crate::store::ContentStore;

/// Build the rendition dispatcher chain declared in the configuration
pub fn build_resolver(config: &Config, store: &ContentStore) -> Result<RenditionResolver> {
    let mut dispatchers: Vec<Box<dyn RenditionDispatcher>> = Vec::new();

    for dispatcher_config in &config.dispatchers {
        let mappings = StaticRenditionDispatcher::parse_mappings(&dispatcher_config.mappings)?;
        dispatchers.push(Box::new(StaticRenditionDispatcher::new(
            dispatcher_config.label.clone(),
            dispatcher_config.types.clone(),
            mappings,
            store.clone(),
        )));
    }

    Ok(RenditionResolver::new(dispatchers))
}

/// Build the packager registry declared in the configuration
///
/// Each packager owns its own dispatcher chain; invocations share no mutable
/// state.
pub fn build_registry(config: &Config, store: &ContentStore) -> Result<PackagerRegistry> {
    let mut packagers: Vec<Box<dyn Packager>> = Vec::new();

    for packager_config in &config.packagers {
        let resolver = build_resolver(config, store)?;
        packagers.push(Box::new(ZipPacker::new(packager_config.clone(), resolver)));
    }

    Ok(PackagerRegistry::new(packagers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::PackRequest;
    use tempfile::TempDir;

    #[test]
    fn test_build_registry_from_default_config() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::new(temp.path());

        let registry = build_registry(&Config::default(), &store).unwrap();
        assert_eq!(registry.packagers().len(), 1);
        assert!(registry.select(&PackRequest::new("zip")).is_ok());
    }

    #[test]
    fn test_build_resolver_preserves_declaration_order() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::new(temp.path());
        let mut config = Config::default();
        config.dispatchers.push(crate::config::DispatcherConfig {
            label: "Second dispatcher".to_string(),
            types: vec!["image".to_string()],
            mappings: vec!["web=web.png".to_string()],
        });

        let resolver = build_resolver(&config, &store).unwrap();
        let labels: Vec<&str> = resolver.dispatchers().iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["Static rendition dispatcher", "Second dispatcher"]);
    }
}
