//! CLI command implementations

pub mod completions;
pub mod helpers;
pub mod pack;
pub mod strategies;
pub mod version;
