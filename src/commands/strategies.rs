//! Strategies command implementation
//!
//! Introspection over the configured selector: which packagers are
//! registered, how they rank, and which dispatchers feed them.

use std::path::PathBuf;

use console::style;

use crate::config::Config;
use crate::error::Result;

/// Run the strategies command
pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load_or_default(config_path.as_deref())?;

    println!("{}", style("Packaging strategies:").green().bold());
    for packager in &config.packagers {
        println!(
            "  {} (priority {})",
            style(&packager.strategy).cyan().bold(),
            packager.priority
        );
        println!("    archive:  {}.zip", packager.file_name);
        println!("    max size: {} KB", packager.max_size);
        println!("    template: {}", packager.rendition_filename_expression);
    }

    println!();
    println!("{}", style("Dispatcher chain:").green().bold());
    for (index, dispatcher) in config.dispatchers.iter().enumerate() {
        println!(
            "  {}. {} [{}]",
            index + 1,
            style(&dispatcher.label).cyan(),
            dispatcher.types.join(", ")
        );
        for mapping in &dispatcher.mappings {
            println!("     {mapping}");
        }
    }

    Ok(())
}
