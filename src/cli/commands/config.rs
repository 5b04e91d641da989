//! config Command
//!
//! Shows the merged configuration and the resolution paths.

use crate::cli::util::Output;
use crate::config::ConfigLoader;
use crate::types::{Result, ScribeError};

/// Print the merged configuration as TOML.
pub fn show() -> Result<()> {
    let config = ConfigLoader::load()?;
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| ScribeError::Config(format!("Failed to render config: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Print configuration file paths and whether they exist.
pub fn path() -> Result<()> {
    let out = Output::new();
    out.header("Configuration paths");

    match ConfigLoader::global_config_path() {
        Some(global) => {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        }
        None => println!("  Global:  (not available)"),
    }

    let project = ConfigLoader::project_config_path();
    let exists = if project.exists() { "✓" } else { "✗" };
    println!("  Project: {} {}", exists, project.display());

    Ok(())
}
