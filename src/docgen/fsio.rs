//! Filesystem Collaborator
//!
//! The narrow filesystem surface the pipeline depends on. Reads degrade
//! to `None` on any I/O error (generators fall through to their next
//! tier); the only write is the final assembled-site write.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::types::Result;

/// Read a file to a string, returning `None` on any I/O or encoding error.
pub fn read_to_string_opt(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            None
        }
    }
}

/// Write output content, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
