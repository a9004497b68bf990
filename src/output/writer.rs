//! Map document writer.

use crate::error::{Error, Result};
use std::path::Path;
use tracing::info;

/// Write a rendered map document to `path`, creating parent directories.
pub fn write_map(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, html).map_err(|e| Error::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Map written to {} ({} bytes)", path.display(), html.len());
    Ok(())
}
