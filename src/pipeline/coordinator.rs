//! Input discovery and output path resolution.

use crate::constants::PHOTO_EXTENSIONS;
use crate::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolve the map output path.
///
/// An explicit path wins; otherwise the configured default is used.
pub fn output_path(explicit: Option<&Path>, configured: &Path) -> PathBuf {
    explicit.unwrap_or(configured).to_path_buf()
}

/// Collect candidate photo files from paths (files and directories).
///
/// Directories are expanded one level deep and their entries sorted by path.
/// Files given directly are kept as-is; extension filtering happens in the
/// correlator so skipped files are reported in one place.
pub fn collect_photo_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(path)? {
                let entry_path = entry?.path();
                if entry_path.is_file() {
                    entries.push(entry_path);
                }
            }
            entries.sort();
            debug!("{}: {} files", path.display(), entries.len());
            files.extend(entries);
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

/// Check if a file has a supported photo extension.
pub fn is_photo_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        PHOTO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_prefers_explicit() {
        let path = output_path(Some(Path::new("/tmp/run.html")), Path::new("map.html"));
        assert_eq!(path, PathBuf::from("/tmp/run.html"));
        assert_eq!(
            output_path(None, Path::new("map.html")),
            PathBuf::from("map.html")
        );
    }

    #[test]
    fn test_is_photo_file() {
        assert!(is_photo_file(Path::new("a.jpg")));
        assert!(is_photo_file(Path::new("a.JPEG")));
        assert!(is_photo_file(Path::new("a.png")));
        assert!(is_photo_file(Path::new("a.HEIC")));
        assert!(!is_photo_file(Path::new("a.bmp")));
        assert!(!is_photo_file(Path::new("a.txt")));
        assert!(!is_photo_file(Path::new("jpg")));
    }

    #[test]
    fn test_is_photo_file_with_unicode() {
        assert!(is_photo_file(Path::new("한강_러닝.jpg")));
        assert!(is_photo_file(Path::new("ääni.png")));
    }

    #[test]
    fn test_collect_expands_directory_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.jpg", "a.png", "b.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("d.jpg"), b"x").unwrap();

        let files = collect_photo_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.txt", "c.jpg"]);
    }

    #[test]
    fn test_collect_skips_missing_paths() {
        let files = collect_photo_files(&[PathBuf::from("/nonexistent/dir")]).unwrap();
        assert!(files.is_empty());
    }
}
