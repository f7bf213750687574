//! Image discovery: find the images in a directory and read their sizes.
//!
//! Walking uses the [`ignore`] crate (hidden-file and `.gitignore` aware).
//! Only image headers are read here; full decoding happens later on the
//! thumbnail workers.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{Result, StripError};

/// Extensions the `image` crate is built to decode.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// Configuration knobs for directory scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How deep to descend (1 = immediate children only).
    pub max_depth: usize,
    /// Include hidden (dot-prefixed) entries.
    pub show_hidden: bool,
    /// Respect `.gitignore` files.
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            show_hidden: false,
            respect_gitignore: true,
        }
    }
}

/// One image found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// Path relative to the scanned directory, used as the card label.
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// List the images under `dir`, sorted case-insensitively by name.
///
/// Files that look like images but cannot be read are skipped with a
/// warning.  An empty result is not an error.
pub fn scan_images(dir: &Path, config: &ScanConfig) -> Result<Vec<ImageEntry>> {
    let meta = std::fs::metadata(dir).map_err(|e| StripError::io(dir, e))?;
    if !meta.is_dir() {
        return Err(StripError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkBuilder::new(dir)
        .max_depth(Some(config.max_depth.max(1)))
        .hidden(!config.show_hidden)
        .git_ignore(config.respect_gitignore)
        .build();

    let mut entries = Vec::new();
    for entry in walker.filter_map(walk_entry) {
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if !is_file {
            continue;
        }
        let path = entry.path();
        if !looks_like_image(path) {
            continue;
        }

        match read_dimensions(path) {
            Ok((w, h)) if w > 0 && h > 0 => {
                let name = path
                    .strip_prefix(dir)
                    .unwrap_or(path)
                    .display()
                    .to_string();
                entries.push(ImageEntry {
                    path: path.to_path_buf(),
                    name,
                    width_px: w,
                    height_px: h,
                });
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "skipping zero-sized image");
            }
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
            }
        }
    }

    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(entries)
}

/// Unwrap one walk result, logging entries the walker could not read
/// (permission-denied subdirectories, broken `.gitignore` files).
fn walk_entry(result: std::result::Result<ignore::DirEntry, ignore::Error>) -> Option<ignore::DirEntry> {
    match result {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!("skipping unreadable entry: {e}");
            None
        }
    }
}

/// Cheap pre-filter: known extension, or sniffed content for files without one.
fn looks_like_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        // Uses shared-mime-info magic, so extension-less files still work.
        None => tree_magic_mini::from_filepath(path).is_some_and(|m| m.starts_with("image/")),
    }
}

/// Read pixel dimensions from the image header without decoding.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| StripError::io(path, e))?
        .into_dimensions()
        .map_err(|e| StripError::image(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        image::RgbaImage::new(w, h).save(&path).unwrap();
    }

    #[test]
    fn test_scan_finds_images_sorted_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "b.png", 40, 20);
        write_png(tmp.path(), "A.png", 10, 30);
        write_png(tmp.path(), "c.PNG", 8, 8);
        std::fs::write(tmp.path().join("notes.txt"), "hello").unwrap();

        let found = scan_images(tmp.path(), &ScanConfig::default()).unwrap();
        let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A.png", "b.png", "c.PNG"]);
        assert_eq!((found[1].width_px, found[1].height_px), (40, 20));
    }

    #[test]
    fn test_scan_skips_hidden_unless_requested() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), ".secret.png", 4, 4);
        write_png(tmp.path(), "shown.png", 4, 4);

        let found = scan_images(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);

        let config = ScanConfig {
            show_hidden: true,
            ..ScanConfig::default()
        };
        let found = scan_images(tmp.path(), &config).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_depth() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "top.png", 4, 4);
        write_png(tmp.path(), "nested/deep.png", 4, 4);

        let found = scan_images(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);

        let config = ScanConfig {
            max_depth: 2,
            ..ScanConfig::default()
        };
        let found = scan_images(tmp.path(), &config).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|e| e.name.ends_with("deep.png")));
    }

    #[test]
    fn test_scan_skips_unreadable_images() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("broken.png"), b"not a png").unwrap();
        write_png(tmp.path(), "ok.png", 4, 4);

        let found = scan_images(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ok.png");
    }

    #[test]
    fn test_walk_errors_are_dropped_not_fatal() {
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert!(walk_entry(Err(ignore::Error::Io(denied))).is_none());

        let tmp = tempfile::tempdir().unwrap();
        let first = WalkBuilder::new(tmp.path()).build().next().unwrap();
        let entry = walk_entry(first).unwrap();
        assert_eq!(entry.path(), tmp.path());
    }

    #[test]
    fn test_scan_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let found = scan_images(tmp.path(), &ScanConfig::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            scan_images(&file, &ScanConfig::default()),
            Err(StripError::NotADirectory(_))
        ));
        assert!(matches!(
            scan_images(&tmp.path().join("missing"), &ScanConfig::default()),
            Err(StripError::Io { .. })
        ));
    }
}
