//! # File Management Module
//!
//! Questo modulo gestisce l'attraversamento della directory di input e la
//! classificazione dei file.
//!
//! ## Responsabilità:
//! - Attraversamento ricorsivo (lazy) della radice di input
//! - Determinazione categoria file (immagine, video, non supportato)
//! - Utilità per dimensioni file e conversione in MB
//!
//! ## Formati supportati:
//! - **Immagini**: JPG, JPEG, PNG, GIF, BMP, TIFF
//! - **Video**: MP4, MOV, AVI, MKV, WebM
//!
//! L'estensione è confrontata in modo case-insensitive.
//!
//! ## Esempio:
//! ```rust,no_run
//! use web_media_compressor::file_manager::{FileManager, MediaKind};
//! use std::path::Path;
//!
//! for entry in FileManager::walk(Path::new("./assets"), None)? {
//!     let entry = entry?;
//!     if MediaKind::classify(entry.path()) == Some(MediaKind::Image) {
//!         // process image
//!     }
//! }
//! # Ok::<(), web_media_compressor::CompressError>(())
//! ```

use crate::error::CompressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm"];

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Category a file is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a path by its extension, `None` when unsupported
    pub fn classify(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("image"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Lazily walk every entry below `root`, directories included.
    ///
    /// Entries are sorted by file name inside each directory so repeated runs see
    /// the same order. The root itself is not yielded, nor is anything under
    /// `exclude` (an output directory nested inside the input root).
    pub fn walk(
        root: &Path,
        exclude: Option<PathBuf>,
    ) -> Result<impl Iterator<Item = Result<DirEntry, walkdir::Error>>, CompressError> {
        if !root.exists() {
            return Err(CompressError::InputNotFound(root.to_path_buf()));
        }

        Ok(WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| exclude.as_deref() != Some(entry.path())))
    }

    /// Size of a file in bytes
    pub async fn get_file_size(path: &Path) -> Result<u64, CompressError> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    /// Convert bytes to megabytes
    pub fn to_mb(size: u64) -> f64 {
        size as f64 / BYTES_PER_MB
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(MediaKind::classify(Path::new("a/photo.PNG")), Some(MediaKind::Image));
        assert_eq!(MediaKind::classify(Path::new("b.JpEg")), Some(MediaKind::Image));
        assert_eq!(MediaKind::classify(Path::new("scan.tiff")), Some(MediaKind::Image));
        assert_eq!(MediaKind::classify(Path::new("clip.MOV")), Some(MediaKind::Video));
        assert_eq!(MediaKind::classify(Path::new("x.webm")), Some(MediaKind::Video));
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(MediaKind::classify(Path::new("notes.txt")), None);
        assert_eq!(MediaKind::classify(Path::new("already.webp")), None);
        assert_eq!(MediaKind::classify(Path::new("scan.tif")), None);
        assert_eq!(MediaKind::classify(Path::new("Makefile")), None);
        assert_eq!(MediaKind::classify(Path::new(".png")), None);
    }

    #[test]
    fn test_walk_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        match FileManager::walk(&missing, None) {
            Err(CompressError::InputNotFound(p)) => assert_eq!(p, missing),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("walk of a missing root must fail"),
        }
    }

    #[test]
    fn test_walk_recursive_and_ordered() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("sub/deeper")).unwrap();
        std::fs::write(temp.path().join("b.png"), b"x").unwrap();
        std::fs::write(temp.path().join("a.txt"), b"x").unwrap();
        std::fs::write(temp.path().join("sub/deeper/c.mp4"), b"x").unwrap();

        let walked: Vec<PathBuf> = FileManager::walk(temp.path(), None)
            .unwrap()
            .map(|e| e.unwrap().path().strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            walked,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.png"),
                PathBuf::from("sub"),
                PathBuf::from("sub/deeper"),
                PathBuf::from("sub/deeper/c.mp4"),
            ]
        );
    }

    #[test]
    fn test_walk_skips_excluded_subtree() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("optimized")).unwrap();
        std::fs::write(temp.path().join("optimized/old.jpg"), b"x").unwrap();
        std::fs::write(temp.path().join("new.jpg"), b"x").unwrap();

        let walked: Vec<PathBuf> = FileManager::walk(temp.path(), Some(temp.path().join("optimized")))
            .unwrap()
            .map(|e| e.unwrap().into_path())
            .collect();

        assert_eq!(walked, vec![temp.path().join("new.jpg")]);
    }

    #[test]
    fn test_to_mb() {
        assert_eq!(FileManager::to_mb(0), 0.0);
        assert_eq!(FileManager::to_mb(1024 * 1024), 1.0);
        assert_eq!(FileManager::to_mb(3 * 512 * 1024), 1.5);
    }

    #[tokio::test]
    async fn test_get_file_size() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f.bin");
        std::fs::write(&path, vec![0u8; 1234]).unwrap();
        assert_eq!(FileManager::get_file_size(&path).await.unwrap(), 1234);
        assert!(FileManager::get_file_size(&temp.path().join("missing")).await.is_err());
    }
}
