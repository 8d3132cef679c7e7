use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::types::{ImageError, PixelGrid};

/// Extensions recognized as image files, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// True if the path carries a recognized image extension.
pub fn is_supported(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate)),
        None => false,
    }
}

/// List the image files in a folder, sorted by name so the batch order is
/// deterministic across platforms.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read folder {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Decode an image file into a pixel grid. Only 8-bit three-channel RGB is
/// accepted; any other color model reports `NotRgb` and no pixel data is
/// materialized for it. Open and decode failures report `OpenFailed`.
pub fn read_rgb(path: &Path) -> Result<PixelGrid, ImageError> {
    let decoded = image::open(path).map_err(|_| ImageError::OpenFailed)?;
    match decoded {
        DynamicImage::ImageRgb8(rgb) => Ok(PixelGrid::from_rgb8(&rgb)),
        _ => Err(ImageError::NotRgb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn extension_filter_is_case_insensitive() {
        for name in ["a.png", "b.PNG", "c.Jpg", "d.jpeg", "e.TIF", "f.tiff"] {
            assert!(is_supported(Path::new(name)), "{} should match", name);
        }
        for name in ["notes.txt", "archive.png.gz", "image", "run.csv"] {
            assert!(!is_supported(Path::new(name)), "{} should not match", name);
        }
    }

    #[test]
    fn listing_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "z.txt", "c.TIFF"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.TIFF"]);
    }

    #[test]
    fn listing_a_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_images(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn rgb_png_round_trips_through_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let buffer =
            image::RgbImage::from_raw(2, 1, vec![10, 20, 30, 200, 150, 100]).unwrap();
        buffer.save(&path).unwrap();

        let grid = read_rgb(&path).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(grid.red(), &[10.0, 200.0]);
        assert_eq!(grid.green(), &[20.0, 150.0]);
        assert_eq!(grid.blue(), &[30.0, 100.0]);
    }

    #[test]
    fn non_rgb_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let gray = image::GrayImage::from_raw(2, 2, vec![0, 64, 128, 255]).unwrap();
        gray.save(&path).unwrap();

        assert_eq!(read_rgb(&path).err(), Some(ImageError::NotRgb));
    }

    #[test]
    fn unreadable_file_reports_open_failure() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.png");
        assert_eq!(read_rgb(&missing).err(), Some(ImageError::OpenFailed));

        let garbage = dir.path().join("garbage.png");
        let mut file = File::create(&garbage).unwrap();
        file.write_all(b"not an image at all").unwrap();
        assert_eq!(read_rgb(&garbage).err(), Some(ImageError::OpenFailed));
    }
}
