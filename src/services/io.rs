//! Image I/O operations service
//!
//! This module separates file I/O operations from the pixel rules,
//! making the transforms testable without touching the filesystem.

use crate::error::{PixelOpsError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Write;
use std::path::Path;

/// Placeholder path used in errors for in-memory sources and sinks
const MEMORY_PATH: &str = "<memory>";

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Extension-based format detection is tried first, then content-based
    /// detection.
    ///
    /// # Errors
    /// * `NotFound` - the path does not exist
    /// * `Io` - the file exists but cannot be read
    /// * `Decode` - the file is not a decodable image
    ///
    /// # Examples
    /// ```rust,no_run
    /// use rgba_ops::services::ImageIOService;
    ///
    /// let image = ImageIOService::load_image("input.jpg")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(PixelOpsError::not_found(path_ref));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    PixelOpsError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    let extension = path_ref
                        .extension()
                        .and_then(|s| s.to_str())
                        .unwrap_or("unknown");

                    PixelOpsError::decode(
                        path_ref,
                        format!(
                            "not a supported image (extension: {}, {} bytes). Extension error: {}. Content error: {}",
                            extension,
                            data.len(),
                            e,
                            content_err
                        ),
                    )
                })
            },
        }
    }

    /// Load an image from bytes
    pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| PixelOpsError::decode(MEMORY_PATH, e.to_string()))
    }

    /// Convert any decoded image to an 8-bit RGBA buffer
    ///
    /// * RGBA8 sources are moved through without copying.
    /// * Sources without alpha get alpha 255.
    /// * Grayscale sources replicate luma into r, g and b.
    /// * 16-bit and float sources are scaled to 8 bits per channel.
    ///
    /// Palette images are expanded by the decoders before they reach this
    /// point.
    #[must_use]
    pub fn normalize_to_rgba(image: DynamicImage) -> RgbaImage {
        match image {
            DynamicImage::ImageRgba8(buffer) => buffer,
            other => other.to_rgba8(),
        }
    }

    /// Human-readable color type of a decoded image, e.g. `Rgb8`
    #[must_use]
    pub fn color_type_name(image: &DynamicImage) -> String {
        format!("{:?}", image.color())
    }

    /// Encode an RGBA buffer as PNG bytes
    pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| PixelOpsError::encode(MEMORY_PATH, e.to_string()))?;
        Ok(buffer)
    }

    /// Save an RGBA buffer as a PNG file, atomically
    ///
    /// The PNG is encoded in memory, written to a temporary file next to the
    /// destination and renamed into place. The parent directory must already
    /// exist. On failure nothing is left at `path`.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use rgba_ops::services::ImageIOService;
    /// use image::RgbaImage;
    ///
    /// let image = RgbaImage::new(100, 100);
    /// ImageIOService::save_png(&image, "output.png")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
        let path_ref = path.as_ref();

        let parent = match path_ref.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(PixelOpsError::encode(
                path_ref,
                format!("output directory '{}' does not exist", parent.display()),
            ));
        }

        if path_ref.is_dir() {
            return Err(PixelOpsError::encode(path_ref, "output path is a directory"));
        }

        let bytes = Self::encode_png(image).map_err(|e| match e {
            PixelOpsError::Encode { message, .. } => PixelOpsError::encode(path_ref, message),
            other => other,
        })?;

        let mut temp = tempfile::Builder::new()
            .prefix(".rgba-ops-")
            .suffix(".png.tmp")
            .tempfile_in(parent)
            .map_err(|e| {
                PixelOpsError::encode(path_ref, format!("cannot create temporary file: {}", e))
            })?;

        temp.write_all(&bytes)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| PixelOpsError::encode(path_ref, format!("write failed: {}", e)))?;

        temp.persist(path_ref).map_err(|e| {
            PixelOpsError::encode(path_ref, format!("cannot move into place: {}", e.error))
        })?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path_ref.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};
    use tempfile::tempdir;

    fn list_dir(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ImageIOService::load_image("nonexistent.jpg");
        assert!(matches!(result, Err(PixelOpsError::NotFound(_))));
    }

    #[test]
    fn test_load_non_image_is_decode_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("notes.png");
        std::fs::write(&path, b"This is not an image").unwrap();

        let err = ImageIOService::load_image(&path).unwrap_err();
        assert!(matches!(err, PixelOpsError::Decode { .. }), "{err}");
        assert!(err.to_string().contains("notes.png"));
    }

    #[test]
    fn test_load_detects_content_with_wrong_extension() {
        let temp_dir = tempdir().unwrap();
        let png_path = temp_dir.path().join("real.png");
        let misnamed = temp_dir.path().join("real.jpg");

        ImageIOService::save_png(&RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4])), &png_path)
            .unwrap();
        std::fs::rename(&png_path, &misnamed).unwrap();

        let loaded = ImageIOService::load_image(&misnamed).unwrap();
        assert_eq!(loaded.width(), 3);
        assert_eq!(loaded.height(), 2);
    }

    #[test]
    fn test_load_from_bytes_invalid_and_empty() {
        assert!(matches!(
            ImageIOService::load_from_bytes(b"garbage"),
            Err(PixelOpsError::Decode { .. })
        ));
        assert!(ImageIOService::load_from_bytes(&[]).is_err());
    }

    #[test]
    fn test_normalize_rgb_gets_opaque_alpha() {
        let rgb = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let rgba = ImageIOService::normalize_to_rgba(DynamicImage::ImageRgb8(rgb));

        assert_eq!(rgba.dimensions(), (2, 2));
        assert!(rgba.pixels().all(|px| px.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_normalize_gray_replicates_luma() {
        let gray = GrayImage::from_pixel(1, 1, Luma([77]));
        let image = DynamicImage::ImageLuma8(gray);
        assert_eq!(ImageIOService::color_type_name(&image), "L8");

        let rgba = ImageIOService::normalize_to_rgba(image);
        assert_eq!(rgba.get_pixel(0, 0).0, [77, 77, 77, 255]);
    }

    #[test]
    fn test_normalize_rgba_is_identity() {
        let mut buffer = RgbaImage::new(2, 1);
        buffer.put_pixel(1, 0, Rgba([1, 2, 3, 0]));
        let rgba = ImageIOService::normalize_to_rgba(DynamicImage::ImageRgba8(buffer.clone()));
        assert_eq!(rgba, buffer);
    }

    #[test]
    fn test_save_png_roundtrip_keeps_alpha() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("alpha.png");

        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 0]));
        image.put_pixel(1, 1, Rgba([255, 255, 255, 255]));

        ImageIOService::save_png(&image, &path).unwrap();

        let loaded = ImageIOService::load_image(&path).unwrap();
        assert_eq!(loaded.color(), image::ColorType::Rgba8);
        assert_eq!(ImageIOService::normalize_to_rgba(loaded), image);
        assert_eq!(list_dir(temp_dir.path()), vec!["alpha.png".to_string()]);
    }

    #[test]
    fn test_save_png_overwrites_existing_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out.png");
        std::fs::write(&path, b"old contents").unwrap();

        ImageIOService::save_png(&RgbaImage::new(1, 1), &path).unwrap();

        let loaded = ImageIOService::load_image(&path).unwrap();
        assert_eq!(loaded.width(), 1);
    }

    #[test]
    fn test_save_png_missing_directory_is_not_created() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("missing").join("out.png");

        let err = ImageIOService::save_png(&RgbaImage::new(1, 1), &nested).unwrap_err();
        assert!(matches!(err, PixelOpsError::Encode { .. }));
        assert!(!nested.exists());
        assert!(!temp_dir.path().join("missing").exists());
    }

    #[test]
    fn test_save_png_to_directory_path_fails_cleanly() {
        let temp_dir = tempdir().unwrap();
        let err = ImageIOService::save_png(&RgbaImage::new(1, 1), temp_dir.path()).unwrap_err();
        assert!(matches!(err, PixelOpsError::Encode { .. }));
        assert!(list_dir(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = ImageIOService::encode_png(&RgbaImage::new(1, 1)).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
