//! Error handling and edge case testing
//!
//! Every failing call must report the right error class and leave no file
//! behind at the output path.

use image::{Rgba, RgbaImage};
use rgba_ops::{
    invert, mask_by_brightness, remove_background, PixelOpsError, ProcessingStage,
    TransformConfig, TransformKind, TransformProcessor,
};
use std::path::Path;
use tempfile::TempDir;

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn small_png(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("input.png");
    RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_missing_input_is_not_found_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("does-not-exist.png");
    let output = temp_dir.path().join("out.png");

    for result in [
        invert(&input, &output),
        remove_background(&input, &output, 30),
        mask_by_brightness(&input, &output, 100),
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, PixelOpsError::NotFound(ref p) if p == &input), "{err}");
        assert!(err.is_not_found());
        assert_eq!(err.stage(), ProcessingStage::ImageLoading);
    }

    assert!(!output.exists());
    assert!(entries(temp_dir.path()).is_empty());
}

#[test]
fn test_non_image_input_is_decode_error_and_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("notes.txt");
    std::fs::write(&input, "definitely not pixels").unwrap();
    let output = temp_dir.path().join("out.png");

    let err = invert(&input, &output).unwrap_err();
    assert!(matches!(err, PixelOpsError::Decode { .. }), "{err}");
    assert!(!err.is_not_found());
    assert!(!output.exists());
    assert_eq!(entries(temp_dir.path()), vec!["notes.txt".to_string()]);
}

#[test]
fn test_truncated_png_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let valid = small_png(temp_dir.path());
    let bytes = std::fs::read(&valid).unwrap();
    let truncated = temp_dir.path().join("truncated.png");
    std::fs::write(&truncated, &bytes[..bytes.len() / 2]).unwrap();
    let output = temp_dir.path().join("out.png");

    let err = remove_background(&truncated, &output, 30).unwrap_err();
    assert!(matches!(err, PixelOpsError::Decode { .. }), "{err}");
    assert!(!output.exists());
}

#[test]
fn test_empty_input_file_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("empty.png");
    std::fs::write(&input, b"").unwrap();

    let err = invert(&input, temp_dir.path().join("out.png")).unwrap_err();
    assert!(matches!(err, PixelOpsError::Decode { .. }), "{err}");
}

#[test]
fn test_missing_output_directory_is_encode_error_and_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = small_png(temp_dir.path());
    let missing_dir = temp_dir.path().join("no").join("such").join("dir");
    let output = missing_dir.join("out.png");

    let err = mask_by_brightness(&input, &output, 100).unwrap_err();
    assert!(matches!(err, PixelOpsError::Encode { .. }), "{err}");
    assert_eq!(err.stage(), ProcessingStage::FileSaving);
    assert!(!temp_dir.path().join("no").exists());
    assert_eq!(entries(temp_dir.path()), vec!["input.png".to_string()]);
}

#[test]
fn test_output_path_that_is_a_directory_is_encode_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = small_png(temp_dir.path());
    let target = temp_dir.path().join("taken");
    std::fs::create_dir(&target).unwrap();

    let err = invert(&input, &target).unwrap_err();
    assert!(matches!(err, PixelOpsError::Encode { .. }), "{err}");
    assert!(target.is_dir());
    assert!(entries(&target).is_empty());
    assert_eq!(
        entries(temp_dir.path()),
        vec!["input.png".to_string(), "taken".to_string()]
    );
}

#[test]
fn test_failed_run_keeps_previous_output_intact() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.png");
    std::fs::write(&output, b"previous result").unwrap();

    let bogus = temp_dir.path().join("bogus.png");
    std::fs::write(&bogus, b"xx").unwrap();

    assert!(invert(&bogus, &output).is_err());
    assert_eq!(std::fs::read(&output).unwrap(), b"previous result");
}

#[test]
fn test_threshold_outside_byte_range_is_invalid_argument() {
    for raw in [-1_i64, 256, 300, i64::MAX] {
        let err = TransformConfig::builder()
            .kind(TransformKind::remove_background())
            .threshold_value(raw)
            .build()
            .unwrap_err();
        assert!(matches!(err, PixelOpsError::InvalidArgument(_)), "{err}");
        assert!(err.to_string().contains("0-255"));
        assert_eq!(err.stage(), ProcessingStage::Initialization);
    }
}

#[test]
fn test_threshold_extremes_are_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let input = small_png(temp_dir.path());

    // Nothing is strictly below 0, so threshold 0 never removes anything
    let result = remove_background(&input, temp_dir.path().join("zero.png"), 0).unwrap();
    assert_eq!(result.metadata.pixels_transparent, 0);

    // No mean brightness exceeds 255, so everything is masked
    let result = mask_by_brightness(&input, temp_dir.path().join("max.png"), 255).unwrap();
    assert_eq!(result.metadata.pixels_transparent, 16);
    assert!(result.image.pixels().all(|px| px.0 == [255, 255, 255, 0]));
}

#[test]
fn test_single_pixel_and_wide_images() {
    let temp_dir = TempDir::new().unwrap();

    for (width, height) in [(1, 1), (1, 257), (513, 1)] {
        let input = temp_dir.path().join(format!("in-{width}x{height}.png"));
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
            .save(&input)
            .unwrap();
        let output = temp_dir.path().join(format!("out-{width}x{height}.png"));

        let mut processor = TransformProcessor::new(TransformConfig::default());
        let result = processor.process_file(&input, &output).unwrap();
        assert_eq!(result.dimensions(), (width, height));
        assert!(result.image.pixels().all(|px| px.0 == [255, 255, 255, 255]));
    }
}

#[test]
fn test_garbage_bytes_in_memory_are_decode_error() {
    let mut processor = TransformProcessor::new(TransformConfig::default());
    let err = processor.process_bytes(&[0x89, b'P', b'N', b'G']).unwrap_err();
    assert!(matches!(err, PixelOpsError::Decode { .. }), "{err}");
}
