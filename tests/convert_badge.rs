mod common;

use badge_check::badge::{convert_to_badge, verify_badge, BADGE_SIZE};
use badge_check::error::{BadgeError, FailureKind};
use common::{create_rgb_image, create_solid_image};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

#[test]
fn test_convert_produces_512x512_for_any_aspect_ratio() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    for (width, height) in [(1024, 256), (100, 700), (512, 512), (3, 5)] {
        let source_path = temp_dir.path().join(format!("source_{width}x{height}.png"));
        let output_path = temp_dir.path().join(format!("badge_{width}x{height}.png"));
        create_solid_image(&source_path, width, height, [10, 200, 30, 255]);

        let message = convert_to_badge(&source_path, &output_path)
            .unwrap_or_else(|e| panic!("Failed to convert {width}x{height}: {e}"));
        assert_eq!(
            message,
            format!(
                "Badge successfully converted and saved as {}",
                output_path.display()
            )
        );

        let converted = image::open(&output_path).expect("Failed to load converted badge");
        assert_eq!(converted.width(), BADGE_SIZE);
        assert_eq!(converted.height(), BADGE_SIZE);
    }
}

#[test]
fn test_convert_writes_png_and_keeps_alpha() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("source.png");
    // The extension does not pick the format
    let output_path = temp_dir.path().join("badge.out");

    let mut source = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 0]));
    source.put_pixel(32, 32, Rgba([255, 255, 255, 255]));
    source.save(&source_path).expect("Failed to save source image");

    convert_to_badge(&source_path, &output_path).expect("Conversion should succeed");

    let bytes = std::fs::read(&output_path).expect("Failed to read converted badge");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let converted = image::load_from_memory(&bytes).expect("Converted badge should decode");
    assert!(converted.color().has_alpha());
}

#[test]
fn test_convert_then_verify_bright_image() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("bright.png");
    let output_path = temp_dir.path().join("converted_badge.png");
    create_solid_image(&source_path, 300, 200, [250, 250, 250, 255]);

    assert!(matches!(
        verify_badge(&source_path),
        Err(BadgeError::InvalidSize { .. })
    ));

    convert_to_badge(&source_path, &output_path).expect("Conversion should succeed");
    assert!(verify_badge(&output_path).is_ok());
}

#[test]
fn test_conversion_does_not_guarantee_validity() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    // Right size after conversion, still too dark
    let dark_path = temp_dir.path().join("dark.png");
    let dark_output = temp_dir.path().join("dark_badge.png");
    create_solid_image(&dark_path, 128, 128, [20, 20, 20, 255]);
    convert_to_badge(&dark_path, &dark_output).expect("Conversion should succeed");
    assert_eq!(
        verify_badge(&dark_output).unwrap_err().kind(),
        FailureKind::InvalidMood
    );

    // No alpha in, no alpha out
    let rgb_path = temp_dir.path().join("rgb.png");
    let rgb_output = temp_dir.path().join("rgb_badge.png");
    create_rgb_image(&rgb_path, 640, 480, [255, 255, 255]);
    convert_to_badge(&rgb_path, &rgb_output).expect("Conversion should succeed");
    assert_eq!(
        verify_badge(&rgb_output).unwrap_err().kind(),
        FailureKind::ChannelAccess
    );
}

#[test]
fn test_convert_missing_input_is_decode_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("never_written.png");

    let err = convert_to_badge(temp_dir.path().join("missing.png"), &output_path)
        .expect_err("Missing input must fail");
    assert_eq!(err.kind(), FailureKind::Decode);
    assert!(!output_path.exists());
}

#[test]
fn test_convert_to_unwritable_path_is_write_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("source.png");
    create_solid_image(&source_path, 16, 16, [255, 255, 255, 255]);

    let output_path = temp_dir.path().join("no_such_dir").join("badge.png");
    let err = convert_to_badge(&source_path, &output_path).expect_err("Output dir is missing");
    assert_eq!(err.kind(), FailureKind::Write);
    assert!(err.to_string().contains("badge.png"));
}
