#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Saves a `width` x `height` PNG filled with a single RGBA color
pub fn create_solid_image(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .expect("Failed to save test image");
}

/// Saves a PNG without an alpha channel
pub fn create_rgb_image(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(path)
        .expect("Failed to save test image");
}

/// Saves a bright, round badge: white disc on a transparent background
pub fn create_round_badge(path: &Path, size: u32) {
    let center = (size / 2) as i64;
    let mut image = RgbaImage::new(size, size);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as i64 - center;
        let dy = y as i64 - center;
        let alpha = if dx * dx + dy * dy <= center * center { 255 } else { 0 };

        // Keep the transparent corners bright too, they count toward the average
        *pixel = Rgba([255, 255, 255, alpha]);
    }

    image.save(path).expect("Failed to save test image");
}
