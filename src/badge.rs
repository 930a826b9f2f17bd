use crate::error::{BadgeError, Result};
use image::{imageops::FilterType, io::Reader, DynamicImage, ImageOutputFormat, RgbaImage};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, info, warn};

/// Width and height, in pixels, every badge must have.
pub const BADGE_SIZE: u32 = 512;

/// Alpha strictly above this marks a pixel as nontransparent.
///
/// Alpha is 8-bit, so no decoded pixel ever clears this bar and the circle
/// check passes for every image. Kept as-is on purpose; lowering it changes
/// which badges are accepted.
pub(crate) const NONTRANSPARENT_ALPHA: u16 = 300;

/// Average luma a badge must exceed to count as "happy".
pub const HAPPY_LUMA_THRESHOLD: f64 = 150.0;

/// Where `convert` writes when no output path is given.
pub const DEFAULT_OUTPUT_PATH: &str = "converted_badge.png";

pub const VALID_BADGE_MESSAGE: &str = "Badge is valid and happy :).";

/// A decoded badge image.
///
/// Pixels are held as RGBA8 whatever the source layout, so channels are read
/// by name. `has_alpha` remembers whether the source actually carried alpha.
#[derive(Debug, Clone)]
pub struct Badge {
    pixels: RgbaImage,
    has_alpha: bool,
}

impl From<DynamicImage> for Badge {
    fn from(img: DynamicImage) -> Self {
        let has_alpha = img.color().has_alpha();
        Self {
            pixels: img.to_rgba8(),
            has_alpha,
        }
    }
}

impl Badge {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// The circle inscribed in this badge's bounds.
    pub fn circle(&self) -> CircleMask {
        CircleMask::inscribed(self.width(), self.height())
    }

    /// Run the size, transparency and mood checks, stopping at the first
    /// failure.
    pub fn verify(&self) -> Result<String> {
        if (self.height(), self.width()) != (BADGE_SIZE, BADGE_SIZE) {
            warn!(width = self.width(), height = self.height(), "badge has the wrong size");
            return Err(BadgeError::InvalidSize {
                width: self.width(),
                height: self.height(),
            });
        }

        if !is_inside_circle(self)? {
            warn!("badge has nontransparent pixels outside its circle");
            return Err(BadgeError::InvalidTransparencyRegion);
        }

        if !has_happy_colors(self) {
            warn!("badge is too dark");
            return Err(BadgeError::InvalidMood);
        }

        Ok(VALID_BADGE_MESSAGE.to_string())
    }

    /// Measurements behind the checks, without judging them.
    pub fn stats(&self) -> BadgeStats {
        let circle = self.circle();
        let (nontransparent_pixels, pixels_outside_circle) = if self.has_alpha {
            let mut inside = 0;
            let mut outside = 0;
            for (x, y, pixel) in self.pixels.enumerate_pixels() {
                if u16::from(pixel[3]) > NONTRANSPARENT_ALPHA {
                    if circle.contains(x, y) {
                        inside += 1;
                    } else {
                        outside += 1;
                    }
                }
            }
            (inside + outside, outside)
        } else {
            (0, 0)
        };

        BadgeStats {
            width: self.width(),
            height: self.height(),
            has_alpha: self.has_alpha,
            circle,
            average_luma: average_luma(self),
            nontransparent_pixels,
            pixels_outside_circle,
        }
    }
}

/// The largest circle centred in a `width` x `height` image.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleMask {
    pub center_x: i64,
    pub center_y: i64,
    pub radius: i64,
}

impl CircleMask {
    pub fn inscribed(width: u32, height: u32) -> Self {
        let center_x = i64::from(width / 2);
        let center_y = i64::from(height / 2);
        Self {
            center_x,
            center_y,
            radius: center_x.min(center_y),
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        is_inside_circle_point(
            i64::from(x),
            i64::from(y),
            self.center_x,
            self.center_y,
            self.radius,
        )
    }
}

/// Everything `inspect_badge` reports.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BadgeStats {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub circle: CircleMask,
    /// `None` for an image without pixels.
    pub average_luma: Option<f64>,
    pub nontransparent_pixels: u64,
    pub pixels_outside_circle: u64,
}

/// Decode the image at `path`.
pub fn load_badge(path: impl AsRef<Path>) -> Result<Badge> {
    let path = path.as_ref();
    let img = decode_image(path)?;

    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded badge"
    );

    Ok(Badge::from(img))
}

/// Decode `path`, picking the format from the file's content and falling back
/// to its extension.
fn decode_image(path: &Path) -> Result<DynamicImage> {
    let decode = || -> image::ImageResult<DynamicImage> {
        Reader::open(path)?.with_guessed_format()?.decode()
    };

    decode().map_err(|source| BadgeError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Check that the badge at `path` is 512x512, round and bright.
pub fn verify_badge(path: impl AsRef<Path>) -> Result<String> {
    load_badge(path)?.verify()
}

/// Report the measurements of the badge at `path`.
pub fn inspect_badge(path: impl AsRef<Path>) -> Result<BadgeStats> {
    Ok(load_badge(path)?.stats())
}

/// True when every nontransparent pixel lies within the inscribed circle.
///
/// Fails with [`BadgeError::ChannelAccess`] when the badge has no alpha.
pub fn is_inside_circle(badge: &Badge) -> Result<bool> {
    if !badge.has_alpha {
        return Err(BadgeError::ChannelAccess);
    }

    Ok(first_pixel_outside_circle(badge, NONTRANSPARENT_ALPHA).is_none())
}

/// First pixel, in row-major order, with alpha above `alpha_threshold` that
/// falls outside the badge's circle.
pub(crate) fn first_pixel_outside_circle(
    badge: &Badge,
    alpha_threshold: u16,
) -> Option<(u32, u32)> {
    let circle = badge.circle();
    badge
        .pixels
        .enumerate_pixels()
        .find(|(x, y, pixel)| u16::from(pixel[3]) > alpha_threshold && !circle.contains(*x, *y))
        .map(|(x, y, _)| (x, y))
}

pub fn is_inside_circle_point(x: i64, y: i64, center_x: i64, center_y: i64, radius: i64) -> bool {
    let dx = i128::from(x) - i128::from(center_x);
    let dy = i128::from(y) - i128::from(center_y);
    let radius = i128::from(radius);

    // A squared distance beyond i128 exceeds any i64 radius squared
    dx.checked_mul(dx)
        .zip(dy.checked_mul(dy))
        .and_then(|(dx2, dy2)| dx2.checked_add(dy2))
        .is_some_and(|distance2| distance2 <= radius * radius)
}

/// Average of `0.3*R + 0.59*G + 0.11*B` over every pixel, transparent ones
/// included. `None` when the image has no pixels.
pub fn average_luma(badge: &Badge) -> Option<f64> {
    let count = u64::from(badge.width()) * u64::from(badge.height());
    if count == 0 {
        return None;
    }

    let total: f64 = badge
        .pixels
        .pixels()
        .map(|pixel| {
            let (red, green, blue) = (pixel[0], pixel[1], pixel[2]);
            0.3 * f64::from(red) + 0.59 * f64::from(green) + 0.11 * f64::from(blue)
        })
        .sum();

    Some(total / count as f64)
}

pub fn has_happy_colors(badge: &Badge) -> bool {
    let average = average_luma(badge);
    debug!(?average, "average badge luma");
    average.is_some_and(|luma| luma > HAPPY_LUMA_THRESHOLD)
}

/// Resize the image at `path` to 512x512 and save it to `output_path` as PNG.
///
/// The aspect ratio is not preserved and the result is not verified.
pub fn convert_to_badge(path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let output_path = output_path.as_ref();

    let source = decode_image(path)?;

    // Bilinear, matching the usual default of generic resize routines
    let resized = source.resize_exact(BADGE_SIZE, BADGE_SIZE, FilterType::Triangle);
    save_png(&resized, output_path)?;

    info!(
        from = %path.display(),
        to = %output_path.display(),
        "converted badge"
    );

    Ok(format!(
        "Badge successfully converted and saved as {}",
        output_path.display()
    ))
}

fn save_png(img: &DynamicImage, path: &Path) -> Result<()> {
    let write_error = |source: std::io::Error| BadgeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = BufWriter::new(File::create(path).map_err(write_error)?);
    img.write_to(&mut file, ImageOutputFormat::Png)
        .map_err(|source| BadgeError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    file.flush().map_err(write_error)?;
    Ok(())
}
