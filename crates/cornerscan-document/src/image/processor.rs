// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — contrast, high-pass, brightness, grayscale, blur and Canny
// edge preparation for corner detection. Operates on in-memory images using
// the `image` and `imageproc` crates.

use cornerscan_core::config::PreprocessConfig;
use cornerscan_core::error::ScanError;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, info, instrument};

/// Image preparation pipeline operating on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor` wrapping the
/// transformed image, enabling method chaining.
///
/// ```ignore
/// let edges = ImageProcessor::open("page.jpg")?
///     .adjust_contrast(20.0)
///     .high_pass(20.0)
///     .adjust_brightness(20.0)
///     .grayscale()
///     .gaussian_blur(2.0)
///     .canny(75.0, 200.0)
///     .to_rgba_image();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, ScanError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            ScanError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScanError> {
        let img = image::load_from_memory(data).map_err(|err| {
            ScanError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Stretch contrast around mid-grey by `level` in (-255, 259).
    ///
    /// Each RGB channel becomes `f * (c - 128) + 128` with
    /// `f = 259 (level + 255) / (255 (259 - level))`. Alpha is kept.
    #[instrument(skip(self), fields(level))]
    pub fn adjust_contrast(self, level: f32) -> Self {
        let factor = (259.0 * (level + 255.0)) / (255.0 * (259.0 - level));
        debug!(factor, "Adjusting contrast");
        self.map_rgb(|c| factor * (c - 128.0) + 128.0)
    }

    /// Raise every RGB channel darker than `limit_percent` of 255 up to that
    /// limit, flattening dark noise.
    #[instrument(skip(self), fields(limit_percent))]
    pub fn high_pass(self, limit_percent: f32) -> Self {
        let limit = 255.0 * limit_percent / 100.0;
        self.map_rgb(|c| c.max(limit))
    }

    /// Add `percent` of 255 to every RGB channel.
    #[instrument(skip(self), fields(percent))]
    pub fn adjust_brightness(self, percent: f32) -> Self {
        let level = 255.0 * percent / 100.0;
        self.map_rgb(|c| c + level)
    }

    /// Convert the image to grayscale (luma).
    #[instrument(skip(self))]
    pub fn grayscale(self) -> Self {
        debug!("Converting to grayscale");
        Self {
            image: DynamicImage::ImageLuma8(self.image.to_luma8()),
        }
    }

    /// Gaussian blur of the luma channel. The result is grayscale.
    #[instrument(skip(self), fields(sigma))]
    pub fn gaussian_blur(self, sigma: f32) -> Self {
        let blurred = gaussian_blur_f32(&self.image.to_luma8(), sigma);
        Self {
            image: DynamicImage::ImageLuma8(blurred),
        }
    }

    /// Canny edge detection. Edges become white (255) on black.
    #[instrument(skip(self), fields(low, high))]
    pub fn canny(self, low: f32, high: f32) -> Self {
        let edges = canny(&self.image.to_luma8(), low, high);
        Self {
            image: DynamicImage::ImageLuma8(edges),
        }
    }

    /// Run the full preparation chain: contrast, high-pass, brightness,
    /// grayscale, blur, then Canny.
    #[instrument(skip_all)]
    pub fn edge_map(self, config: &PreprocessConfig) -> Self {
        info!(
            width = self.width(),
            height = self.height(),
            "Preparing edge map"
        );
        self.adjust_contrast(config.contrast)
            .high_pass(config.high_pass_percent)
            .adjust_brightness(config.brightness_percent)
            .grayscale()
            .gaussian_blur(config.blur_sigma)
            .canny(config.canny_low, config.canny_high)
    }

    /// Apply `f` to each RGB channel (as `f32`), clamping to 0..=255.
    fn map_rgb(self, f: impl Fn(f32) -> f32) -> Self {
        let rgba = self.image.to_rgba8();
        let mapped = RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            let adjust = |channel: u8| -> u8 { f(channel as f32).clamp(0.0, 255.0) as u8 };
            Rgba([adjust(r), adjust(g), adjust(b), a])
        });
        Self {
            image: DynamicImage::ImageRgba8(mapped),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// The current image as an RGBA8 buffer, the layout the corner search
    /// reads.
    pub fn to_rgba_image(&self) -> RgbaImage {
        self.image.to_rgba8()
    }

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ScanError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| ScanError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), ScanError> {
        self.image.save(path.as_ref()).map_err(|err| {
            ScanError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}
