//! # Image Processing Module
//!
//! Compresses a single image: `image` decodes and resizes, `jpeg-encoder` and `webp` encode.
//!
//! ## Pipeline
//!
//! 1. Decode the source (JPEG, PNG, GIF, BMP, TIFF), format sniffed from the content
//! 2. When the target is JPEG, flatten any transparency onto a white background
//! 3. Downscale with Lanczos3 so neither side exceeds `max_img_dim`, keeping aspect ratio
//! 4. Encode:
//!    - **WebP**: lossy libwebp at `img_quality`, method 6, exact mode, alpha kept
//!    - **JPEG**: progressive at `img_quality`, optimized Huffman tables, 4:4:4 chroma
//!
//! The output extension is always forced to the target format, whatever the
//! destination path passed in.
//!
//! Decoding and encoding are CPU bound, so `compress` runs the work on tokio's
//! blocking pool and awaits it before returning. Jobs still run one at a time.

use crate::config::Config;
use crate::error::CompressError;
use anyhow::Result;
use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use jpeg_encoder::{ColorType as JpegColorType, Encoder as JpegEncoder, SamplingFactor};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// libwebp effort level, slowest and smallest
const WEBP_METHOD: i32 = 6;

/// Extension written for image outputs
pub fn output_extension(to_webp: bool) -> &'static str {
    if to_webp {
        "webp"
    } else {
        "jpg"
    }
}

/// Parameters of a single image conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSettings {
    pub quality: u8,
    pub max_dim: u32,
    pub to_webp: bool,
    pub preserve_alpha: bool,
}

impl From<&Config> for ImageSettings {
    fn from(config: &Config) -> Self {
        Self {
            quality: config.img_quality,
            max_dim: config.max_img_dim,
            to_webp: config.to_webp,
            preserve_alpha: true,
        }
    }
}

/// Handles image compression
pub struct ImageProcessor {
    settings: ImageSettings,
}

impl ImageProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            settings: ImageSettings::from(config),
        }
    }

    /// Compress `input_path` into `output_path` and return the path actually written
    pub async fn compress(&self, input_path: &Path, output_path: &Path) -> Result<PathBuf> {
        let settings = self.settings;
        let input = input_path.to_path_buf();
        let output = output_path.to_path_buf();

        let written = tokio::task::spawn_blocking(move || compress_image(&input, &output, settings))
            .await
            .map_err(|e| anyhow::anyhow!("Image task failed for {}: {}", input_path.display(), e))??;

        Ok(written)
    }
}

/// Blocking image conversion
pub fn compress_image(
    input_path: &Path,
    output_path: &Path,
    settings: ImageSettings,
) -> Result<PathBuf, CompressError> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;
    debug!(
        "Decoded {} ({}x{}, {:?})",
        input_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    let needs_flatten = !settings.to_webp || !settings.preserve_alpha;
    if needs_flatten && img.color().has_alpha() {
        img = DynamicImage::ImageRgb8(flatten_on_white(&img));
    }

    img = fit_within(img, settings.max_dim);

    let final_path = output_path.with_extension(output_extension(settings.to_webp));
    let mut writer = BufWriter::new(File::create(&final_path)?);

    if settings.to_webp {
        encode_webp(&mut writer, &img, settings.quality)?;
    } else {
        encode_jpeg(&mut writer, &img, settings.quality)?;
    }
    writer.flush()?;

    Ok(final_path)
}

/// Composite every pixel over an opaque white background
pub fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        flat.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    flat
}

/// Downscale so the larger side equals `max_dim`; smaller images are returned untouched
pub fn fit_within(img: DynamicImage, max_dim: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width.max(height) <= max_dim {
        return img;
    }

    debug!("Resizing {}x{} to fit within {}", width, height, max_dim);
    img.resize(max_dim, max_dim, FilterType::Lanczos3)
}

fn encode_jpeg<W: Write>(writer: &mut W, img: &DynamicImage, quality: u8) -> Result<(), CompressError> {
    let (width, height) = jpeg_dimensions(img)?;

    let mut encoder = JpegEncoder::new(writer, quality);
    encoder.set_progressive(true);
    encoder.set_optimized_huffman_tables(true);
    encoder.set_sampling_factor(SamplingFactor::R_4_4_4);

    let result = match img {
        DynamicImage::ImageLuma8(gray) => encoder.encode(gray.as_raw(), width, height, JpegColorType::Luma),
        other => encoder.encode(other.to_rgb8().as_raw(), width, height, JpegColorType::Rgb),
    };
    result.map_err(|e| CompressError::Encode(format!("JPEG: {}", e)))
}

/// JPEG headers store 16-bit dimensions
fn jpeg_dimensions(img: &DynamicImage) -> Result<(u16, u16), CompressError> {
    let too_large = || {
        CompressError::Encode(format!(
            "JPEG: {}x{} exceeds the 65535 pixel limit",
            img.width(),
            img.height()
        ))
    };
    let width = u16::try_from(img.width()).map_err(|_| too_large())?;
    let height = u16::try_from(img.height()).map_err(|_| too_large())?;
    Ok((width, height))
}

fn encode_webp<W: Write>(writer: &mut W, img: &DynamicImage, quality: u8) -> Result<(), CompressError> {
    let mut config = webp::WebPConfig::new()
        .map_err(|_| CompressError::Encode("WebP: libwebp config init failed".to_string()))?;
    config.quality = quality as f32;
    config.method = WEBP_METHOD;
    config.exact = 1;
    config.lossless = 0;

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height()).encode_advanced(&config)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height()).encode_advanced(&config)
    }
    .map_err(|e| CompressError::Encode(format!("WebP: {:?}", e)))?;

    writer.write_all(&encoded)?;
    Ok(())
}
