//! Photo validation and optimization ahead of upload.
//!
//! Both operations are forgiving by design: a photo that fails
//! validation is logged and published as-is, and an optimization failure
//! leaves the original file untouched. The platform is the final judge
//! of what it accepts.

use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};
use std::path::Path;
use tracing::{info, warn};

/// Minimum accepted dimension on either axis
const MIN_DIMENSION: u32 = 200;

#[derive(Debug, Clone)]
pub struct ImageCheck {
    pub valid: bool,
    pub format: Option<String>,
    /// "WIDTHxHEIGHT" when the file decoded
    pub dimensions: Option<String>,
    pub error: Option<String>,
}

impl ImageCheck {
    fn invalid(error: String) -> Self {
        Self {
            valid: false,
            format: None,
            dimensions: None,
            error: Some(error),
        }
    }
}

/// Inspect an image file before upload
pub fn validate_image(path: &Path) -> ImageCheck {
    let reader = match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(e) => return ImageCheck::invalid(e.to_string()),
    };

    let format = match reader.format() {
        Some(format) => format!("{:?}", format).to_lowercase(),
        None => return ImageCheck::invalid("Invalid image format".to_string()),
    };

    let (width, height) = match reader.into_dimensions() {
        Ok(dims) => dims,
        Err(e) => return ImageCheck::invalid(e.to_string()),
    };

    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return ImageCheck::invalid(format!(
            "Image too small (minimum {}x{})",
            MIN_DIMENSION, MIN_DIMENSION
        ));
    }

    ImageCheck {
        valid: true,
        format: Some(format),
        dimensions: Some(format!("{}x{}", width, height)),
        error: None,
    }
}

/// Re-encode an image as a bounded JPEG in place.
///
/// Never enlarges; a failure at any step leaves the original file and is
/// reported as a warning only.
pub fn optimize_image(path: &Path, max_width: u32, max_height: u32, quality: u8) -> bool {
    let result = (|| -> Result<u64, image::ImageError> {
        let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;

        let resized = if img.width() > max_width || img.height() > max_height {
            img.resize(max_width, max_height, FilterType::Lanczos3)
        } else {
            img
        };

        let mut out = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
        // JPEG has no alpha channel
        resized.to_rgb8().write_with_encoder(encoder)?;

        std::fs::write(path, &out)?;
        Ok(out.len() as u64)
    })();

    match result {
        Ok(size) => {
            info!(
                "Image optimized: {} ({:.2} KB)",
                path.display(),
                size as f64 / 1024.0
            );
            true
        }
        Err(e) => {
            warn!("Image optimization failed: {}", e);
            // Continue with the original file
            true
        }
    }
}
