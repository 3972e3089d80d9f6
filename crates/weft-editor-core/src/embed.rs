//! Image pipeline logic: target dimensions, data URIs and a software encoder.
//!
//! The browser re-encodes through a canvas. [`reencode`] does the same job
//! with the `image` crate for hosts without a usable 2D context, and doubles
//! as the reference for the dimension rules in native tests.

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};
use smol_str::SmolStr;

use crate::error::EditorError;

pub const DEFAULT_IMAGE_QUALITY: u8 = 80;

/// Title shown on embedded images once the resize handler is attached.
pub const RESIZE_HINT: &str = "Double click to resize";

/// Encoder quality as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImageQuality(u8);

impl ImageQuality {
    pub fn new(percent: u32) -> Result<Self, EditorError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(EditorError::QualityOutOfRange(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Quality in `0.0..=1.0`, as canvas encoders expect it.
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for ImageQuality {
    fn default() -> Self {
        Self(DEFAULT_IMAGE_QUALITY)
    }
}

/// Output size for a `width`×`height` bitmap bounded by `max_width`.
///
/// Images are never upscaled. Height keeps the aspect ratio, rounded to the
/// nearest pixel and at least 1.
pub fn constrain_dimensions(width: u32, height: u32, max_width: Option<u32>) -> (u32, u32) {
    match max_width {
        Some(max) if max > 0 && width > max => {
            let scaled = (u64::from(height) * u64::from(max) * 2 + u64::from(width))
                / (u64::from(width) * 2);
            (max, u32::try_from(scaled).unwrap_or(u32::MAX).max(1))
        }
        _ => (width, height),
    }
}

/// A base64 `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: SmolStr,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn new(mime: impl Into<SmolStr>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Parse `data:<mime>;base64,<payload>`. Other encodings are rejected.
    pub fn parse(uri: &str) -> Result<Self, EditorError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| EditorError::InvalidDataUri("missing `data:` scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| EditorError::InvalidDataUri("missing payload separator".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| EditorError::InvalidDataUri("payload is not base64".into()))?;
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| EditorError::InvalidDataUri(e.to_string()))?;
        Ok(Self::new(mime, data))
    }

    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}

/// A re-encoded image ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEmbed {
    pub data_uri: String,
    pub mime_type: SmolStr,
    pub width: u32,
    pub height: u32,
}

impl ImageEmbed {
    /// Markup inserted into the editor. Display width is capped at 100%.
    pub fn to_html(&self) -> String {
        format!(
            r#"<img src="{}" style="max-width: 100%;">"#,
            self.data_uri.replace('"', "&quot;")
        )
    }
}

/// Decode `source`, shrink it to `max_width` and re-encode as `mime`.
///
/// JPEG honors `quality`; PNG is lossless. Other image types are written as
/// PNG. Non-image MIME types are rejected.
pub fn reencode(
    source: &DataUri,
    max_width: Option<u32>,
    mime: &str,
    quality: ImageQuality,
) -> Result<ImageEmbed, EditorError> {
    let format = match mime {
        "image/jpeg" | "image/jpg" => ImageFormat::Jpeg,
        "image/png" => ImageFormat::Png,
        m if m.starts_with("image/") => {
            tracing::debug!(target: "weft::image", mime = m, "no software encoder, writing png");
            ImageFormat::Png
        }
        m => return Err(EditorError::UnsupportedMime(m.to_string())),
    };

    let img =
        image::load_from_memory(&source.data).map_err(|e| EditorError::Decode(e.to_string()))?;
    let (src_w, src_h) = img.dimensions();
    let (width, height) = constrain_dimensions(src_w, src_h, max_width);
    tracing::debug!(target: "weft::image", src_w, src_h, width, height, "software re-encode");

    let img = if (width, height) == (src_w, src_h) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    let mut bytes = Vec::new();
    let out_mime = match format {
        ImageFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.percent().max(1));
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| EditorError::Encode(e.to_string()))?;
            "image/jpeg"
        }
        _ => {
            img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|e| EditorError::Encode(e.to_string()))?;
            "image/png"
        }
    };

    Ok(ImageEmbed {
        data_uri: DataUri::new(out_mime, bytes).encode(),
        mime_type: SmolStr::new_static(out_mime),
        width,
        height,
    })
}

/// Current display width as a rounded percentage of the full layout width.
pub fn display_percentage(current: f64, full: f64) -> Option<u32> {
    if full.is_nan() || full <= 0.0 || !current.is_finite() {
        return None;
    }
    let percent = (current / full * 100.0).round();
    (percent >= 0.0).then_some(percent as u32)
}

/// Parse a resize prompt answer such as `50` or `50 %`.
///
/// Empty, non-numeric and non-positive answers mean "no change".
pub fn parse_percentage(input: &str) -> Option<f64> {
    let value: f64 = input.replace('%', "").trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}
