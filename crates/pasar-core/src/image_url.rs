//! Image URL resolution and fallback helpers.
//!
//! Consumers render image references stored by the upload pipeline: relative
//! paths, absolute URLs, or inline data URLs. Resolution never fails; an
//! absent or broken reference degrades to a generated SVG placeholder
//! instead of a broken-image indicator. All functions here are pure and
//! synchronous.

use url::Url;

use crate::constants::CLIENT_PRECHECK_MAX_BYTES;

const PLACEHOLDER_TEXT: &str = "No Image";
const PLACEHOLDER_WIDTH: u32 = 400;
const PLACEHOLDER_HEIGHT: u32 = 300;
const PLACEHOLDER_BG_COLOR: &str = "#e5e7eb";
const PLACEHOLDER_TEXT_COLOR: &str = "#9ca3af";
const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml";

/// Resolve a possibly-absent image reference into a renderable URL.
///
/// Resolution order: absent/blank references fall back to `fallback` (or a
/// generated placeholder); inline data images and absolute URLs pass through
/// unchanged; anything else is treated as a path relative to `base_url`.
pub fn resolve_image_url(
    reference: Option<&str>,
    base_url: &str,
    fallback: Option<&str>,
) -> String {
    let trimmed = reference.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return fallback
            .map(str::to_string)
            .unwrap_or_else(|| placeholder(PLACEHOLDER_TEXT));
    }

    if trimmed.starts_with("data:image") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    // Relative path: strip one leading slash to avoid a double slash.
    let clean_path = trimmed.strip_prefix('/').unwrap_or(trimmed);
    format!("{}/{}", base_url.trim_end_matches('/'), clean_path)
}

/// Generate an inline SVG placeholder encoded as a data URL.
///
/// The font size follows the smaller dimension (min(w, h) / 10) so the label
/// stays proportional at any size.
pub fn placeholder_data_url(
    text: &str,
    width: u32,
    height: u32,
    bg_color: &str,
    text_color: &str,
) -> String {
    let font_size = width.min(height) / 10;

    let svg = format!(
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg"><rect width="100%" height="100%" fill="{bg_color}"/><text x="50%" y="50%" font-family="Arial, sans-serif" font-size="{font_size}" fill="{text_color}" text-anchor="middle" dominant-baseline="middle">{text}</text></svg>"#
    );

    format!("{},{}", SVG_DATA_URL_PREFIX, urlencoding::encode(&svg))
}

/// Placeholder with the default 400x300 gray styling.
pub fn placeholder(text: &str) -> String {
    placeholder_data_url(
        text,
        PLACEHOLDER_WIDTH,
        PLACEHOLDER_HEIGHT,
        PLACEHOLDER_BG_COLOR,
        PLACEHOLDER_TEXT_COLOR,
    )
}

/// A render target for an image: the resolved source plus accessible alt
/// text. Mirrors what the rendering layer binds into an `<img>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub src: String,
    pub alt: String,
}

impl ImageSource {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Swap in a placeholder after a load failure.
    ///
    /// No-op when the source is already a generated placeholder, so a
    /// placeholder that itself fails to load cannot loop forever.
    pub fn apply_load_fallback(&mut self, fallback_text: &str) {
        if self.src.starts_with(SVG_DATA_URL_PREFIX) {
            return;
        }

        tracing::warn!(src = %self.src, "Image failed to load, substituting placeholder");

        self.src = placeholder(fallback_text);
        self.alt = fallback_text.to_string();
    }
}

/// Whether a reference is usable as an image source. Data URLs, parseable
/// absolute URLs, and relative paths are valid; a malformed absolute URL is
/// not. Validity does not guarantee the reference resolves to a real file.
pub fn is_valid_image_url(reference: Option<&str>) -> bool {
    let trimmed = match reference.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return false,
    };

    if trimmed.starts_with("data:image") {
        return true;
    }

    match Url::parse(trimmed) {
        Ok(_) => true,
        // Relative paths cannot parse on their own but are still renderable
        // once joined with a base URL.
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Format a byte count for display: 1024-based, Bytes/KB/MB/GB, rounded to
/// two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}

/// Client-side convenience pre-check before an upload is attempted. This is
/// not the authoritative gate; the server-side validator is.
pub fn validate_image_file(
    content_type: &str,
    size_bytes: u64,
    max_size_bytes: Option<u64>,
) -> Result<(), String> {
    if !content_type.starts_with("image/") {
        return Err("File harus berupa gambar".to_string());
    }

    let max = max_size_bytes.unwrap_or(CLIENT_PRECHECK_MAX_BYTES);
    if size_bytes > max {
        return Err(format!("Ukuran file maksimal {}", format_file_size(max)));
    }

    Ok(())
}
