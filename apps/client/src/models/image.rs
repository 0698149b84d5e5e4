//! Gallery records — per-career portrait lifecycle from placeholder to
//! settled card, plus `data:` URL helpers for the inline payloads.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One gallery card. Created as a loading placeholder when generation starts
/// and settled exactly once: either `image_url` or `error` is set, never
/// both. A settled card never transitions again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerImage {
    pub id: Uuid,
    pub career: String,
    /// `data:` URL; empty until the generation resolves.
    pub image_url: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl CareerImage {
    pub fn placeholder(career: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            career: career.to_string(),
            image_url: String::new(),
            loading: true,
            error: None,
        }
    }

    /// Settles the card with a portrait URL. No-op on an already settled card.
    pub fn resolve(&mut self, image_url: String) {
        if !self.loading {
            return;
        }
        self.image_url = image_url;
        self.loading = false;
    }

    /// Settles the card with an inline error label. No-op once settled.
    pub fn fail(&mut self, message: String) {
        if !self.loading {
            return;
        }
        self.error = Some(message);
        self.loading = false;
    }

    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    pub fn has_image(&self) -> bool {
        !self.loading && self.error.is_none() && !self.image_url.is_empty()
    }

    /// Download name for this card: `reimagined-<career>.<ext>`, extension
    /// taken from the data-URL media type. None until the card has a portrait.
    pub fn download_file_name(&self) -> Option<String> {
        let decoded = decode_data_url(&self.image_url).ok()?;
        Some(format!("reimagined-{}.{}", self.career, decoded.extension()))
    }
}

/// An inline image decoded out of a `data:` URL.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// File extension derived from the media type ("image/png" -> "png").
    pub fn extension(&self) -> &str {
        self.media_type.split('/').nth(1).unwrap_or("bin")
    }

    /// Pixel dimensions. PNG only — the image generator re-encodes every
    /// portrait as a PNG data URL.
    pub fn png_dimensions(&self) -> Option<(u32, u32)> {
        png_dimensions(&self.bytes)
    }
}

/// Parses a `data:<media>;base64,<payload>` URL.
pub fn decode_data_url(url: &str) -> Result<DecodedImage, String> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URL".to_string())?;
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| "malformed data URL".to_string())?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| "data URL is not base64-encoded".to_string())?;
    let bytes = BASE64_STANDARD
        .decode(data.trim())
        .map_err(|e| format!("base64 decode failed: {e}"))?;
    Ok(DecodedImage {
        media_type: media_type.to_string(),
        bytes,
    })
}

/// Reads width and height out of a PNG IHDR header.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    if bytes.len() < 24 || bytes[..8] != SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    (width > 0 && height > 0).then_some((width, height))
}
