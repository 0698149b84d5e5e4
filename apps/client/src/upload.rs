//! Upload validation — accepted encodings and the size cap for the subject
//! photo. Rejection happens before any network call and never advances the
//! session.

#![allow(dead_code)]

use bytes::Bytes;

use crate::errors::AppError;

/// Maximum accepted photo size: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted photo encodings, detected from magic bytes (never from the file
/// name).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }

    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }
}

/// A validated subject photo. Owned exclusively by the session; cleared on
/// reset.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub bytes: Bytes,
    pub format: ImageFormat,
}

impl UploadedPhoto {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Validates raw upload bytes. The error message is shown inline near the
/// upload control.
pub fn validate_photo(bytes: Bytes) -> Result<UploadedPhoto, AppError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "Photo is too large ({:.1} MiB). The limit is 5 MiB.",
            bytes.len() as f64 / (1024.0 * 1024.0)
        )));
    }

    let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
        AppError::Validation("Unsupported photo format. Use JPEG, PNG, or WEBP.".to_string())
    })?;

    Ok(UploadedPhoto { bytes, format })
}
