//! Cover images in their transport form: a media type plus standard base64 data.

use crate::error::{LitReviewError, ValidationError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::Path;
use tokio::fs;

/// An inline cover image, ready to be attached to a request or embedded in HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    mime_type: String,
    data: String,
}

impl CoverImage {
    /// Encodes raw image bytes.
    ///
    /// # Errors
    ///
    /// `ValidationError::UnsupportedCoverImage` if `mime_type` is not an `image/*` type.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, ValidationError> {
        let mime_type = check_mime(mime_type)?;
        Ok(Self {
            mime_type,
            data: BASE64.encode(bytes),
        })
    }

    /// Wraps data that is already base64-encoded. The payload is checked by decoding it.
    pub fn from_base64(data: &str, mime_type: &str) -> Result<Self, LitReviewError> {
        let mime_type = check_mime(mime_type)?;
        let data = data.trim();
        BASE64
            .decode(data)
            .map_err(|e| LitReviewError::InvalidCoverImage(e.to_string()))?;
        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    /// Parses a `data:<mime>;base64,<data>` URI, as produced by browsers' file readers.
    pub fn from_data_uri(uri: &str) -> Result<Self, LitReviewError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| LitReviewError::InvalidCoverImage("missing `data:` prefix".into()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| LitReviewError::InvalidCoverImage("missing `,` separator".into()))?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            LitReviewError::InvalidCoverImage("only base64 data URIs are supported".into())
        })?;
        Self::from_base64(data, mime_type)
    }

    /// Reads an image file, guessing its media type from the extension.
    ///
    /// The media type is checked before the file is read.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LitReviewError> {
        let path = path.as_ref();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        check_mime(&mime_type)?;
        let bytes = fs::read(path).await?;
        Ok(Self::from_bytes(&bytes, &mime_type)?)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without any data-URI prefix.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Decodes the payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, LitReviewError> {
        BASE64
            .decode(&self.data)
            .map_err(|e| LitReviewError::InvalidCoverImage(e.to_string()))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn check_mime(mime_type: &str) -> Result<String, ValidationError> {
    let normalized = mime_type.trim().to_ascii_lowercase();
    if normalized.starts_with("image/") && normalized.len() > "image/".len() {
        Ok(normalized)
    } else {
        Err(ValidationError::UnsupportedCoverImage {
            mime_type: mime_type.to_string(),
        })
    }
}
