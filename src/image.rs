// src/image.rs
// In-memory image payloads for the reference, cover and analyzer uploads

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{PromptError, Result};

/// An accepted image: raw bytes plus their MIME type.
///
/// Construction is the only validation point; a value of this type is always
/// a non-empty `image/*` payload. Serialized as a data URL.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePayload {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Result<Self> {
        let mime_type = mime_type.into().trim().to_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(PromptError::UnsupportedInput(format!(
                "only image files can be uploaded (got {})",
                if mime_type.is_empty() { "unknown type" } else { mime_type.as_str() }
            )));
        }
        if bytes.is_empty() {
            return Err(PromptError::UnsupportedInput("image file is empty".into()));
        }
        Ok(Self { mime_type, bytes })
    }

    /// Read an image from disk, using the extension to determine the type.
    /// Non-image paths are rejected before the file is read.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime = mime_guess::from_path(path)
            .first()
            .filter(|m| m.type_() == mime_guess::mime::IMAGE)
            .ok_or_else(|| {
                PromptError::UnsupportedInput(format!(
                    "only image files can be uploaded ({})",
                    path.display()
                ))
            })?;

        let bytes = tokio::fs::read(path).await?;
        debug!(path = %path.display(), mime = %mime, size = bytes.len(), "Loaded image");
        Self::new(bytes, mime.essence_str())
    }

    /// Decode a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| PromptError::UnsupportedInput("expected a data: URL".into()))?;
        let (meta, data) = rest
            .split_once(',')
            .ok_or_else(|| PromptError::UnsupportedInput("malformed data URL".into()))?;
        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| PromptError::UnsupportedInput("data URL must be base64".into()))?;
        let bytes = BASE64
            .decode(data)
            .map_err(|e| PromptError::UnsupportedInput(format!("invalid base64 image data: {}", e)))?;
        Self::new(bytes, mime)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Base64 body without the data URL header (Gemini inlineData)
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

// Keep multi-megabyte payloads out of debug logs
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl TryFrom<String> for ImagePayload {
    type Error = PromptError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_data_url(&value)
    }
}

impl From<ImagePayload> for String {
    fn from(image: ImagePayload) -> Self {
        image.to_data_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_accepts_image_mime() {
        let image = ImagePayload::new(PNG_MAGIC.to_vec(), "image/png").unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.len(), 8);
    }

    #[test]
    fn test_rejects_non_image_mime() {
        let err = ImagePayload::new(b"hello".to_vec(), "text/plain").unwrap_err();
        assert!(matches!(err, PromptError::UnsupportedInput(_)));
    }

    #[test]
    fn test_rejects_empty_bytes() {
        let err = ImagePayload::new(Vec::new(), "image/jpeg").unwrap_err();
        assert!(matches!(err, PromptError::UnsupportedInput(_)));
    }

    #[test]
    fn test_data_url_round_trip() {
        let image = ImagePayload::new(PNG_MAGIC.to_vec(), "image/png").unwrap();
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(ImagePayload::from_data_url(&url).unwrap(), image);
    }

    #[test]
    fn test_data_url_rejects_non_image() {
        let url = format!("data:application/pdf;base64,{}", BASE64.encode(b"%PDF"));
        assert!(matches!(
            ImagePayload::from_data_url(&url),
            Err(PromptError::UnsupportedInput(_))
        ));
        assert!(ImagePayload::from_data_url("https://example.com/a.png").is_err());
        assert!(ImagePayload::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_serde_as_data_url() {
        let image = ImagePayload::new(vec![1, 2, 3], "image/gif").unwrap();
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, "\"data:image/gif;base64,AQID\"");
        let back: ImagePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, image);
        assert!(serde_json::from_str::<ImagePayload>("\"data:text/plain;base64,AQID\"").is_err());
    }

    #[test]
    fn test_debug_omits_bytes() {
        let image = ImagePayload::new(vec![7; 1024], "image/png").unwrap();
        let debug = format!("{:?}", image);
        assert!(debug.contains("len: 1024"));
        assert!(!debug.contains("7, 7"));
    }

    #[tokio::test]
    async fn test_load_rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();
        let err = ImagePayload::load(&path).await.unwrap_err();
        assert!(matches!(err, PromptError::UnsupportedInput(_)));
    }

    #[tokio::test]
    async fn test_load_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();
        let image = ImagePayload::load(&path).await.unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.bytes(), PNG_MAGIC);
    }
}
