use crate::error::GenerationError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub base64: String,
    pub mime_type: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl GeneratedImage {
    pub fn now(base64: String, mime_type: String) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        Self {
            base64,
            mime_type,
            timestamp,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, GenerationError> {
        STANDARD
            .decode(&self.base64)
            .map_err(|e| GenerationError::InvalidInput(format!("image payload: {}", e)))
    }

    pub fn file_extension(&self) -> &'static str {
        extension_for_mime(&self.mime_type)
    }
}

/// An image handed in for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub base64: String,
    pub mime_type: String,
}

impl SourceImage {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Rejects payloads the service would only fail on later.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let is_image = self
            .mime_type
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty());
        if !is_image {
            return Err(GenerationError::InvalidInput(format!(
                "'{}' is not an image mime type",
                self.mime_type
            )));
        }
        if self.base64.is_empty() {
            return Err(GenerationError::InvalidInput("image is empty".to_string()));
        }
        STANDARD
            .decode(&self.base64)
            .map_err(|e| GenerationError::InvalidInput(format!("image is not valid base64: {}", e)))?;
        Ok(())
    }
}

pub fn mime_for_path(path: &str) -> Option<&'static str> {
    let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/heic" => "heic",
        _ => "png",
    }
}
