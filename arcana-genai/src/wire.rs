//! `generateContent` request and response bodies.

use crate::error::GenerationError;
use crate::model::GeneratedImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: None,
        }
    }

    pub fn text(prompt: &str) -> Self {
        Self::new(vec![Part::text(prompt)])
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn inline(data: &str, mime_type: &str) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: Some(mime_type.to_string()),
                data: data.to_string(),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

impl GenerationConfig {
    pub fn json(schema: Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..Default::default()
        }
    }

    pub fn aspect_ratio(ratio: &str) -> Self {
        Self {
            image_config: Some(ImageConfig {
                aspect_ratio: ratio.to_string(),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Some proxies flatten the first candidate into the top level.
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    fn parts(&self) -> Option<&[Part]> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .or(self.content.as_ref())
            .map(|content| content.parts.as_slice())
    }

    /// First inline image payload of the first candidate.
    pub fn into_image(self) -> Result<GeneratedImage, GenerationError> {
        let parts = self.parts().ok_or(GenerationError::NoContent)?;
        let inline = parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .ok_or(GenerationError::NoImage)?;

        Ok(GeneratedImage::now(
            inline.data.clone(),
            inline
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
        ))
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Result<String, GenerationError> {
        let parts = self.parts().ok_or(GenerationError::NoContent)?;
        let text: String = parts.iter().filter_map(|part| part.text.as_deref()).collect();
        if text.trim().is_empty() {
            return Err(GenerationError::NoContent);
        }
        Ok(text)
    }
}
