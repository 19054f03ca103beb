use crate::config::GenAiConfig;
use crate::error::GenerationError;
use crate::model::{GeneratedImage, SourceImage};
use crate::wire::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client over the `generateContent` endpoint.
#[derive(Clone)]
pub struct GenerativeClient {
    http: reqwest::Client,
    config: GenAiConfig,
}

impl GenerativeClient {
    pub fn new(config: GenAiConfig) -> Result<Self, GenerationError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, GenerationError> {
        Self::new(GenAiConfig::from_env()?)
    }

    pub fn config(&self) -> &GenAiConfig {
        &self.config
    }

    pub(crate) async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        debug!("generateContent on {}", model);
        let response = self
            .http
            .post(self.config.endpoint(model))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned {}", model, status);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    pub(crate) async fn image_request(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        let image = self
            .generate_content(&self.config.image_model, &request)
            .await?
            .into_image()?;
        info!("Image received ({}, {} bytes b64)", image.mime_type, image.base64.len());
        Ok(image)
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        self.image_request(GenerateContentRequest::text(prompt)).await
    }

    /// Sends the image and the instruction together; the image must be
    /// valid base64 with an `image/*` mime type.
    pub async fn edit_image(
        &self,
        base64: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<GeneratedImage, GenerationError> {
        let image = SourceImage {
            base64: base64.to_string(),
            mime_type: mime_type.to_string(),
        };
        image.validate()?;
        self.image_request(GenerateContentRequest::new(vec![
            Part::inline(&image.base64, &image.mime_type),
            Part::text(prompt),
        ]))
        .await
    }

    /// Asks the text model for JSON matching `schema`. Only parsing is
    /// checked; see `generate_structured` for shape checks.
    pub async fn generate_structured_text(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<Value, GenerationError> {
        let text = self.structured_response(prompt, schema).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<T, GenerationError> {
        let text = self.structured_response(prompt, schema).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn structured_response(&self, prompt: &str, schema: Value) -> Result<String, GenerationError> {
        let request =
            GenerateContentRequest::text(prompt).with_config(GenerationConfig::json(schema));
        self.generate_content(&self.config.text_model, &request)
            .await?
            .text()
    }
}
