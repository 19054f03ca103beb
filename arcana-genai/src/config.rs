use crate::error::GenerationError;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-pro-preview";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

#[derive(Clone)]
pub struct GenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_model: String,
    pub text_model: String,
    /// Per-request timeout. Image calls routinely take tens of seconds.
    pub timeout: Duration,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GenAiConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = [API_KEY_ENV, FALLBACK_API_KEY_ENV]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .ok_or(GenerationError::MissingApiKey)?;

        let mut config = Self::with_api_key(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub(crate) fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

impl fmt::Debug for GenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenAiConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("text_model", &self.text_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
