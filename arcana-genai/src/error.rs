use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured for the generative service")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No content generated.")]
    NoContent,

    #[error("No image data found in response.")]
    NoImage,

    #[error("response was not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Reading(String),
}

impl GenerationError {
    /// Message suitable for showing to the seeker.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::MissingApiKey => {
                "The oracle's sight is sealed: no API key was provided.".to_string()
            }
            GenerationError::Reading(message) => message.clone(),
            GenerationError::InvalidInput(reason) => {
                format!("The offering was not accepted: {}", reason)
            }
            other => other.to_string(),
        }
    }
}
