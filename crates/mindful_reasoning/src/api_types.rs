use serde::{Deserialize, Serialize};

// Request payload for a non-streaming generate call
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
}

// Response payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl GenerateResponse {
    /// The trimmed reply text, if the model produced any.
    pub fn reply(&self) -> Option<&str> {
        self.response
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
