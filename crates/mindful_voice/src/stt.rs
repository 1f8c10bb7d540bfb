//! Speech-to-Text (STT) trait definition

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("listening timed out after {0:.1?}")]
    Timeout(Duration),
    #[error("speech was not recognized")]
    NotRecognized,
    #[error("voice input unavailable: {0}")]
    Unavailable(String),
    #[error("speech engine failed: {0}")]
    Engine(String),
}

/// Bounds for a single capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenOptions {
    /// How long to wait for speech to start
    pub timeout: Duration,
    /// Maximum length of a single phrase
    pub phrase_time_limit: Duration,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            phrase_time_limit: Duration::from_secs(10),
        }
    }
}

impl ListenOptions {
    /// Upper bound on a whole capture: waiting plus speaking.
    pub fn total(&self) -> Duration {
        self.timeout + self.phrase_time_limit
    }
}

/// Capture one utterance and return it as text.
#[async_trait]
pub trait SpeechInput: Send + Sync {
    async fn listen(&self, options: ListenOptions) -> Result<String, VoiceError>;

    /// Get the name of this STT provider
    fn provider_name(&self) -> &'static str;
}

/// Used when no speech-to-text engine is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeechInput;

#[async_trait]
impl SpeechInput for NoSpeechInput {
    async fn listen(&self, _options: ListenOptions) -> Result<String, VoiceError> {
        Err(VoiceError::Unavailable(
            "no speech-to-text engine configured".to_string(),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_speech_input_is_unavailable() {
        let err = NoSpeechInput.listen(ListenOptions::default()).await.unwrap_err();
        assert!(matches!(err, VoiceError::Unavailable(_)));
    }

    #[test]
    fn test_total_bound() {
        let opts = ListenOptions::default();
        assert_eq!(opts.total(), Duration::from_secs(15));
    }
}
