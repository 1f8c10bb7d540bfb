//! Text-to-Speech (TTS) trait definition

use anyhow::Result;
use async_trait::async_trait;

/// Voice selection and speaking rate handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    pub voice: String,
    /// Words per minute
    pub rate: u32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: "zira".to_string(),
            rate: 150,
        }
    }
}

/// Speak text aloud. Failures are reported to the caller, which is expected
/// to log and continue.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;

    /// Get the voice identifier being used
    fn voice_id(&self) -> &str;

    /// Get the name of this TTS provider
    fn provider_name(&self) -> &'static str;
}

/// Strip characters most speech engines choke on (emoji and other non-ASCII).
pub fn sanitize_for_speech(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Discards everything. Used when no speech engine is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

#[async_trait]
impl SpeechOutput for SilentSpeaker {
    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn voice_id(&self) -> &str {
        ""
    }

    fn provider_name(&self) -> &'static str {
        "silent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_emoji() {
        assert_eq!(
            sanitize_for_speech("💡 I'm here for you. 💖"),
            "I'm here for you."
        );
    }

    #[test]
    fn test_sanitize_only_emoji() {
        assert!(sanitize_for_speech("🌙🌼").is_empty());
    }
}
