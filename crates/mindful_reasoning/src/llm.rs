use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Sampling parameters sent with every completion.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self { temperature: 0.7 }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("request timed out after {0:.1?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("Empty response from model")]
    EmptyReply,
    #[error("all {attempts} attempts failed, last error: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<CompletionError>,
    },
}

impl CompletionError {
    /// The underlying failure, looking through retry exhaustion.
    pub fn root(&self) -> &CompletionError {
        match self {
            CompletionError::Exhausted { last, .. } => last.root(),
            other => other,
        }
    }
}

/// A remote text-generation endpoint.
///
/// Implementations own their retry policy: a returned error is terminal for
/// this prompt. The client never touches conversation history.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_unwraps_exhaustion() {
        let err = CompletionError::Exhausted {
            attempts: 3,
            last: Box::new(CompletionError::Timeout(Duration::from_secs(30))),
        };
        assert!(matches!(err.root(), CompletionError::Timeout(_)));
        let msg = err.to_string();
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("timed out"));
    }
}
