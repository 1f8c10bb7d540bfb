//! Shared building blocks for a companion session: configuration,
//! sentiment scoring and mood classification.

pub mod config;
pub mod mood;
pub mod sentiment;

pub use config::{Backoff, ConfigError, SessionConfig};
pub use mood::{directive_for, MoodAssessment, MoodClassifier};
pub use sentiment::{LexiconScorer, Sentiment, SentimentError, SentimentScorer};
