//! Mood classification: sentiment score → tone directive for the reply.

use crate::sentiment::{SentimentScorer, Sentiment};
use std::sync::Arc;

pub const POSITIVE_DIRECTIVE: &str = "positive, respond with warmth and encouragement";
pub const STRUGGLING_DIRECTIVE: &str = "user may be struggling, respond with empathy";
pub const NEUTRAL_DIRECTIVE: &str = "neutral, respond with gentle curiosity";
pub const BREATHING_ADDENDUM: &str =
    "gently suggest a grounding breath: inhale deeply, hold, and exhale slowly";

const POSITIVE_THRESHOLD: f32 = 0.3;
const NEGATIVE_THRESHOLD: f32 = -0.3;
const PERSONAL_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct MoodAssessment {
    pub polarity: f32,
    pub subjectivity: f32,
    pub directive: String,
}

/// Map a polarity/subjectivity pair to its directive.
pub fn directive_for(polarity: f32, subjectivity: f32) -> String {
    if polarity > POSITIVE_THRESHOLD {
        POSITIVE_DIRECTIVE.to_string()
    } else if polarity < NEGATIVE_THRESHOLD {
        if subjectivity > PERSONAL_THRESHOLD {
            format!("{}; {}", STRUGGLING_DIRECTIVE, BREATHING_ADDENDUM)
        } else {
            STRUGGLING_DIRECTIVE.to_string()
        }
    } else {
        NEUTRAL_DIRECTIVE.to_string()
    }
}

#[derive(Clone)]
pub struct MoodClassifier {
    scorer: Arc<dyn SentimentScorer>,
}

impl MoodClassifier {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn assess(&self, text: &str) -> MoodAssessment {
        let Sentiment {
            polarity,
            subjectivity,
        } = self.scorer.score(text);
        MoodAssessment {
            polarity,
            subjectivity,
            directive: directive_for(polarity, subjectivity),
        }
    }
}

impl std::fmt::Debug for MoodClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodClassifier").finish_non_exhaustive()
    }
}
