//! Lexicon-based English sentiment scoring.
//!
//! Every known word carries a `(polarity, subjectivity)` pair. Intensifiers
//! scale the next scored word, negators flip and damp it. The text score is
//! the mean over scored words.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Polarity in `[-1.0, 1.0]`, subjectivity in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sentiment {
    pub polarity: f32,
    pub subjectivity: f32,
}

pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Sentiment;
}

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("failed to read lexicon {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse lexicon: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("lexicon contains no words")]
    Empty,
    #[error("lexicon entry `{0}` is outside the valid range")]
    OutOfRange(String),
}

/// (word, polarity, subjectivity)
const BUILTIN: &[(&str, f32, f32)] = &[
    // positive
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("wonderful", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("excited", 0.4, 0.75),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("grateful", 0.6, 0.8),
    ("thankful", 0.5, 0.7),
    ("calm", 0.3, 0.75),
    ("relaxed", 0.4, 0.6),
    ("peaceful", 0.5, 0.7),
    ("hopeful", 0.5, 0.6),
    ("better", 0.5, 0.5),
    ("best", 1.0, 0.3),
    ("fine", 0.4, 0.5),
    ("okay", 0.5, 0.5),
    ("proud", 0.8, 1.0),
    ("confident", 0.5, 0.7),
    ("joy", 0.8, 0.9),
    ("fun", 0.3, 0.2),
    ("nice", 0.6, 1.0),
    ("beautiful", 0.85, 1.0),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("cheerful", 0.7, 0.8),
    ("content", 0.3, 0.6),
    ("motivated", 0.4, 0.6),
    ("safe", 0.5, 0.5),
    // negative
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("hopeless", -0.6, 0.7),
    ("worthless", -0.8, 0.8),
    ("helpless", -0.5, 0.8),
    ("lonely", -0.5, 1.0),
    ("alone", -0.3, 0.6),
    ("depressed", -0.7, 0.9),
    ("anxious", -0.5, 0.9),
    ("worried", -0.5, 0.8),
    ("scared", -0.5, 0.9),
    ("afraid", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("upset", -0.5, 0.8),
    ("stressed", -0.5, 0.8),
    ("overwhelmed", -0.6, 0.8),
    ("exhausted", -0.4, 0.7),
    ("tired", -0.4, 0.7),
    ("miserable", -1.0, 1.0),
    ("hurt", -0.5, 0.7),
    ("broken", -0.4, 0.5),
    ("empty", -0.1, 0.5),
    ("lost", -0.3, 0.5),
    ("hate", -0.8, 0.9),
    ("cry", -0.4, 0.7),
    ("crying", -0.5, 0.8),
    ("pain", -0.5, 0.6),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("stuck", -0.3, 0.5),
    ("frustrated", -0.6, 0.8),
    ("ashamed", -0.6, 0.9),
    ("guilty", -0.5, 0.7),
    ("panic", -0.6, 0.8),
    ("nervous", -0.3, 0.8),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.5),
];

/// Multipliers applied to the next scored word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.2),
    ("quite", 1.1),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("totally", 1.3),
    ("super", 1.3),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "nobody", "hardly", "cannot"];

const NEGATION_FACTOR: f32 = -0.5;

#[derive(Debug, Deserialize)]
struct LexiconFile {
    words: HashMap<String, (f32, f32)>,
}

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, (f32, f32)>,
}

impl LexiconScorer {
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN
                .iter()
                .map(|(w, p, s)| (w.to_string(), (*p, *s)))
                .collect(),
        }
    }

    /// Build a scorer from explicit entries, rejecting empty or out-of-range lexicons.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, (f32, f32))>,
    ) -> Result<Self, SentimentError> {
        let mut words = HashMap::new();
        for (word, (polarity, subjectivity)) in entries {
            if !(-1.0..=1.0).contains(&polarity) || !(0.0..=1.0).contains(&subjectivity) {
                return Err(SentimentError::OutOfRange(word));
            }
            words.insert(word.to_lowercase(), (polarity, subjectivity));
        }
        if words.is_empty() {
            return Err(SentimentError::Empty);
        }
        Ok(Self { words })
    }

    /// Load a lexicon from a TOML file with a `[words]` table of
    /// `word = [polarity, subjectivity]` entries.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SentimentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SentimentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: LexiconFile = toml::from_str(&content)?;
        let scorer = Self::from_entries(file.words)?;
        tracing::info!(
            "Loaded sentiment lexicon with {} words from {}",
            scorer.len(),
            path.display()
        );
        Ok(scorer)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

fn intensity(token: &str) -> Option<f32> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == token)
        .map(|(_, m)| *m)
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let mut scored: Vec<(f32, f32)> = Vec::new();

        // Modifiers never reach across clause boundaries
        for clause in lower.split(['.', '!', '?', ';', ',']) {
            let mut multiplier = 1.0f32;
            let mut negated = false;

            let tokens = clause
                .split(|c: char| !(c.is_alphanumeric() || c == '\''))
                .filter(|t| !t.is_empty());

            for token in tokens {
                if let Some(&(polarity, subjectivity)) = self.words.get(token) {
                    let mut p = polarity * multiplier;
                    if negated {
                        p *= NEGATION_FACTOR;
                    }
                    let s = subjectivity * multiplier;
                    scored.push((p.clamp(-1.0, 1.0), s.clamp(0.0, 1.0)));
                    multiplier = 1.0;
                    negated = false;
                } else if let Some(m) = intensity(token) {
                    multiplier *= m;
                } else if is_negator(token) {
                    negated = !negated;
                }
            }
        }

        if scored.is_empty() {
            return Sentiment::default();
        }

        let n = scored.len() as f32;
        let polarity = scored.iter().map(|(p, _)| p).sum::<f32>() / n;
        let subjectivity = scored.iter().map(|(_, s)| s).sum::<f32>() / n;

        Sentiment {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> Sentiment {
        LexiconScorer::builtin().score(text)
    }

    #[test]
    fn test_neutral_text() {
        let s = score("I went to the shop this morning");
        assert_eq!(s, Sentiment::default());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(score(""), Sentiment::default());
        assert_eq!(score("   "), Sentiment::default());
    }

    #[test]
    fn test_single_word_score() {
        let s = score("I feel hopeless today");
        assert!((s.polarity + 0.6).abs() < 1e-6);
        assert!((s.subjectivity - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_positive_text() {
        assert!(score("I had a great day, thanks!").polarity > 0.3);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let plain = score("I am happy");
        let strong = score("I am very happy");
        assert!(strong.polarity > plain.polarity);
        assert!(strong.polarity <= 1.0);
    }

    #[test]
    fn test_negation_flips_and_damps() {
        let s = score("I am not happy");
        assert!((s.polarity + 0.4).abs() < 1e-6);

        let s = score("I don't feel good");
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn test_negation_stops_at_clause_boundary() {
        let s = score("not today, I am happy");
        assert!((s.polarity - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_mixed_text_averages() {
        let s = score("happy but sad");
        assert!((s.polarity - 0.15).abs() < 1e-6);
        assert!((s.subjectivity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom_entries_validation() {
        assert!(matches!(
            LexiconScorer::from_entries(Vec::new()),
            Err(SentimentError::Empty)
        ));
        assert!(matches!(
            LexiconScorer::from_entries(vec![("odd".to_string(), (2.0, 0.5))]),
            Err(SentimentError::OutOfRange(_))
        ));

        let scorer =
            LexiconScorer::from_entries(vec![("Sunny".to_string(), (0.9, 0.4))]).unwrap();
        let s = scorer.score("sunny skies");
        assert!((s.polarity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_load_lexicon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "[words]\nblue = [-0.4, 0.6]\nbright = [0.6, 0.5]\n").unwrap();

        let scorer = LexiconScorer::load(&path).unwrap();
        assert_eq!(scorer.len(), 2);
        assert!(scorer.score("feeling blue").polarity < 0.0);

        assert!(matches!(
            LexiconScorer::load(dir.path().join("missing.toml")),
            Err(SentimentError::Read { .. })
        ));
    }
}
