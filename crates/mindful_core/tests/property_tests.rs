//! Property-based tests for mindful_core.
//!
//! Verifies that scoring stays within range for arbitrary text and that the
//! mood directive depends only on (polarity, subjectivity).

use mindful_core::mood::{NEUTRAL_DIRECTIVE, POSITIVE_DIRECTIVE, STRUGGLING_DIRECTIVE};
use mindful_core::{directive_for, LexiconScorer, SentimentScorer};
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_always_in_range(text in ".{0,200}") {
        let s = LexiconScorer::builtin().score(&text);
        prop_assert!((-1.0..=1.0).contains(&s.polarity));
        prop_assert!((0.0..=1.0).contains(&s.subjectivity));
    }

    #[test]
    fn score_of_word_soup_in_range(
        words in prop::collection::vec(
            prop::sample::select(vec![
                "very", "not", "happy", "sad", "hopeless", "so", "never", "great", "today",
            ]),
            0..30,
        )
    ) {
        let s = LexiconScorer::builtin().score(&words.join(" "));
        prop_assert!((-1.0..=1.0).contains(&s.polarity));
        prop_assert!((0.0..=1.0).contains(&s.subjectivity));
    }

    #[test]
    fn directive_is_pure(p in -1.0f32..=1.0, s in 0.0f32..=1.0) {
        prop_assert_eq!(directive_for(p, s), directive_for(p, s));
    }

    #[test]
    fn directive_follows_thresholds(p in -1.0f32..=1.0, s in 0.0f32..=1.0) {
        let d = directive_for(p, s);
        if p > 0.3 {
            prop_assert_eq!(d, POSITIVE_DIRECTIVE);
        } else if p < -0.3 {
            prop_assert!(d.starts_with(STRUGGLING_DIRECTIVE));
            prop_assert_eq!(d.contains("breath"), s > 0.6);
        } else {
            prop_assert_eq!(d, NEUTRAL_DIRECTIVE);
        }
    }
}
