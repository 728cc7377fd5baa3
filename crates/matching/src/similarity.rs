//! String similarity used by the user matcher and transaction search.
//!
//! The default [`HybridScorer`] blends a word-level Jaccard index with a
//! character-level Levenshtein ratio. Names usually have two or three tokens,
//! so the word signal carries more weight; the character signal is what lets
//! `Johnston` still land near `Johnson`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::util::levenshtein_distance;

/// Anything that can rate two strings on a 0.0–1.0 scale.
///
/// Implementations must be symmetric and return 1.0 for strings that are
/// equal after [`normalize`].
pub trait Scorer {
    fn score(&self, a: &str, b: &str) -> f32;
}

const WEIGHT_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub word_weight: f32,
    pub char_weight: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            word_weight: 0.7,
            char_weight: 0.3,
        }
    }
}

impl ScoreWeights {
    pub fn new(word_weight: f32, char_weight: f32) -> Result<Self, ConfigError> {
        let weights = Self {
            word_weight,
            char_weight,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Both weights non-negative, finite, and summing to 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.word_weight.is_finite()
            && self.char_weight.is_finite()
            && self.word_weight >= 0.0
            && self.char_weight >= 0.0
            && ((self.word_weight + self.char_weight) - 1.0).abs() <= WEIGHT_EPSILON;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidWeights {
                word_weight: self.word_weight,
                char_weight: self.char_weight,
            })
        }
    }
}

/// Weighted word + character similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridScorer {
    weights: ScoreWeights,
}

impl HybridScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }
}

impl Scorer for HybridScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        let a = normalize(a);
        let b = normalize(b);

        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let word = word_similarity(&a, &b);
        let chars = char_similarity(&a, &b);
        (self.weights.word_weight * word + self.weights.char_weight * chars).clamp(0.0, 1.0)
    }
}

/// Word-overlap only. Cheaper, and blind to misspellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenScorer;

impl Scorer for TokenScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        let a = normalize(a);
        let b = normalize(b);
        if a == b {
            return 1.0;
        }
        word_similarity(&a, &b)
    }
}

/// Score with the default weights.
pub fn score(a: &str, b: &str) -> f32 {
    HybridScorer::default().score(a, b)
}

/// Lowercases and reduces to alphanumeric words joined by single spaces.
pub fn normalize(s: &str) -> String {
    tokens(s).collect::<Vec<_>>().join(" ")
}

/// Lowercase alphanumeric words of `s`, in order.
pub fn tokens(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Jaccard index of the word sets of two normalised strings.
pub fn word_similarity(a: &str, b: &str) -> f32 {
    let words_a: HashSet<&str> = a.split(' ').filter(|w| !w.is_empty()).collect();
    let words_b: HashSet<&str> = b.split(' ').filter(|w| !w.is_empty()).collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f32 / union as f32
}

/// `1 - distance / longest` over two normalised strings.
pub fn char_similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(a, b) as f32 / max_len as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "Liam Johnson",
        "liam  JOHNSON",
        "Liam Johnston",
        "From Liam J. Johnson for Deel, ref 4oJnVOMRLZftACC//403705217843//CNTR",
        "Olivia Roland Smith",
        "Μarιa Perikleous",
        "James Rodríguez",
        "Grocery store purchase",
        "x",
        "!!!",
    ];

    #[test]
    fn identical_after_normalisation_is_one() {
        for s in SAMPLES {
            assert_eq!(score(s, s), 1.0, "self-score of {s:?}");
        }
        assert_eq!(score("Liam Johnson", "  liam   JOHNSON "), 1.0);
    }

    #[test]
    fn symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(score(a, b), score(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn bounded() {
        for a in SAMPLES {
            for b in SAMPLES {
                let s = score(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} gave {s}");
            }
        }
    }

    #[test]
    fn disjoint_and_maximally_different_is_zero() {
        assert_eq!(score("abc", "xyz"), 0.0);
        assert_eq!(score("Liam", ""), 0.0);
    }

    #[test]
    fn misspelled_surname_scores_between() {
        let s = score("Liam Johnson", "Liam Johnston");
        // word = 1/3, chars = 12/13
        let expected = 0.7 * (1.0 / 3.0) + 0.3 * (12.0 / 13.0);
        assert!((s - expected).abs() < 1e-5, "score was {s}");
        assert!(s < 0.8);
    }

    #[test]
    fn reordered_names_share_all_words() {
        let s = score("Griffin Christian", "Christian Griffin");
        assert!(s > 0.7, "score was {s}");
        assert!(s < 1.0);
    }

    #[test]
    fn weights_shift_the_blend() {
        let words_only = HybridScorer::new(ScoreWeights::new(1.0, 0.0).unwrap());
        let chars_only = HybridScorer::new(ScoreWeights::new(0.0, 1.0).unwrap());
        let w = words_only.score("Liam Johnson", "Liam Johnston");
        let c = chars_only.score("Liam Johnson", "Liam Johnston");
        assert!((w - 1.0 / 3.0).abs() < 1e-6);
        assert!((c - 12.0 / 13.0).abs() < 1e-6);
    }

    #[test]
    fn weights_must_sum_to_one() {
        assert!(ScoreWeights::new(0.5, 0.4).is_err());
        assert!(ScoreWeights::new(1.2, -0.2).is_err());
        assert!(ScoreWeights::new(f32::NAN, 0.5).is_err());
        assert!(ScoreWeights::new(0.6, 0.4).is_ok());
    }

    #[test]
    fn token_scorer_ignores_spelling() {
        assert_eq!(TokenScorer.score("Liam Johnson", "liam johnson"), 1.0);
        assert_eq!(TokenScorer.score("Johnson", "Johnston"), 0.0);
        assert!((TokenScorer.score("From Liam Johnson", "Liam Johnson") - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  From James. Rodríguez, for Deel "), "from james rodríguez for deel");
        assert_eq!(normalize("!!!"), "");
    }
}
