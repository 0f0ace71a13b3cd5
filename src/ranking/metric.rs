use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::ranking::text::preprocess;

/// Similarity metric used to score a query against a document
///
/// Every metric returns a score in [0.0, 1.0] and is 0.0 whenever either
/// side has no tokens after preprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// |A ∩ B| / |A ∪ B| over token sets
    Jaccard,
    /// Cosine of the angle between token frequency vectors
    #[default]
    Cosine,
    /// Σ over shared tokens of the product of normalized frequencies
    WordFrequency,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Jaccard, Metric::Cosine, Metric::WordFrequency];

    /// Resolve a metric identifier, falling back to cosine when unknown
    pub fn from_name(name: &str) -> Self {
        match Self::lookup(name) {
            Some(metric) => metric,
            None => {
                tracing::warn!("⚠️ Unknown metric '{}', falling back to cosine", name);
                Metric::Cosine
            }
        }
    }

    /// Resolve a metric identifier without fallback
    pub fn lookup(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "jaccard" => Some(Metric::Jaccard),
            "cosine" => Some(Metric::Cosine),
            "word_frequency" | "word-frequency" | "wordfreq" => Some(Metric::WordFrequency),
            _ => None,
        }
    }

    /// Canonical identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Jaccard => "jaccard",
            Metric::Cosine => "cosine",
            Metric::WordFrequency => "word_frequency",
        }
    }

    /// Score two raw texts
    pub fn score(&self, text_a: &str, text_b: &str) -> f64 {
        self.score_tokens(&preprocess(text_a), &preprocess(text_b))
    }

    /// Score two already preprocessed token sequences
    pub fn score_tokens(&self, tokens_a: &[String], tokens_b: &[String]) -> f64 {
        match self {
            Metric::Jaccard => jaccard_index(tokens_a, tokens_b),
            Metric::Cosine => cosine_index(tokens_a, tokens_b),
            Metric::WordFrequency => word_frequency_index(tokens_a, tokens_b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Text-level entry points
// ═══════════════════════════════════════════════════════════════════════════

pub fn jaccard_similarity(text_a: &str, text_b: &str) -> f64 {
    Metric::Jaccard.score(text_a, text_b)
}

pub fn cosine_similarity(text_a: &str, text_b: &str) -> f64 {
    Metric::Cosine.score(text_a, text_b)
}

pub fn word_frequency_similarity(text_a: &str, text_b: &str) -> f64 {
    Metric::WordFrequency.score(text_a, text_b)
}

// ═══════════════════════════════════════════════════════════════════════════
// Token-level formulas
// ═══════════════════════════════════════════════════════════════════════════

#[inline]
fn frequencies(tokens: &[String]) -> HashMap<&str, u64> {
    let mut freq = HashMap::with_capacity(tokens.len());
    for token in tokens {
        *freq.entry(token.as_str()).or_insert(0) += 1;
    }
    freq
}

/// Σ freq_a[t] · freq_b[t] over tokens present on both sides
#[inline]
fn shared_product(freq_a: &HashMap<&str, u64>, freq_b: &HashMap<&str, u64>) -> u64 {
    freq_a
        .iter()
        .filter_map(|(token, count_a)| freq_b.get(token).map(|count_b| count_a * count_b))
        .sum()
}

#[inline]
fn jaccard_index(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    let set_a: HashSet<&str> = tokens_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = tokens_b.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

// Dot product and squared norms are exact integers, so the score does not
// depend on map iteration order and cosine(A, A) is exactly 1.0.
#[inline]
fn cosine_index(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    let freq_a = frequencies(tokens_a);
    let freq_b = frequencies(tokens_b);

    let norm_a: u64 = freq_a.values().map(|c| c * c).sum();
    let norm_b: u64 = freq_b.values().map(|c| c * c).sum();

    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }

    let dot = shared_product(&freq_a, &freq_b);
    let score = dot as f64 / (norm_a as f64 * norm_b as f64).sqrt();
    score.min(1.0)
}

// Σ (c_a / t_a) · (c_b / t_b) == (Σ c_a · c_b) / (t_a · t_b)
#[inline]
fn word_frequency_index(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let freq_a = frequencies(tokens_a);
    let freq_b = frequencies(tokens_b);

    let shared = shared_product(&freq_a, &freq_b);
    if shared == 0 {
        return 0.0;
    }

    shared as f64 / (tokens_a.len() as f64 * tokens_b.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "the of and",
        "Quantum computing under noise",
        "quantum quantum computing hardware survey",
        "Multi-modal change detection of flooded areas using SAR images",
        "Slow cooking beef with red wine",
        "noise, noise, NOISE!",
    ];

    #[test]
    fn test_symmetry() {
        for metric in Metric::ALL {
            for a in SAMPLES {
                for b in SAMPLES {
                    assert_eq!(
                        metric.score(a, b),
                        metric.score(b, a),
                        "{} not symmetric for {:?} / {:?}",
                        metric,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_scores_in_unit_range() {
        for metric in Metric::ALL {
            for a in SAMPLES {
                for b in SAMPLES {
                    let score = metric.score(a, b);
                    assert!((0.0..=1.0).contains(&score), "{} out of range: {}", metric, score);
                }
            }
        }
    }

    #[test]
    fn test_identity_reaches_one() {
        for text in SAMPLES.iter().filter(|t| !preprocess(t).is_empty()) {
            assert_eq!(jaccard_similarity(text, text), 1.0);
            assert_eq!(cosine_similarity(text, text), 1.0);
        }
    }

    #[test]
    fn test_empty_side_is_zero() {
        for metric in Metric::ALL {
            assert_eq!(metric.score("", ""), 0.0);
            assert_eq!(metric.score("", "quantum noise"), 0.0);
            assert_eq!(metric.score("quantum noise", ""), 0.0);
            assert_eq!(metric.score("the of and", "the of and"), 0.0);
        }
    }

    #[test]
    fn test_jaccard_value() {
        // {quantum, computing} vs {quantum, noise}
        let score = jaccard_similarity("quantum computing", "quantum noise");
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_counts_multiplicity() {
        // a = {quantum: 2, computing: 1}, b = {quantum: 1}
        let score = cosine_similarity("quantum quantum computing", "quantum");
        assert!((score - 2.0 / 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_word_frequency_value() {
        // a: quantum 2/3, computing 1/3; b: quantum 1/2, noise 1/2
        let score = word_frequency_similarity("quantum quantum computing", "quantum noise");
        assert!((score - (2.0 / 3.0) * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_word_frequency_self_score_below_one() {
        // Σ (1/4)² over four distinct tokens
        let text = "alpha beta gamma delta";
        assert!((word_frequency_similarity(text, text) - 0.25).abs() < 1e-12);
        assert_eq!(word_frequency_similarity("alpha", "alpha"), 1.0);
    }

    #[test]
    fn test_disjoint_is_zero() {
        for metric in Metric::ALL {
            assert_eq!(metric.score("quantum computing", "braised short ribs"), 0.0);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Metric::from_name("jaccard"), Metric::Jaccard);
        assert_eq!(Metric::from_name(" Cosine "), Metric::Cosine);
        assert_eq!(Metric::from_name("word_frequency"), Metric::WordFrequency);
        assert_eq!(Metric::from_name("word-frequency"), Metric::WordFrequency);
        assert_eq!(Metric::from_name("foobar"), Metric::Cosine);
        assert_eq!(Metric::from_name(""), Metric::Cosine);
        assert_eq!(Metric::lookup("foobar"), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Metric::WordFrequency).unwrap(), "\"word_frequency\"");
        let metric: Metric = serde_json::from_str("\"jaccard\"").unwrap();
        assert_eq!(metric, Metric::Jaccard);
        for metric in Metric::ALL {
            assert_eq!(Metric::lookup(metric.as_str()), Some(metric));
        }
    }
}
