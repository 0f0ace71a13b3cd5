use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_general_category::{get_general_category, GeneralCategory};

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

const STOPWORDS: &[&str] = &[
    "the", "of", "and", "in", "to", "a", "is", "that", "it", "on", "for", "with", "as",
    "by", "at", "from", "this", "was", "are", "be", "were", "which", "an", "or", "not",
    "but", "have", "has", "had", "will", "would", "could", "should", "may", "might",
    "shall", "who", "whom", "whose", "what", "where", "when", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "too", "very", "so", "than", "s", "t", "can", "just", "don", "now",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

// ═══════════════════════════════════════════════════════════════════════════
// Normalization
// ═══════════════════════════════════════════════════════════════════════════

/// Check whether `token` is excluded from comparison
#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Letters (L*), numbers (N*) and `_`; combining marks are not word characters
#[inline]
fn is_word_char(c: char) -> bool {
    if c == '_' {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Lowercase, strip punctuation, split on whitespace and drop stop words
///
/// Punctuation is removed rather than replaced, so `multi-modal` becomes a
/// single `multimodal` token.
pub fn preprocess(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(|token| token.to_string())
        .collect()
}
