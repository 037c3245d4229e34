//! Character-class token estimate for runs without a tokenizer file

use super::traits::TokenCounter;

const DEFAULT_CHARS_PER_TOKEN: f64 = 4.0;

/// Estimates tokens from character classes
///
/// Word characters are divided by a chars-per-token ratio; punctuation and
/// symbols, which code is full of, are mostly counted as their own tokens.
#[derive(Debug, Clone)]
pub struct HeuristicCounter {
    name: String,
    max_tokens: usize,
    chars_per_token: f64,
}

impl HeuristicCounter {
    pub fn new(name: &str, max_tokens: usize) -> Self {
        Self::with_ratio(name, max_tokens, DEFAULT_CHARS_PER_TOKEN)
    }

    /// Counter with a custom chars-per-token ratio; non-positive ratios fall back to the default
    pub fn with_ratio(name: &str, max_tokens: usize, chars_per_token: f64) -> Self {
        let chars_per_token = if chars_per_token > 0.0 {
            chars_per_token
        } else {
            DEFAULT_CHARS_PER_TOKEN
        };
        Self {
            name: name.to_string(),
            max_tokens,
            chars_per_token,
        }
    }

    pub const fn chars_per_token(&self) -> f64 {
        self.chars_per_token
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn estimate_tokens(&self, text: &str) -> usize {
        let (mut word, mut whitespace, mut punctuation, mut other) = (0usize, 0usize, 0usize, 0usize);
        for ch in text.chars() {
            let bucket = if ch.is_alphanumeric() || ch == '_' {
                &mut word
            } else if ch.is_whitespace() {
                &mut whitespace
            } else if ch.is_ascii_punctuation() {
                &mut punctuation
            } else {
                &mut other
            };
            *bucket = bucket.saturating_add(1);
        }

        let estimate = (word as f64 / self.chars_per_token)
            + (punctuation as f64 * 0.8)
            + (other as f64 * 0.9)
            + (whitespace as f64 * 0.1);
        estimate.ceil() as usize
    }
}

impl TokenCounter for HeuristicCounter {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.estimate_tokens(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_counter_creation() {
        let counter = HeuristicCounter::new("heuristic", 4096);
        assert_eq!(counter.name(), "heuristic");
        assert_eq!(counter.max_tokens(), 4096);
        assert!((counter.chars_per_token() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_ratio_falls_back() {
        let counter = HeuristicCounter::with_ratio("h", 10, 0.0);
        assert!((counter.chars_per_token() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(HeuristicCounter::new("h", 4096).count(""), 0);
    }

    #[test]
    fn test_punctuation_raises_estimate() {
        let counter = HeuristicCounter::new("h", 4096);
        let dense = counter.count("a->b(c[i]);");
        let plain = counter.count("a b c i");
        assert!(dense > plain, "{dense} vs {plain}");
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let counter = HeuristicCounter::new("h", 4096);
        let text = "for (int i = 0; i < n; ++i) { sum += v[i]; }\n";
        assert_eq!(counter.count(text), counter.count(text));
        assert_eq!(counter.try_count(text).unwrap(), counter.count(text));
    }
}
