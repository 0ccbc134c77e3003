use vader_sentiment::SentimentIntensityAnalyzer;

// Scoring input is capped at the first 5000 characters.
const MAX_SCORED_CHARS: usize = 5000;

/// Lexicon-based polarity scorer. Loading the lexicon happens once here,
/// at construction, never per call.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity in [-1, 1]; empty text scores 0.0.
    pub fn score(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(truncate_chars(text, MAX_SCORED_CHARS));
        scores.get("compound").copied().unwrap_or(0.0)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncates to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_zero() {
        let scorer = SentimentScorer::new();
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn test_score_stays_in_range() {
        let scorer = SentimentScorer::new();
        let samples = [
            "I love my therapist, best decision ever!",
            "This was awful, terrible advice that hurt people.",
            "The meeting is at noon.",
            "ok",
        ];
        for text in samples {
            let score = scorer.score(text);
            assert!((-1.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_polarity_direction() {
        let scorer = SentimentScorer::new();
        assert!(scorer.score("I love this, it is wonderful and amazing") > 0.0);
        assert!(scorer.score("I hate this, it is horrible and disgusting") < 0.0);
    }

    #[test]
    fn test_truncation_idempotence() {
        let scorer = SentimentScorer::new();
        let long_text = "this is great and wonderful ".repeat(400);
        assert!(long_text.chars().count() > MAX_SCORED_CHARS);

        let truncated = truncate_chars(&long_text, MAX_SCORED_CHARS);
        assert_eq!(scorer.score(&long_text), scorer.score(truncated));
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 5), "héllo");
        assert_eq!(truncate_chars(text, 100), text);
    }
}
