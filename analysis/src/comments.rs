use crate::sentiment::{truncate_chars, SentimentScorer};
use sublens_core::{CommentSummary, RedditComment};

// Bodies Reddit substitutes for deleted or moderator-removed comments.
const DELETED_SENTINELS: &[&str] = &["[deleted]", "[removed]"];

// Stored comment bodies are previews, not transcripts.
const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct CommentAggregation {
    pub summaries: Vec<CommentSummary>,
    pub avg_sentiment: f64,
}

/// Scores up to `cap` comments in listing order, skipping deleted and
/// removed bodies. A post with no qualifying comments aggregates to 0.0,
/// never to an error.
pub fn aggregate_comments(
    scorer: &SentimentScorer,
    comments: &[RedditComment],
    cap: usize,
) -> CommentAggregation {
    let mut summaries = Vec::new();
    let mut sentiments = Vec::new();

    for comment in comments {
        if summaries.len() >= cap {
            break;
        }
        if DELETED_SENTINELS.contains(&comment.body.as_str()) {
            continue;
        }

        let sentiment = scorer.score(&comment.body);
        sentiments.push(sentiment);
        summaries.push(CommentSummary {
            id: comment.id.clone(),
            body: truncate_chars(&comment.body, BODY_PREVIEW_CHARS).to_string(),
            author: comment.author.clone(),
            score: comment.score,
            sentiment_score: sentiment,
        });
    }

    let avg_sentiment = if sentiments.is_empty() {
        0.0
    } else {
        sentiments.iter().sum::<f64>() / sentiments.len() as f64
    };

    CommentAggregation {
        summaries,
        avg_sentiment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, body: &str) -> RedditComment {
        RedditComment {
            id: id.to_string(),
            body: body.to_string(),
            author: "user".to_string(),
            score: 1,
        }
    }

    #[test]
    fn test_no_comments_aggregates_to_zero() {
        let scorer = SentimentScorer::new();
        let agg = aggregate_comments(&scorer, &[], 40);
        assert!(agg.summaries.is_empty());
        assert_eq!(agg.avg_sentiment, 0.0);
    }

    #[test]
    fn test_deleted_and_removed_skipped() {
        let scorer = SentimentScorer::new();
        let comments = [
            comment("c1", "[deleted]"),
            comment("c2", "[removed]"),
            comment("c3", "An actual reply"),
        ];
        let agg = aggregate_comments(&scorer, &comments, 40);
        assert_eq!(agg.summaries.len(), 1);
        assert_eq!(agg.summaries[0].id, "c3");
    }

    #[test]
    fn test_all_sentinels_aggregates_to_zero() {
        let scorer = SentimentScorer::new();
        let comments = [comment("c1", "[deleted]"), comment("c2", "[removed]")];
        let agg = aggregate_comments(&scorer, &comments, 40);
        assert!(agg.summaries.is_empty());
        assert_eq!(agg.avg_sentiment, 0.0);
    }

    #[test]
    fn test_cap_honored_after_skips() {
        let scorer = SentimentScorer::new();
        let mut comments = vec![comment("x", "[deleted]")];
        for i in 0..10 {
            comments.push(comment(&format!("c{}", i), "fine"));
        }
        let agg = aggregate_comments(&scorer, &comments, 3);
        assert_eq!(agg.summaries.len(), 3);
        // The sentinel did not consume a slot
        assert_eq!(agg.summaries[0].id, "c0");
    }

    #[test]
    fn test_body_preview_truncated() {
        let scorer = SentimentScorer::new();
        let long_body = "a".repeat(500);
        let comments = [comment("c1", &long_body)];
        let agg = aggregate_comments(&scorer, &comments, 40);
        assert_eq!(agg.summaries[0].body.chars().count(), 200);
    }

    #[test]
    fn test_average_is_mean_of_kept_comments() {
        let scorer = SentimentScorer::new();
        let comments = [
            comment("c1", "I love this, wonderful"),
            comment("c2", "I hate this, horrible"),
        ];
        let agg = aggregate_comments(&scorer, &comments, 40);
        let expected = (agg.summaries[0].sentiment_score + agg.summaries[1].sentiment_score) / 2.0;
        assert!((agg.avg_sentiment - expected).abs() < 1e-12);
    }
}
