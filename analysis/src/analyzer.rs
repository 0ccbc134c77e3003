use crate::comments::aggregate_comments;
use crate::domain;
use crate::flags::ContentFlagClassifier;
use crate::sentiment::SentimentScorer;
use chrono::DateTime;
use sublens_core::{CollectorError, PostRecord, RedditComment, RedditPost};

/// Derives the full flat record for one post. Holds the compiled matchers
/// and the loaded sentiment model; construct once per run and reuse.
pub struct PostAnalyzer {
    scorer: SentimentScorer,
    flags: ContentFlagClassifier,
    comments_per_post: usize,
}

impl PostAnalyzer {
    pub fn new(
        disclaimer_terms: &[String],
        influencer_terms: &[String],
        comments_per_post: usize,
    ) -> Result<Self, CollectorError> {
        Ok(Self {
            scorer: SentimentScorer::new(),
            flags: ContentFlagClassifier::new(disclaimer_terms, influencer_terms)?,
            comments_per_post,
        })
    }

    pub fn analyze(&self, post: &RedditPost, comments: &[RedditComment]) -> PostRecord {
        let full_text = format!("{} {}", post.title, post.selftext);

        let post_sentiment = self.scorer.score(&full_text);
        let flags = self.flags.classify(&full_text);
        let aggregation = aggregate_comments(&self.scorer, comments, self.comments_per_post);

        let top_comments_data =
            serde_json::to_string(&aggregation.summaries).unwrap_or_else(|_| "[]".to_string());

        PostRecord {
            id: post.id.clone(),
            created_utc: epoch_to_iso(post.created_utc),
            subreddit: post.subreddit.clone(),
            author: post.author.clone(),
            title: post.title.clone(),
            full_url: post.url.clone(),

            domain_category: domain::classify(&post.url),
            post_length_chars: full_text.chars().count(),
            has_disclaimer: flags.has_disclaimer,
            mentions_influencers: flags.mentions_influencers,
            over_18: post.over_18,
            upvote_score: post.score,
            upvote_ratio: post.upvote_ratio,
            num_comments: post.num_comments,
            total_engagement: post.score + post.num_comments as i64,
            post_sentiment,
            avg_comment_sentiment: aggregation.avg_sentiment,
            sentiment_gap: post_sentiment - aggregation.avg_sentiment,

            top_comments_data,
        }
    }
}

fn epoch_to_iso(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sublens_core::{CommentSummary, DomainCategory};

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn analyzer() -> PostAnalyzer {
        PostAnalyzer::new(
            &terms(&["not medical advice"]),
            &terms(&["therapist", "tiktok"]),
            40,
        )
        .unwrap()
    }

    fn post() -> RedditPost {
        RedditPost {
            id: "abc123".to_string(),
            title: "My therapist helped me".to_string(),
            selftext: "Long story, but things are better now.".to_string(),
            author: "poster".to_string(),
            subreddit: "mentalhealth".to_string(),
            url: "https://www.reddit.com/r/mentalhealth/comments/abc123/".to_string(),
            created_utc: 1640995200,
            score: 42,
            upvote_ratio: 0.93,
            num_comments: 5,
            over_18: false,
        }
    }

    #[test]
    fn test_record_fields() {
        let record = analyzer().analyze(&post(), &[]);

        assert_eq!(record.id, "abc123");
        assert_eq!(record.created_utc, "2022-01-01T00:00:00");
        assert_eq!(record.subreddit, "mentalhealth");
        assert_eq!(record.domain_category, DomainCategory::SelfPost);
        assert!(record.mentions_influencers);
        assert!(!record.has_disclaimer);
        assert_eq!(record.upvote_score, 42);
        assert_eq!(record.total_engagement, 47);
        assert_eq!(
            record.post_length_chars,
            "My therapist helped me Long story, but things are better now.".chars().count()
        );
    }

    #[test]
    fn test_zero_qualifying_comments_gap_equals_post_sentiment() {
        let record = analyzer().analyze(&post(), &[]);
        assert_eq!(record.avg_comment_sentiment, 0.0);
        assert_eq!(record.sentiment_gap, record.post_sentiment);
        assert_eq!(record.top_comments_data, "[]");
    }

    #[test]
    fn test_comment_payload_embedded_as_json() {
        let comments = [RedditComment {
            id: "c1".to_string(),
            body: "That is wonderful news".to_string(),
            author: "friend".to_string(),
            score: 3,
        }];
        let record = analyzer().analyze(&post(), &comments);

        let summaries: Vec<CommentSummary> =
            serde_json::from_str(&record.top_comments_data).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, "c1");
        assert!((record.sentiment_gap
            - (record.post_sentiment - record.avg_comment_sentiment))
            .abs()
            < 1e-12);
    }

    #[test]
    fn test_missing_optional_fields_degrade() {
        let bare = RedditPost {
            id: "x".to_string(),
            title: String::new(),
            selftext: String::new(),
            author: String::new(),
            subreddit: "s".to_string(),
            url: String::new(),
            created_utc: 0,
            score: 0,
            upvote_ratio: 0.0,
            num_comments: 0,
            over_18: false,
        };
        let record = analyzer().analyze(&bare, &[]);
        assert_eq!(record.domain_category, DomainCategory::TextOnly);
        assert!(record.author.is_empty());
        assert_eq!(record.post_sentiment, 0.0);
    }

    #[test]
    fn test_epoch_to_iso() {
        assert_eq!(epoch_to_iso(1640995200), "2022-01-01T00:00:00");
        assert_eq!(epoch_to_iso(0), "1970-01-01T00:00:00");
    }
}
