use serde::{Deserialize, Serialize};

/// A post as fetched from Reddit, before any metric derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub url: String,
    pub created_utc: i64,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    pub over_18: bool,
}

/// A single comment as fetched from Reddit.
#[derive(Debug, Clone, PartialEq)]
pub struct RedditComment {
    pub id: String,
    pub body: String,
    pub author: String,
    pub score: i64,
}

/// Bucket a post's outbound link falls into, by substring match on the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainCategory {
    #[serde(rename = "text_only")]
    TextOnly,
    #[serde(rename = "self_post")]
    SelfPost,
    #[serde(rename = "academic/medical")]
    AcademicMedical,
    #[serde(rename = "social_media")]
    SocialMedia,
    #[serde(rename = "other_web")]
    OtherWeb,
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DomainCategory::TextOnly => "text_only",
            DomainCategory::SelfPost => "self_post",
            DomainCategory::AcademicMedical => "academic/medical",
            DomainCategory::SocialMedia => "social_media",
            DomainCategory::OtherWeb => "other_web",
        };
        write!(f, "{}", label)
    }
}

/// Truncated, scored view of one comment, embedded in the post record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: String,
    pub body: String,
    pub author: String,
    pub score: i64,
    pub sentiment_score: f64,
}

/// One flat record per analyzed post. Immutable after creation; this is the
/// unit both exporters consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub created_utc: String,
    pub subreddit: String,
    pub author: String,
    pub title: String,
    pub full_url: String,

    // Derived metrics
    pub domain_category: DomainCategory,
    pub post_length_chars: usize,
    pub has_disclaimer: bool,
    pub mentions_influencers: bool,
    pub over_18: bool,
    pub upvote_score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    pub total_engagement: i64,
    pub post_sentiment: f64,
    pub avg_comment_sentiment: f64,
    pub sentiment_gap: f64,

    /// Comment summaries serialized as a JSON string, so the record itself
    /// stays flat. Dropped from the CSV export, kept in the JSON export.
    pub top_comments_data: String,
}
