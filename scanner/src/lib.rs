use analysis::{KeywordMatcher, PostAnalyzer};
use reddit_client::PostSource;
use std::collections::HashSet;
use std::time::Duration;
use sublens_core::{CollectorError, LimitsConfig, PostRecord};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Outcome of a full scan. Failed communities are reported alongside the
/// records from clean ones, so callers can tell a clean run from a
/// degraded one.
#[derive(Debug)]
pub struct ScanReport {
    pub records: Vec<PostRecord>,
    pub failures: Vec<SubredditFailure>,
}

impl ScanReport {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubredditFailure {
    pub subreddit: String,
    pub reason: String,
}

/// Drives one source per configured subreddit: keyword search first, a
/// locally-filtered hot scan when search under-delivers, then analysis of
/// every surviving post.
pub struct Scanner<S> {
    source: S,
    analyzer: PostAnalyzer,
    term_matcher: KeywordMatcher,
    query: String,
    limits: LimitsConfig,
}

impl<S: PostSource> Scanner<S> {
    pub fn new(
        source: S,
        analyzer: PostAnalyzer,
        influencer_terms: &[String],
        limits: LimitsConfig,
    ) -> Result<Self, CollectorError> {
        Ok(Self {
            source,
            analyzer,
            term_matcher: KeywordMatcher::new(influencer_terms)?,
            query: influencer_terms.join(" OR "),
            limits,
        })
    }

    pub async fn scan_all(&self, subreddits: &[String]) -> ScanReport {
        let mut records = Vec::new();
        let mut failures = Vec::new();

        for (i, subreddit) in subreddits.iter().enumerate() {
            info!("Scanning r/{}", subreddit);
            match self.scan_subreddit(subreddit).await {
                Ok(mut subreddit_records) => {
                    info!(
                        "r/{}: collected {} records",
                        subreddit,
                        subreddit_records.len()
                    );
                    records.append(&mut subreddit_records);
                }
                Err(e) => {
                    warn!("Error in r/{}: {}", subreddit, e);
                    failures.push(SubredditFailure {
                        subreddit: subreddit.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            // Courtesy pause between communities
            if i + 1 < subreddits.len() {
                sleep(Duration::from_secs(self.limits.subreddit_delay_secs)).await;
            }
        }

        ScanReport { records, failures }
    }

    async fn scan_subreddit(&self, subreddit: &str) -> Result<Vec<PostRecord>, CollectorError> {
        let mut posts = self
            .source
            .search_posts(subreddit, &self.query, self.limits.posts_per_subreddit)
            .await?;

        // Search indexes lag and recall is weak; when the yield is thin,
        // scan the hot listing and filter locally with the same terms.
        if posts.len() < self.limits.fallback_threshold {
            info!(
                "r/{}: search yielded {} posts, scanning hot listing",
                subreddit,
                posts.len()
            );
            let hot = self
                .source
                .hot_posts(subreddit, self.limits.hot_fallback_posts)
                .await?;
            posts.extend(hot.into_iter().filter(|p| {
                let text = format!("{} {}", p.title, p.selftext);
                self.term_matcher.is_match(&text)
            }));
        }

        // Dedupe by id, keeping first-seen order; search and fallback can
        // surface the same post.
        let mut seen = HashSet::new();
        posts.retain(|p| seen.insert(p.id.clone()));

        let mut records = Vec::with_capacity(posts.len());
        for post in &posts {
            let comments = self
                .source
                .post_comments(subreddit, &post.id, self.limits.comments_per_post)
                .await?;
            let record = self.analyzer.analyze(post, &comments);
            debug!(
                "Processed: {:.40} (sentiment {:.2})",
                post.title, record.post_sentiment
            );
            records.push(record);
        }

        Ok(records)
    }
}
