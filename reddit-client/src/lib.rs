pub mod api;
pub mod auth;

pub use api::{
    flatten_comment_tree, CommentListing, CommentNode, RedditListing, RedditListingChild,
    RedditListingData, RedditPostData,
};
pub use auth::AccessToken;

use reqwest::Client;
use std::time::Duration;
use sublens_core::{CollectorError, RedditApiError, RedditComment, RedditConfig, RedditPost};
use tracing::info;

/// The fetch operations the scanner drives. Implemented by [`RedditClient`]
/// and by in-memory stubs in tests.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, CollectorError>;

    async fn hot_posts(&self, subreddit: &str, limit: u32)
        -> Result<Vec<RedditPost>, CollectorError>;

    async fn post_comments(
        &self,
        subreddit: &str,
        post_id: &str,
        wanted: usize,
    ) -> Result<Vec<RedditComment>, CollectorError>;
}

#[derive(Debug)]
pub struct RedditClient {
    pub(crate) http: Client,
    config: RedditConfig,
    token: Option<AccessToken>,
}

impl RedditClient {
    pub fn new(config: RedditConfig) -> Self {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            config,
            token: None,
        }
    }

    /// One authentication per run, before any listing fetch.
    pub async fn authenticate(&mut self) -> Result<(), CollectorError> {
        let token = auth::request_token(&self.http, &self.config).await?;
        info!("Authenticated with Reddit as {}", self.config.user_agent);
        self.token = Some(token);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn access_token(&self) -> Result<&str, CollectorError> {
        self.token
            .as_ref()
            .map(|t| t.access_token.as_str())
            .ok_or(CollectorError::RedditApi(RedditApiError::InvalidToken))
    }
}

impl PostSource for RedditClient {
    async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, CollectorError> {
        RedditClient::search_posts(self, subreddit, query, limit).await
    }

    async fn hot_posts(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, CollectorError> {
        RedditClient::hot_posts(self, subreddit, limit).await
    }

    async fn post_comments(
        &self,
        subreddit: &str,
        post_id: &str,
        wanted: usize,
    ) -> Result<Vec<RedditComment>, CollectorError> {
        RedditClient::post_comments(self, subreddit, post_id, wanted).await
    }
}
