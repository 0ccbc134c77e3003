use reqwest::Response;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use sublens_core::{CollectorError, RedditApiError, RedditComment, RedditPost};
use tracing::{debug, error, info, warn};

use crate::RedditClient;

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

// Reddit caps listing pages at 100 items regardless of the requested limit.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvote_ratio: Option<f64>,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub over_18: bool,
}

impl From<RedditPostData> for RedditPost {
    fn from(data: RedditPostData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            selftext: data.selftext,
            author: data.author,
            subreddit: data.subreddit,
            url: data.url,
            created_utc: data.created_utc as i64,
            score: data.score,
            upvote_ratio: data.upvote_ratio.unwrap_or(0.0),
            num_comments: data.num_comments,
            over_18: data.over_18,
        }
    }
}

/// One node of a comment tree: either a comment or a collapsed
/// "load more" placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum CommentNode {
    #[serde(rename = "t1")]
    Comment(RedditCommentData),
    #[serde(rename = "more")]
    More(MoreCommentsData),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditCommentData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default, deserialize_with = "replies_or_empty")]
    pub replies: Option<Box<CommentListing>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoreCommentsData {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentListing {
    pub data: CommentListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentListingData {
    pub children: Vec<CommentNode>,
}

// Reddit sends the empty string (or null) where a comment has no replies,
// and a full listing object otherwise.
fn replies_or_empty<'de, D>(deserializer: D) -> Result<Option<Box<CommentListing>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Replies {
        Listing(Box<CommentListing>),
        Other(serde_json::Value),
    }

    Ok(match Replies::deserialize(deserializer)? {
        Replies::Listing(listing) => Some(listing),
        Replies::Other(_) => None,
    })
}

#[derive(Debug, Deserialize)]
struct MoreChildrenResponse {
    json: MoreChildrenBody,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenBody {
    data: MoreChildrenData,
}

#[derive(Debug, Deserialize)]
struct MoreChildrenData {
    things: Vec<CommentNode>,
}

impl RedditClient {
    pub(crate) async fn make_request(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Response, CollectorError> {
        let url = format!("{}{}", REDDIT_API_BASE, endpoint);
        let token = self.access_token()?;

        debug!("Reddit API request: GET {}", endpoint);
        let response = match self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query_params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {}: {}", endpoint, e);
                if e.is_timeout() {
                    return Err(CollectorError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CollectorError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status {} for {}", status, endpoint);
        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("Rate limited, retry after {} seconds", retry_after);
                Err(CollectorError::RedditApi(
                    RedditApiError::RateLimitExceeded { retry_after },
                ))
            }
            401 => Err(CollectorError::RedditApi(RedditApiError::InvalidToken)),
            403 => Err(CollectorError::RedditApi(RedditApiError::Forbidden {
                resource: endpoint.to_string(),
            })),
            404 => Err(CollectorError::RedditApi(RedditApiError::InvalidResponse {
                details: "Resource not found".to_string(),
            })),
            code if status.is_server_error() => Err(CollectorError::RedditApi(
                RedditApiError::ServerError { status_code: code },
            )),
            _ => Err(CollectorError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("unexpected status {}", status),
            })),
        }
    }

    /// Pages through a post listing endpoint until `limit` posts are
    /// collected or the listing runs out.
    async fn fetch_post_listing(
        &self,
        endpoint: &str,
        base_params: &[(&str, &str)],
        limit: u32,
    ) -> Result<Vec<RedditPost>, CollectorError> {
        let mut posts: Vec<RedditPost> = Vec::new();
        let mut after: Option<String> = None;

        while (posts.len() as u32) < limit {
            let page_size = (limit - posts.len() as u32).min(MAX_PAGE_SIZE).to_string();
            let mut params: Vec<(&str, &str)> = base_params.to_vec();
            params.push(("limit", page_size.as_str()));
            params.push(("raw_json", "1"));
            if let Some(ref cursor) = after {
                params.push(("after", cursor.as_str()));
            }

            let response = self.make_request(endpoint, &params).await?;
            let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
                error!("Failed to parse listing for {}: {}", endpoint, e);
                CollectorError::RedditApi(RedditApiError::InvalidResponse {
                    details: format!("unparseable listing for {}", endpoint),
                })
            })?;

            if listing.data.children.is_empty() {
                break;
            }
            posts.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .map(|child| RedditPost::from(child.data)),
            );

            after = listing.data.after;
            if after.is_none() {
                break;
            }
        }

        posts.truncate(limit as usize);
        Ok(posts)
    }

    /// Keyword search within one subreddit.
    pub async fn search_posts(
        &self,
        subreddit: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, CollectorError> {
        let endpoint = format!("/r/{}/search", subreddit);
        let posts = self
            .fetch_post_listing(&endpoint, &[("q", query), ("restrict_sr", "1")], limit)
            .await?;

        info!("Search returned {} posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

    /// The subreddit's hot listing.
    pub async fn hot_posts(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, CollectorError> {
        let endpoint = format!("/r/{}/hot", subreddit);
        let posts = self.fetch_post_listing(&endpoint, &[], limit).await?;

        info!("Retrieved {} hot posts from r/{}", posts.len(), subreddit);
        Ok(posts)
    }

    /// Fetches a post's comment tree flattened in listing order, with one
    /// expansion pass over collapsed placeholders. `wanted` bounds how many
    /// comments the caller will use, so expansion is skipped once the
    /// initial tree already covers it.
    pub async fn post_comments(
        &self,
        subreddit: &str,
        post_id: &str,
        wanted: usize,
    ) -> Result<Vec<RedditComment>, CollectorError> {
        let endpoint = format!("/r/{}/comments/{}", subreddit, post_id);
        let response = self
            .make_request(&endpoint, &[("raw_json", "1"), ("limit", "500")])
            .await?;

        // The comments endpoint returns a two-element array: the post
        // listing, then the comment tree.
        let (_, tree): (serde_json::Value, CommentListing) =
            response.json().await.map_err(|e| {
                error!("Failed to parse comment tree for {}: {}", post_id, e);
                CollectorError::RedditApi(RedditApiError::InvalidResponse {
                    details: format!("unparseable comment tree for {}", post_id),
                })
            })?;

        let (mut comments, more_ids) = flatten_comment_tree(tree);

        if comments.len() < wanted && !more_ids.is_empty() {
            debug!(
                "Expanding {} collapsed comment ids for {}",
                more_ids.len(),
                post_id
            );
            let mut expanded = self.more_children(post_id, &more_ids).await?;
            comments.append(&mut expanded);
        }

        debug!("Collected {} comments for {}", comments.len(), post_id);
        Ok(comments)
    }

    // Single expansion pass: one /api/morechildren call, nested
    // placeholders in the response are not followed.
    async fn more_children(
        &self,
        post_id: &str,
        ids: &[String],
    ) -> Result<Vec<RedditComment>, CollectorError> {
        let link_id = format!("t3_{}", post_id);
        let children = ids.join(",");
        let params = [
            ("api_type", "json"),
            ("link_id", link_id.as_str()),
            ("children", children.as_str()),
            ("raw_json", "1"),
        ];

        let response = self.make_request("/api/morechildren", &params).await?;
        let parsed: MoreChildrenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse morechildren for {}: {}", post_id, e);
            CollectorError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("unparseable morechildren for {}", post_id),
            })
        })?;

        let listing = CommentListing {
            data: CommentListingData {
                children: parsed.json.data.things,
            },
        };
        let (comments, _) = flatten_comment_tree(listing);
        Ok(comments)
    }
}

/// Flattens a nested comment tree breadth-first (the platform's listing
/// order) and collects the ids held by "load more" placeholders.
pub fn flatten_comment_tree(listing: CommentListing) -> (Vec<RedditComment>, Vec<String>) {
    let mut comments = Vec::new();
    let mut more_ids = Vec::new();
    let mut queue: VecDeque<CommentNode> = listing.data.children.into();

    while let Some(node) = queue.pop_front() {
        match node {
            CommentNode::Comment(data) => {
                let RedditCommentData {
                    id,
                    body,
                    author,
                    score,
                    replies,
                } = data;
                if let Some(replies) = replies {
                    queue.extend(replies.data.children);
                }
                comments.push(RedditComment {
                    id,
                    body,
                    author,
                    score,
                });
            }
            CommentNode::More(more) => more_ids.extend(more.children),
        }
    }

    (comments, more_ids)
}
