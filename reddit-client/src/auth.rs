use reqwest::Client;
use serde::Deserialize;
use sublens_core::{CollectorError, RedditApiError, RedditConfig};
use tracing::{debug, error};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Bearer token from the client-credentials grant. A batch run is short
/// enough that expiry within a run is not handled.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

/// Application-only OAuth2: basic auth with the client id/secret, no user
/// context. This is the grant Reddit issues to script-type applications.
pub async fn request_token(
    http: &Client,
    config: &RedditConfig,
) -> Result<AccessToken, CollectorError> {
    debug!("Requesting application-only access token");

    let response = http
        .post(TOKEN_URL)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .header("User-Agent", &config.user_agent)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        error!("Token endpoint returned {}", status);
        return Err(CollectorError::RedditApi(
            RedditApiError::AuthenticationFailed {
                reason: format!("token endpoint returned {}", status),
            },
        ));
    }

    let token: AccessToken = response.json().await.map_err(|e| {
        error!("Failed to parse token response: {}", e);
        CollectorError::RedditApi(RedditApiError::AuthenticationFailed {
            reason: "unparseable token response".to_string(),
        })
    })?;

    debug!("Access token granted, expires in {}s", token.expires_in);
    Ok(token)
}
