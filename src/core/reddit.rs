use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{
    header::{HeaderMap, USER_AGENT},
    Client,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::core::forum::Forum;
use crate::error::coursebot::{CourseBotError, ErrorKind};
use crate::http::auth_middleware::AuthHeaderMiddleware;
use crate::http::ratelimit_middleware::RateLimitLogMiddleware;
use crate::model::config::RedditCredentials;
use crate::model::item::MonitoredItem;
use crate::model::reddit_listing::{CommentResponse, Listing};
use crate::model::token_response::TokenResponse;

/// Refresh this long before Reddit says the token expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// Script-app OAuth client for the monitored subreddits.
pub struct RedditClient {
    client: ClientWithMiddleware,
    auth_client: Client,
    credentials: RedditCredentials,
    subreddits: String,
    comment_limit: usize,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl RedditClient {
    pub fn new(
        credentials: RedditCredentials,
        subreddits: &str,
        comment_limit: usize,
        user_agent: &str,
    ) -> Result<Self, CourseBotError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent.parse()?);

        let auth_client = Client::builder()
            .default_headers(headers.clone())
            .timeout(Duration::from_secs(30))
            .build()?;
        let api_client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        let token: Arc<RwLock<Option<AccessToken>>> = Arc::new(RwLock::new(None));
        let token_for_header = Arc::clone(&token);
        let client = ClientBuilder::new(api_client)
            .with(AuthHeaderMiddleware {
                token_fn: Arc::new(move || {
                    token_for_header
                        .read()
                        .ok()
                        .and_then(|guard| guard.as_ref().map(|token| token.value.clone()))
                }),
            })
            .with(RateLimitLogMiddleware)
            .build();

        Ok(RedditClient {
            client,
            auth_client,
            credentials,
            subreddits: subreddits.to_string(),
            comment_limit,
            token,
        })
    }

    fn token_is_fresh(&self) -> bool {
        self.token
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|token| token.expires_at > Instant::now()))
            .unwrap_or(false)
    }

    fn store_token(&self, token: AccessToken) -> Result<(), CourseBotError> {
        let mut guard = self
            .token
            .write()
            .map_err(|err| CourseBotError::new(ErrorKind::Auth, &err.to_string()))?;
        *guard = Some(token);
        Ok(())
    }

    /// Password grant; stores the token for the auth middleware.
    pub async fn authenticate(&self) -> Result<(), CourseBotError> {
        let form = [
            ("grant_type", "password"),
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];
        let response = self
            .auth_client
            .post(&self.credentials.auth_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&form)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| CourseBotError::from(err).with_kind(ErrorKind::Auth))?;
        let data: TokenResponse = response
            .json()
            .await
            .map_err(|err| CourseBotError::from(err).with_kind(ErrorKind::Auth))?;

        let Some(access_token) = data.access_token else {
            let reason = data.error.unwrap_or_else(|| "no access token".to_string());
            return Err(CourseBotError::new(ErrorKind::Auth, &reason));
        };
        let lifetime = Duration::from_secs(data.expires_in.unwrap_or(3600));
        self.store_token(AccessToken {
            value: access_token,
            expires_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })?;
        info!("Logged in to Reddit as {}", self.credentials.username);
        Ok(())
    }

    async fn ensure_token(&self) -> Result<(), CourseBotError> {
        if self.token_is_fresh() {
            return Ok(());
        }
        self.authenticate().await
    }

    async fn listing(&self, path: &str, limit: usize) -> Result<Vec<MonitoredItem>, CourseBotError> {
        self.ensure_token().await?;
        let url = format!(
            "{}/r/{}/{}",
            self.credentials.api_base.trim_end_matches('/'),
            self.subreddits,
            path
        );
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?
            .error_for_status()?;
        let listing: Listing = response.json().await?;
        let items = listing.into_items();
        debug!("{} returned {} items", url, items.len());
        Ok(items)
    }
}

#[async_trait]
impl Forum for RedditClient {
    async fn newest_comments(&self) -> Result<Vec<MonitoredItem>, CourseBotError> {
        self.listing("comments", self.comment_limit).await
    }

    async fn newest_submissions(&self, limit: usize) -> Result<Vec<MonitoredItem>, CourseBotError> {
        self.listing("new", limit).await
    }

    async fn reply(&self, item: &MonitoredItem, body: &str) -> Result<(), CourseBotError> {
        let reply_error = |err: CourseBotError| err.with_kind(ErrorKind::Reply);

        self.ensure_token().await.map_err(reply_error)?;
        let url = format!("{}/api/comment", self.credentials.api_base.trim_end_matches('/'));
        let form = [
            ("api_type", "json"),
            ("thing_id", item.fullname.as_str()),
            ("text", body),
        ];
        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|err| reply_error(err.into()))?
            .error_for_status()
            .map_err(|err| reply_error(err.into()))?;
        let data: CommentResponse = response.json().await.map_err(|err| reply_error(err.into()))?;

        if !data.json.errors.is_empty() {
            let errors = serde_json::to_string(&data.json.errors).unwrap_or_default();
            return Err(CourseBotError::new(ErrorKind::Reply, &errors));
        }
        Ok(())
    }
}
