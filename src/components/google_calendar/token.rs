use crate::error::{auth_error, SearchResult};
use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, Client as RedisClient};
use serde_json::Value;
use tracing::debug;

/// Source of the opaque bearer token used for calendar API calls
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a usable access token, or `AuthenticationRequired`
    async fn access_token(&self) -> SearchResult<String>;
}

/// Token supplied up front, e.g. through `GOOGLE_ACCESS_TOKEN`
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> SearchResult<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| auth_error("No access token configured"))
    }
}

/// Reads the OAuth token stored in Redis by the token setup tooling
#[derive(Clone)]
pub struct RedisTokenProvider {
    redis_key: String,
    redis: RedisClient,
}

impl RedisTokenProvider {
    pub fn new(redis_url: &str, redis_key: &str) -> SearchResult<Self> {
        let redis = RedisClient::open(redis_url)
            .map_err(|e| auth_error(&format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            redis_key: redis_key.to_string(),
            redis,
        })
    }
}

/// Extract the access token from stored token JSON, rejecting expired tokens
pub fn token_from_json(token: &Value, now: i64) -> SearchResult<String> {
    if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
        if expiry <= now {
            return Err(auth_error("Stored access token has expired"));
        }
    }

    token
        .get("access_token")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .ok_or_else(|| auth_error("Stored token has no access_token"))
}

#[async_trait]
impl TokenProvider for RedisTokenProvider {
    async fn access_token(&self) -> SearchResult<String> {
        let mut redis_conn = self
            .redis
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| auth_error(&format!("Failed to connect to Redis: {}", e)))?;

        let token_str: Option<String> = redis_conn
            .get(&self.redis_key)
            .await
            .map_err(|e| auth_error(&format!("Failed to read token from Redis: {}", e)))?;

        let token_str = token_str.ok_or_else(|| auth_error("No token stored in Redis"))?;
        debug!("Loaded stored token from Redis key {}", self.redis_key);

        let token: Value = serde_json::from_str(&token_str)
            .map_err(|e| auth_error(&format!("Failed to parse token JSON: {}", e)))?;

        token_from_json(&token, Utc::now().timestamp())
    }
}
