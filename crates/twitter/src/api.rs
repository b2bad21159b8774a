use base64::Engine as _;
use common::{AgentError, AgentResult, TwitterConfig};
use reqwest::Client;
use tracing::info;

use crate::models::{
    CreateTweetResponse, MediaUploadResponse, SearchResponse, TrendLocation, Tweet, User,
    UserResponse,
};

#[derive(Clone)]
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    api_url: String,
    api_v1_url: String,
    upload_url: String,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> AgentResult<Self> {
        let bearer_token = config
            .bearer_token
            .clone()
            .ok_or_else(|| AgentError::EnvVar("TWITTER_BEARER_TOKEN must be set".to_string()))?;

        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            bearer_token,
            api_url: "https://api.twitter.com/2".to_string(),
            api_v1_url: "https://api.twitter.com/1.1".to_string(),
            upload_url: "https://upload.twitter.com/1.1".to_string(),
        })
    }

    /// Trending topic names for a WOEID via the v1.1 trends endpoint. Tends
    /// to be rejected on unelevated API tiers; callers treat that as a
    /// normal miss.
    pub async fn get_place_trends(&self, woeid: u32) -> AgentResult<Vec<String>> {
        let url = format!("{}/trends/place.json", self.api_v1_url);
        let response = self
            .client
            .get(&url)
            .query(&[("id", woeid.to_string())])
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "trends/place returned {}: {}",
                status, body
            )));
        }

        let locations: Vec<TrendLocation> = response.json().await?;
        let names = locations
            .into_iter()
            .next()
            .map(|location| location.trends.into_iter().map(|t| t.name).collect())
            .unwrap_or_default();
        Ok(names)
    }

    pub async fn search_recent(&self, query: &str, max_results: u32) -> AgentResult<Vec<Tweet>> {
        let url = format!("{}/tweets/search/recent", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("max_results", &max_results.to_string()),
                ("sort_order", "relevancy"),
            ])
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "recent search returned {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.data.unwrap_or_default())
    }

    /// Uploads image bytes and returns the media id to reference in a post.
    pub async fn upload_media(&self, bytes: &[u8]) -> AgentResult<String> {
        let url = format!("{}/media/upload.json", self.upload_url);
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .form(&[("media_data", encoded)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "media upload returned {}: {}",
                status, body
            )));
        }

        let parsed: MediaUploadResponse = response.json().await?;
        info!("Uploaded media, id {}", parsed.media_id_string);
        Ok(parsed.media_id_string)
    }

    pub async fn create_post(&self, text: &str, media_ids: &[String]) -> AgentResult<String> {
        let url = format!("{}/tweets", self.api_url);
        let body = if media_ids.is_empty() {
            serde_json::json!({ "text": text })
        } else {
            serde_json::json!({ "text": text, "media": { "media_ids": media_ids } })
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "tweet creation returned {}: {}",
                status, body
            )));
        }

        let parsed: CreateTweetResponse = response.json().await?;
        info!("Created post {}", parsed.data.id);
        Ok(parsed.data.id)
    }

    /// Looks up the authenticated account, used as a connection check.
    pub async fn get_me(&self) -> AgentResult<User> {
        let url = format!("{}/users/me", self.api_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "users/me returned {}: {}",
                status, body
            )));
        }

        let parsed: UserResponse = response.json().await?;
        Ok(parsed.data)
    }
}
