pub mod history;

use common::{AgentError, AgentResult, Config, GeneratedContent, Platform};
use tokio::sync::Mutex;
use tracing::{info, warn};
use twitter::TwitterClient;

use history::{HistoryStore, PostRecord};

/// Sends finished content to the platform and records the result. Missing
/// credentials degrade every publish to a logged failure instead of a crash.
pub struct Publisher {
    twitter: Option<TwitterClient>,
    http: reqwest::Client,
    history: Mutex<HistoryStore>,
}

impl Publisher {
    pub fn new(config: &Config) -> Self {
        let twitter = match TwitterClient::new(&config.twitter) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Twitter posting unavailable: {}", e);
                None
            }
        };

        Self {
            twitter,
            http: reqwest::Client::new(),
            history: Mutex::new(HistoryStore::load(&config.history_path)),
        }
    }

    /// Publishes one post. Every failure is caught and logged here; the
    /// caller only sees a bool.
    pub async fn publish(&self, platform: Platform, content: &GeneratedContent) -> bool {
        let text = compose_text(content, platform.max_post_length());

        match self.try_publish(&text, content).await {
            Ok(post_id) => {
                info!("Posted to {}: {}", platform, text);
                info!("Post id: {}", post_id);
                if let Err(e) = self.record(platform, content, text).await {
                    warn!("Failed to persist post history: {}", e);
                }
                true
            }
            Err(e) => {
                warn!("Failed to post to {}: {}", platform, e);
                false
            }
        }
    }

    async fn try_publish(&self, text: &str, content: &GeneratedContent) -> AgentResult<String> {
        let twitter = self
            .twitter
            .as_ref()
            .ok_or_else(|| AgentError::EnvVar("Twitter API not configured".to_string()))?;

        // An image failure downgrades to a text-only post.
        let mut media_ids = Vec::new();
        if let Some(image_url) = &content.image_url {
            match self.upload_image(twitter, image_url).await {
                Ok(media_id) => media_ids.push(media_id),
                Err(e) => warn!("Image upload failed, posting text-only: {}", e),
            }
        }

        twitter.create_post(text, &media_ids).await
    }

    async fn upload_image(&self, twitter: &TwitterClient, url: &str) -> AgentResult<String> {
        info!("Downloading image from {}", url);
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AgentError::Api(format!(
                "image download returned {}",
                response.status()
            )));
        }
        let bytes = response.bytes().await?;
        twitter.upload_media(&bytes).await
    }

    async fn record(
        &self,
        platform: Platform,
        content: &GeneratedContent,
        text: String,
    ) -> AgentResult<()> {
        let mut history = self.history.lock().await;
        history.append(PostRecord::new(platform, content, text));
        history.save()
    }

    pub async fn post_count(&self) -> usize {
        self.history.lock().await.len()
    }
}

/// Appends the article link when one exists and the combined text still
/// fits the platform cap.
pub fn compose_text(content: &GeneratedContent, max: usize) -> String {
    match &content.article_url {
        Some(url) if content.text.chars().count() + url.chars().count() + 1 <= max => {
            format!("{}\n{}", content.text, url)
        }
        _ => content.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::PostCategory;

    fn content(text: &str, article_url: Option<&str>) -> GeneratedContent {
        GeneratedContent {
            text: text.to_string(),
            image_url: None,
            article_url: article_url.map(|s| s.to_string()),
            category: PostCategory::News,
        }
    }

    #[test]
    fn article_link_appended_when_it_fits() {
        let content = content("short update", Some("https://example.com/story"));
        let text = compose_text(&content, 250);
        assert_eq!(text, "short update\nhttps://example.com/story");
    }

    #[test]
    fn article_link_skipped_when_it_would_overflow() {
        let body = "x".repeat(240);
        let content = content(&body, Some("https://example.com/story"));
        let text = compose_text(&content, 250);
        assert_eq!(text, body);
    }

    #[test]
    fn no_article_link_leaves_text_unchanged() {
        let content = content("plain post", None);
        assert_eq!(compose_text(&content, 250), "plain post");
    }

    #[tokio::test]
    async fn publish_without_credentials_reports_failure() {
        let config = Config {
            twitter: common::TwitterConfig::default(),
            gemini_api_key: None,
            xai_api_key: None,
            news_api_key: None,
            history_path: "unused.json".to_string(),
            schedule: common::ScheduleConfig::default(),
        };
        let publisher = Publisher::new(&config);
        let ok = publisher
            .publish(Platform::Twitter, &content("anything", None))
            .await;
        assert!(!ok);
        assert_eq!(publisher.post_count().await, 0);
    }
}
