pub mod analytics;

use anyhow::Result;
use common::{Config, Platform};
use generator::ContentGenerator;
use publisher::Publisher;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use trends::TrendFinder;
use twitter::TwitterClient;

/// Substituted when the whole trend chain somehow comes back empty.
const EMERGENCY_TOPICS: &[&str] = &["social media", "digital marketing", "technology"];

const PAUSE_BETWEEN_PLATFORMS: Duration = Duration::from_secs(2);

/// Owns the whole pipeline: trend discovery, content generation and
/// publishing, plus the post history kept inside the publisher.
pub struct Agent {
    platforms: Vec<Platform>,
    finder: TrendFinder,
    generator: ContentGenerator,
    publisher: Publisher,
    twitter: Option<TwitterClient>,
}

impl Agent {
    pub fn new(config: &Config) -> Result<Self> {
        let twitter = TwitterClient::new(&config.twitter).ok();

        Ok(Self {
            platforms: vec![Platform::Twitter],
            finder: TrendFinder::new(config),
            generator: ContentGenerator::new(config)?,
            publisher: Publisher::new(config),
            twitter,
        })
    }

    /// Checks that the platform credentials actually work. Failure is
    /// logged but never fatal.
    pub async fn verify_connection(&self) {
        match &self.twitter {
            Some(client) => match client.get_me().await {
                Ok(user) => info!("Connected to Twitter as @{}", user.username),
                Err(e) => warn!("Twitter connection check failed: {}", e),
            },
            None => warn!("Twitter credentials not configured; posting will fail"),
        }
    }

    /// One full cycle: discover a topic, generate content for each platform
    /// and publish it.
    pub async fn run_post_cycle(&self) -> Result<()> {
        let started = Instant::now();
        info!("Starting post cycle");

        let mut topics = self.finder.discover().await;
        if topics.is_empty() {
            topics = EMERGENCY_TOPICS.iter().map(|t| t.to_string()).collect();
            info!("Trend discovery came back empty; using emergency topics");
        }

        let topic = &topics[rand::thread_rng().gen_range(0..topics.len())];
        info!("Selected topic: {}", topic);

        for platform in &self.platforms {
            let content = self
                .generator
                .generate(topic, *platform, None, true)
                .await;
            info!(
                "Generated {} content for {}: {}",
                content.category, platform, content.text
            );
            if let Some(image_url) = &content.image_url {
                info!("With image: {}", image_url);
            }

            if self.publisher.publish(*platform, &content).await {
                info!("Successfully posted to {}", platform);
            } else {
                warn!("Failed to post to {}", platform);
            }

            tokio::time::sleep(PAUSE_BETWEEN_PLATFORMS).await;
        }

        info!("Post cycle completed in {:.2?}", started.elapsed());
        Ok(())
    }

    pub async fn post_count(&self) -> usize {
        self.publisher.post_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_topics_survive_the_trend_filter() {
        let topics: Vec<String> = EMERGENCY_TOPICS.iter().map(|t| t.to_string()).collect();
        assert_eq!(trends::filter_topics(topics).len(), EMERGENCY_TOPICS.len());
    }
}
