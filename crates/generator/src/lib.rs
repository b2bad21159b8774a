pub mod gemini;
pub mod images;
pub mod news;
pub mod stats;
pub mod template;
pub mod xai;

use common::{
    clamp_to_limit, AgentResult, Config, ContentRequest, ContentStrategy, GeneratedContent,
    Platform, PostCategory,
};
use tracing::{info, warn};

use gemini::GeminiStrategy;
use news::NewsFetcher;
use template::TemplateStrategy;
use xai::XaiStrategy;

/// Produces post text through an ordered strategy chain, then attaches a
/// topic-relevant image and, for news posts, the article link. Which LLM
/// strategies participate depends on which API keys are configured.
pub struct ContentGenerator {
    strategies: Vec<Box<dyn ContentStrategy>>,
    news: NewsFetcher,
}

impl ContentGenerator {
    pub fn new(config: &Config) -> AgentResult<Self> {
        let mut strategies: Vec<Box<dyn ContentStrategy>> = Vec::new();

        if let Some(key) = &config.gemini_api_key {
            strategies.push(Box::new(GeminiStrategy::new(key.clone())));
        } else {
            info!("GEMINI_API_KEY not set; Gemini strategy disabled");
        }

        if let Some(key) = &config.xai_api_key {
            strategies.push(Box::new(XaiStrategy::new(key.clone())));
        } else {
            info!("XAI_API_KEY not set; xAI strategy disabled");
        }

        strategies.push(Box::new(TemplateStrategy));

        Ok(Self {
            strategies,
            news: NewsFetcher::new(config.news_api_key.clone())?,
        })
    }

    /// Generates content for one topic. Never fails: the template strategy
    /// closes the chain, and the text is clamped to the platform cap.
    pub async fn generate(
        &self,
        topic: &str,
        platform: Platform,
        category: Option<PostCategory>,
        include_image: bool,
    ) -> GeneratedContent {
        let category = category.unwrap_or_else(PostCategory::pick_random);
        info!("Selected category '{}' for topic '{}'", category, topic);

        let request = self.build_request(topic, platform, category).await;

        let mut text = None;
        for strategy in &self.strategies {
            match strategy.attempt(&request).await {
                Ok(candidate) if !candidate.trim().is_empty() => {
                    text = Some(candidate);
                    break;
                }
                Ok(_) => warn!("{} produced empty text", strategy.name()),
                Err(e) => warn!("{} failed: {}", strategy.name(), e),
            }
        }
        let text = text.unwrap_or_else(|| template::render(&request));

        let text = clamp_to_limit(&text, platform.max_post_length());

        let image_url = if include_image {
            Some(images::relevant_image_url(topic))
        } else {
            None
        };

        let article_url = if category == PostCategory::News {
            request.headline.as_ref().map(|h| h.url.clone())
        } else {
            None
        };

        GeneratedContent {
            text,
            image_url,
            article_url,
            category,
        }
    }

    /// Assembles the per-call context once so every strategy in the chain
    /// sees the same headline and statistic.
    async fn build_request(
        &self,
        topic: &str,
        platform: Platform,
        category: PostCategory,
    ) -> ContentRequest {
        let headline = match category {
            PostCategory::Informative | PostCategory::News => {
                self.news.top_headline(topic).await
            }
            _ => None,
        };

        let statistic = match category {
            PostCategory::Statistic => stats::statistic_for(topic),
            _ => None,
        };

        ContentRequest {
            topic: topic.to_string(),
            platform,
            category,
            headline,
            statistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless_config() -> Config {
        Config {
            twitter: common::TwitterConfig::default(),
            gemini_api_key: None,
            xai_api_key: None,
            news_api_key: None,
            history_path: "posted_content.json".to_string(),
            schedule: common::ScheduleConfig::default(),
        }
    }

    #[tokio::test]
    async fn keyless_generator_still_produces_every_category() {
        let generator = ContentGenerator::new(&keyless_config()).unwrap();
        for category in PostCategory::ALL {
            let content = generator
                .generate("productivity hacks", Platform::Twitter, Some(category), false)
                .await;
            assert!(!content.text.is_empty());
            assert!(content.text.chars().count() <= Platform::Twitter.max_post_length());
            assert_eq!(content.category, category);
            assert!(content.image_url.is_none());
        }
    }

    #[tokio::test]
    async fn image_attached_when_requested() {
        let generator = ContentGenerator::new(&keyless_config()).unwrap();
        let content = generator
            .generate("technology trends 2024", Platform::Twitter, Some(PostCategory::Tip), true)
            .await;
        assert!(content.image_url.is_some());
    }

    #[tokio::test]
    async fn random_category_is_from_the_fixed_set() {
        let generator = ContentGenerator::new(&keyless_config()).unwrap();
        let content = generator
            .generate("fitness trends", Platform::Instagram, None, false)
            .await;
        assert!(PostCategory::ALL.contains(&content.category));
    }
}
