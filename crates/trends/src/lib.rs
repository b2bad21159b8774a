pub mod sources;

use common::{Config, TrendSource};
use tracing::{info, warn};
use twitter::TwitterClient;

use sources::{CuratedSource, PlaceTrendsSource, SearchHeuristicSource, TrendsPageSource};

/// Ordered chain of trend sources. The first source that yields anything
/// usable wins; everything below it is never consulted.
pub struct TrendFinder {
    sources: Vec<Box<dyn TrendSource>>,
}

impl TrendFinder {
    pub fn new(config: &Config) -> Self {
        let mut sources: Vec<Box<dyn TrendSource>> = Vec::new();

        match TwitterClient::new(&config.twitter) {
            Ok(client) => {
                sources.push(Box::new(PlaceTrendsSource::new(client.clone())));
                sources.push(Box::new(SearchHeuristicSource::new(client)));
            }
            Err(e) => warn!("Twitter API sources unavailable: {}", e),
        }

        match TrendsPageSource::new() {
            Ok(source) => sources.push(Box::new(source)),
            Err(e) => warn!("Trends page source unavailable: {}", e),
        }

        sources.push(Box::new(CuratedSource));

        Self { sources }
    }

    /// Walks the chain, short-circuits on the first source that returns
    /// anything, then applies the post-filter. Source failures are logged
    /// and never propagate.
    pub async fn discover(&self) -> Vec<String> {
        let mut raw = Vec::new();
        for source in &self.sources {
            match source.fetch_topics().await {
                Ok(topics) if !topics.is_empty() => {
                    info!("{} returned {} topics", source.name(), topics.len());
                    raw = topics;
                    break;
                }
                Ok(_) => info!("{} returned no topics", source.name()),
                Err(e) => warn!("{} failed: {}", source.name(), e),
            }
        }

        filter_topics(raw)
    }
}

/// Drops empty strings, over-long entries and bare links.
pub fn filter_topics(topics: Vec<String>) -> Vec<String> {
    topics
        .into_iter()
        .filter(|topic| {
            !topic.is_empty() && topic.chars().count() < 50 && !topic.starts_with("http")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_drops_empty_long_and_links() {
        let topics = vec![
            "".to_string(),
            "a".repeat(50),
            "http://example.com/trending".to_string(),
            "https://example.com".to_string(),
            "solar power".to_string(),
        ];
        assert_eq!(filter_topics(topics), vec!["solar power".to_string()]);
    }

    #[test]
    fn filter_keeps_topics_just_under_the_cap() {
        let topics = vec!["a".repeat(49), "a".repeat(50)];
        let kept = filter_topics(topics);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].len(), 49);
    }

    #[tokio::test]
    async fn chain_without_credentials_still_has_a_tail_source() {
        let config = common::Config {
            twitter: common::TwitterConfig::default(),
            gemini_api_key: None,
            xai_api_key: None,
            news_api_key: None,
            history_path: "posted_content.json".to_string(),
            schedule: common::ScheduleConfig::default(),
        };
        let finder = TrendFinder::new(&config);
        assert!(finder.sources.len() >= 2);

        // Every curated topic survives the post-filter, so the chain can
        // never end with nothing while the tail source is registered.
        let curated = filter_topics(sources::sample_curated_topics());
        assert!(!curated.is_empty());
    }
}
