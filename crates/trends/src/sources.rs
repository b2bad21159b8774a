use async_trait::async_trait;
use common::{AgentError, AgentResult, TrendSource};
use rand::seq::SliceRandom;
use rand::Rng;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::info;
use twitter::TwitterClient;

const TRENDS_PAGE_URL: &str = "https://trends24.in/";

/// Topics used when every live source comes up empty. Sampled 3-5 at a time.
const CURATED_TOPICS: &[&str] = &[
    "technology advancements",
    "sustainable living",
    "health breakthroughs",
    "remote work productivity",
    "digital marketing strategies",
    "AI ethics",
    "climate solutions",
    "entrepreneurship tips",
    "financial literacy",
    "productivity hacks",
    "mental health awareness",
    "educational innovations",
    "technological innovation",
    "sustainable travel",
    "nutrition science",
    "fitness trends",
    "stress management",
    "influential books",
    "film analysis",
    "music production",
    "ethical fashion",
    "photography techniques",
    "sports science",
    "home organization",
    "sustainable gardening",
    "pet health",
    "effective parenting",
    "career development",
    "data privacy",
    "renewable energy",
    "medical research",
    "space exploration",
];

/// Stage 1: the v1.1 place-trends endpoint. Needs elevated API access, so a
/// rejection here is the normal case and the chain moves on.
pub struct PlaceTrendsSource {
    client: TwitterClient,
    woeid: u32,
}

impl PlaceTrendsSource {
    pub fn new(client: TwitterClient) -> Self {
        // WOEID 1 is worldwide
        Self { client, woeid: 1 }
    }
}

#[async_trait]
impl TrendSource for PlaceTrendsSource {
    async fn fetch_topics(&self) -> AgentResult<Vec<String>> {
        let names = self.client.get_place_trends(self.woeid).await?;
        Ok(names.into_iter().take(10).collect())
    }

    fn name(&self) -> &'static str {
        "place trends API"
    }
}

/// Stage 2: mine recent public tweets for hashtags and short phrases.
pub struct SearchHeuristicSource {
    client: TwitterClient,
}

impl SearchHeuristicSource {
    pub fn new(client: TwitterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TrendSource for SearchHeuristicSource {
    async fn fetch_topics(&self) -> AgentResult<Vec<String>> {
        let tweets = self.client.search_recent("-is:retweet lang:en", 20).await?;
        let texts: Vec<String> = tweets.into_iter().map(|t| t.text).collect();
        Ok(extract_candidate_topics(&texts))
    }

    fn name(&self) -> &'static str {
        "recent search heuristic"
    }
}

/// Pulls hashtag tokens and short comma-delimited phrases (3-30 chars,
/// containing a space) out of tweet texts, deduplicated in first-seen order.
pub fn extract_candidate_topics(texts: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();

    for text in texts {
        for word in text.split_whitespace() {
            if word.starts_with('#') && word.len() > 1 && seen.insert(word.to_string()) {
                topics.push(word.to_string());
            }
        }

        for phrase in text.to_lowercase().split(',') {
            let clean = phrase.trim();
            let length = clean.chars().count();
            if length > 3 && length < 30 && clean.contains(' ') && seen.insert(clean.to_string()) {
                topics.push(clean.to_string());
            }
        }
    }

    topics.truncate(10);
    topics
}

/// Stage 3: scrape a public trends aggregator page. The selector is
/// best-effort; a page-shape change just yields an empty list.
pub struct TrendsPageSource {
    client: reqwest::Client,
}

impl TrendsPageSource {
    pub fn new() -> AgentResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TrendSource for TrendsPageSource {
    async fn fetch_topics(&self) -> AgentResult<Vec<String>> {
        let html = self
            .client
            .get(TRENDS_PAGE_URL)
            .send()
            .await?
            .text()
            .await?;
        parse_trends_page(&html)
    }

    fn name(&self) -> &'static str {
        "trends page scrape"
    }
}

fn parse_trends_page(html: &str) -> AgentResult<Vec<String>> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse(".trend-card:first-child ol li a")
        .map_err(|e| AgentError::HtmlParse(format!("Invalid trend selector: {}", e)))?;

    let trends: Vec<String> = document
        .select(&item_selector)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .take(10)
        .collect();

    info!("Scraped {} trends from aggregator page", trends.len());
    Ok(trends)
}

/// Stage 4: sample a handful of curated evergreen topics. Never fails.
pub struct CuratedSource;

#[async_trait]
impl TrendSource for CuratedSource {
    async fn fetch_topics(&self) -> AgentResult<Vec<String>> {
        Ok(sample_curated_topics())
    }

    fn name(&self) -> &'static str {
        "curated topic list"
    }
}

pub fn sample_curated_topics() -> Vec<String> {
    let mut rng = rand::thread_rng();
    let amount = rng.gen_range(3..=5);
    CURATED_TOPICS
        .choose_multiple(&mut rng, amount)
        .map(|topic| topic.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hashtags_and_phrases() {
        let texts = vec![
            "Big news today #RustLang is great".to_string(),
            "thinking about remote work, home office setups, and more".to_string(),
        ];
        let topics = extract_candidate_topics(&texts);
        assert!(topics.contains(&"#RustLang".to_string()));
        assert!(topics.contains(&"home office setups".to_string()));
    }

    #[test]
    fn skips_phrases_without_spaces_or_wrong_length() {
        let texts = vec!["one,ab,this phrase is far far far too long to qualify here".to_string()];
        let topics = extract_candidate_topics(&texts);
        assert!(topics.is_empty());
    }

    #[test]
    fn deduplicates_preserving_order() {
        let texts = vec![
            "#ai is everywhere #ai".to_string(),
            "more about #ai".to_string(),
        ];
        let topics = extract_candidate_topics(&texts);
        assert_eq!(topics, vec!["#ai".to_string()]);
    }

    #[test]
    fn curated_sample_is_three_to_five() {
        for _ in 0..20 {
            let sample = sample_curated_topics();
            assert!((3..=5).contains(&sample.len()));
            let unique: std::collections::HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), sample.len());
        }
    }

    #[test]
    fn trends_page_parse_tolerates_unknown_markup() {
        let topics = parse_trends_page("<html><body><p>nothing here</p></body></html>").unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn trends_page_parse_reads_first_card() {
        let html = r#"<div class="trend-card"><ol><li><a>topic one</a></li><li><a>topic two</a></li></ol></div>"#;
        let topics = parse_trends_page(html).unwrap();
        assert_eq!(topics, vec!["topic one".to_string(), "topic two".to_string()]);
    }
}
