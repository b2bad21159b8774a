use async_trait::async_trait;
use crate::content::{Platform, PostCategory};
use crate::error::AgentResult;

/// One way of discovering trending topics. Sources are tried in priority
/// order and the first non-empty result wins.
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn fetch_topics(&self) -> AgentResult<Vec<String>>;
    fn name(&self) -> &'static str;
}

/// A news article surfaced for a topic, used as prompt context and as the
/// link appended to news posts.
#[derive(Debug, Clone)]
pub struct NewsArticle {
    pub title: String,
    pub source: String,
    pub url: String,
    pub published: String,
}

/// Everything a generation strategy needs for one attempt. Assembled once
/// per `generate` call and shared across the whole chain.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub topic: String,
    pub platform: Platform,
    pub category: PostCategory,
    pub headline: Option<NewsArticle>,
    pub statistic: Option<String>,
}

/// One way of producing post text. Strategies are tried in priority order;
/// a failure falls through to the next one.
#[async_trait]
pub trait ContentStrategy: Send + Sync {
    async fn attempt(&self, request: &ContentRequest) -> AgentResult<String>;
    fn name(&self) -> &'static str;
}
