use common::{AgentError, AgentResult, NewsArticle};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{info, warn};

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
const NEWS_SEARCH_URL: &str = "https://www.google.com/search";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    articles: Option<Vec<NewsApiArticle>>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    title: String,
    source: NewsApiSource,
    url: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: String,
}

/// Fetches recent articles for a topic, via the news API when a key is
/// configured and a best-effort news-search scrape otherwise.
pub struct NewsFetcher {
    client: Client,
    api_key: Option<String>,
}

impl NewsFetcher {
    pub fn new(api_key: Option<String>) -> AgentResult<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .build()?;
        Ok(Self { client, api_key })
    }

    pub async fn fetch_articles(&self, topic: &str) -> AgentResult<Vec<NewsArticle>> {
        let query: String = topic.chars().filter(|c| *c != '#' && *c != '@').collect();

        if let Some(key) = &self.api_key {
            return self.fetch_from_api(&query, key).await;
        }
        self.scrape_news_search(&query).await
    }

    /// First article for the topic, with every failure swallowed. Absence
    /// just means the prompt goes out without news context.
    pub async fn top_headline(&self, topic: &str) -> Option<NewsArticle> {
        match self.fetch_articles(topic).await {
            Ok(articles) => articles.into_iter().next(),
            Err(e) => {
                warn!("News lookup for '{}' failed: {}", topic, e);
                None
            }
        }
    }

    async fn fetch_from_api(&self, query: &str, key: &str) -> AgentResult<Vec<NewsArticle>> {
        let response = self
            .client
            .get(NEWS_API_URL)
            .query(&[
                ("q", query),
                ("sortBy", "publishedAt"),
                ("pageSize", "3"),
                ("apiKey", key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AgentError::Api(format!("news API returned {}", status)));
        }

        let parsed: NewsApiResponse = response.json().await?;
        let articles = parsed
            .articles
            .unwrap_or_default()
            .into_iter()
            .take(3)
            .map(|article| NewsArticle {
                title: article.title,
                source: article.source.name,
                url: article.url,
                published: article.published_at.unwrap_or_else(|| "Recent".to_string()),
            })
            .collect();
        Ok(articles)
    }

    async fn scrape_news_search(&self, query: &str) -> AgentResult<Vec<NewsArticle>> {
        let response = self
            .client
            .get(NEWS_SEARCH_URL)
            .query(&[("q", format!("{} news", query).as_str()), ("tbm", "nws")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AgentError::Api(format!("news search returned {}", status)));
        }

        let html = response.text().await?;
        let articles = parse_news_results(&html)?;
        info!("Scraped {} news results for '{}'", articles.len(), query);
        Ok(articles)
    }
}

fn parse_news_results(html: &str) -> AgentResult<Vec<NewsArticle>> {
    let document = Html::parse_document(html);
    // Result-card selectors on the news search page; a layout change makes
    // this return nothing rather than fail.
    let item_selector = Selector::parse("div.SoaBEf")
        .map_err(|e| AgentError::HtmlParse(format!("Invalid result selector: {}", e)))?;
    let title_selector = Selector::parse("div.mCBkyc")
        .map_err(|e| AgentError::HtmlParse(format!("Invalid title selector: {}", e)))?;
    let source_selector = Selector::parse("div.UPmit")
        .map_err(|e| AgentError::HtmlParse(format!("Invalid source selector: {}", e)))?;
    let link_selector = Selector::parse("a")
        .map_err(|e| AgentError::HtmlParse(format!("Invalid link selector: {}", e)))?;

    let mut articles = Vec::new();
    for item in document.select(&item_selector).take(3) {
        let title = match item.select(&title_selector).next() {
            Some(elem) => elem.text().collect::<String>().trim().to_string(),
            None => continue,
        };
        let link = match item.select(&link_selector).next().and_then(|a| a.attr("href")) {
            Some(href) => unwrap_redirect_url(href),
            None => continue,
        };
        let source = item
            .select(&source_selector)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| "News Source".to_string());

        articles.push(NewsArticle {
            title,
            source,
            url: link,
            published: "Recent".to_string(),
        });
    }

    Ok(articles)
}

/// Search result links arrive as "/url?q=<target>&..."; pull the target out.
fn unwrap_redirect_url(href: &str) -> String {
    match href.strip_prefix("/url?q=") {
        Some(rest) => rest.split('&').next().unwrap_or(rest).to_string(),
        None => href.to_string(),
    }
}
