use async_trait::async_trait;
use common::{AgentError, AgentResult, ContentRequest, ContentStrategy, PostCategory};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

/// Primary generation strategy: a structured prompt against the Gemini
/// REST API.
pub struct GeminiStrategy {
    client: Client,
    api_key: String,
}

impl GeminiStrategy {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ContentStrategy for GeminiStrategy {
    async fn attempt(&self, request: &ContentRequest) -> AgentResult<String> {
        info!(
            "Generating {} content for '{}' on {} via Gemini",
            request.category, request.topic, request.platform
        );

        let prompt = build_prompt(request);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(GEMINI_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "Gemini returned {}: {}",
                status, text
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AgentError::Api("Gemini returned no candidates".to_string()));
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}

fn category_instruction(category: PostCategory) -> &'static str {
    match category {
        PostCategory::Informative => {
            "Write an informative, fact-based post that educates the audience"
        }
        PostCategory::Question => {
            "Write a thought-provoking question that encourages audience participation"
        }
        PostCategory::Statistic => {
            "Write a post highlighting an interesting statistic or data point"
        }
        PostCategory::Tip => "Write a practical tip or advice that provides immediate value",
        PostCategory::News => "Write a news update that summarizes recent developments",
        PostCategory::Opinion => {
            "Write a thoughtful opinion or perspective that invites discussion"
        }
        PostCategory::Resource => {
            "Write a post sharing a useful resource or tool related to the topic"
        }
    }
}

fn build_prompt(request: &ContentRequest) -> String {
    let hashtag_seed: String = request
        .topic
        .replace(' ', "")
        .chars()
        .take(15)
        .collect();

    let mut prompt = format!(
        "You are a social media expert creating engaging, valuable content that educates and engages users.\n\
         \n\
         Task: {task} about '{topic}' as a {noun}.\n\
         \n\
         Requirements:\n\
         - Maximum {limit} characters\n\
         - Include 1-2 relevant hashtags (e.g., #{hashtag_seed})\n\
         - Add appropriate emojis for visual appeal\n\
         - Include a call-to-action or engagement question\n\
         - Be informative yet conversational\n\
         - Focus on providing actionable insights or interesting perspectives\n\
         \n\
         Post Type: {category}\n\
         Platform: {platform}",
        task = category_instruction(request.category),
        topic = request.topic,
        noun = request.platform.post_noun(),
        limit = request.platform.max_post_length(),
        hashtag_seed = hashtag_seed,
        category = request.category,
        platform = request.platform,
    );

    if let Some(headline) = &request.headline {
        if matches!(
            request.category,
            PostCategory::Informative | PostCategory::News
        ) {
            prompt.push_str(&format!("\n\nRecent news context: {}", headline.title));
        }
    }

    if let Some(stat) = &request.statistic {
        if request.category == PostCategory::Statistic {
            prompt.push_str(&format!("\n\nRelevant statistic to incorporate: {}", stat));
        }
    }

    prompt.push_str("\n\nGenerate only the social media post content, nothing else:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{NewsArticle, Platform};

    fn request(category: PostCategory) -> ContentRequest {
        ContentRequest {
            topic: "renewable energy".to_string(),
            platform: Platform::Twitter,
            category,
            headline: Some(NewsArticle {
                title: "Solar output doubles".to_string(),
                source: "Example Times".to_string(),
                url: "https://example.com/solar".to_string(),
                published: "Recent".to_string(),
            }),
            statistic: Some("a made-up number".to_string()),
        }
    }

    #[test]
    fn prompt_embeds_platform_and_limit() {
        let prompt = build_prompt(&request(PostCategory::Tip));
        assert!(prompt.contains("Maximum 250 characters"));
        assert!(prompt.contains("tweet"));
        assert!(prompt.contains("renewable energy"));
        assert!(prompt.contains("#renewableenergy"));
    }

    #[test]
    fn news_context_only_for_news_like_posts() {
        assert!(build_prompt(&request(PostCategory::News)).contains("Solar output doubles"));
        assert!(build_prompt(&request(PostCategory::Informative))
            .contains("Solar output doubles"));
        assert!(!build_prompt(&request(PostCategory::Tip)).contains("Solar output doubles"));
    }

    #[test]
    fn statistic_context_only_for_statistic_posts() {
        assert!(build_prompt(&request(PostCategory::Statistic)).contains("a made-up number"));
        assert!(!build_prompt(&request(PostCategory::News)).contains("a made-up number"));
    }

    #[test]
    fn gemini_response_deserializes() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"post text"}],"role":"model"}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = &parsed.candidates.unwrap()[0].content.parts[0].text;
        assert_eq!(text, "post text");
    }
}
