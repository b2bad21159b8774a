use async_trait::async_trait;
use common::{AgentError, AgentResult, ContentRequest, ContentStrategy, PostCategory};
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

const XAI_URL: &str = "https://api.x.ai/v1/chat/completions";

const ENGAGEMENT_QUESTIONS: &[&str] = &[
    "What do you think?",
    "Have you experienced this?",
    "What's your take on this?",
    "How does this impact you?",
    "Would you like to learn more about this topic?",
];

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Secondary generation strategy: a plain template-style prompt against the
/// xAI chat-completions API, with post-processing to guarantee a hashtag
/// and an engagement hook.
pub struct XaiStrategy {
    client: Client,
    api_key: String,
}

impl XaiStrategy {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ContentStrategy for XaiStrategy {
    async fn attempt(&self, request: &ContentRequest) -> AgentResult<String> {
        info!(
            "Generating {} content for '{}' via xAI",
            request.category, request.topic
        );

        let prompt = build_prompt(request);
        let body = serde_json::json!({
            "messages": [{ "role": "user", "content": prompt }],
            "model": "grok-3-latest"
        });

        let response = self
            .client
            .post(XAI_URL)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "xAI returned {}: {}",
                status, text
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(AgentError::Api("xAI returned no choices".to_string()));
        }

        let content = ensure_hashtags(content, &request.topic);
        Ok(ensure_engagement(content, request.category))
    }

    fn name(&self) -> &'static str {
        "xAI"
    }
}

fn build_prompt(request: &ContentRequest) -> String {
    let noun = request.platform.post_noun();
    let topic = &request.topic;

    match request.category {
        PostCategory::Informative => {
            format!("Write an informative {} about {} with valuable facts:", noun, topic)
        }
        PostCategory::Question => {
            format!("Write a {} with a thought-provoking question about {}:", noun, topic)
        }
        PostCategory::Statistic => {
            let stat = request
                .statistic
                .as_deref()
                .unwrap_or("an interesting statistic");
            format!("Write a {} about {} with this statistic: {}:", noun, topic, stat)
        }
        PostCategory::Tip => format!("Write a {} with a useful tip about {}:", noun, topic),
        PostCategory::News => {
            let headline = request
                .headline
                .as_ref()
                .map(|h| h.title.as_str())
                .unwrap_or("recent developments");
            format!("Write a {} about this {} news: {}:", noun, topic, headline)
        }
        PostCategory::Opinion => {
            format!("Write a {} with a thoughtful perspective on {}:", noun, topic)
        }
        PostCategory::Resource => {
            format!("Write a {} sharing a valuable resource about {}:", noun, topic)
        }
    }
}

/// Appends up to two topic-derived hashtags when the text has none.
fn ensure_hashtags(content: String, topic: &str) -> String {
    if content.split_whitespace().any(|word| word.starts_with('#')) {
        return content;
    }

    let hashtags: Vec<String> = topic
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 3)
        .take(2)
        .map(|word| format!("#{}", word))
        .collect();

    if hashtags.is_empty() {
        return content;
    }
    format!("{}\n\n{}", content, hashtags.join(" "))
}

/// Appends a call-to-action when the text has no question already. Question
/// posts are their own hook.
fn ensure_engagement(content: String, category: PostCategory) -> String {
    if content.contains('?') || category == PostCategory::Question {
        return content;
    }
    let pick = ENGAGEMENT_QUESTIONS[rand::thread_rng().gen_range(0..ENGAGEMENT_QUESTIONS.len())];
    format!("{} {}", content, pick)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtags_added_when_missing() {
        let out = ensure_hashtags("plain text".to_string(), "remote work productivity");
        assert!(out.contains("#remote"));
        assert!(out.contains("#work") || out.contains("#productivity"));
    }

    #[test]
    fn existing_hashtags_left_alone() {
        let out = ensure_hashtags("already #tagged".to_string(), "remote work");
        assert_eq!(out, "already #tagged");
    }

    #[test]
    fn short_words_do_not_become_hashtags() {
        let out = ensure_hashtags("plain".to_string(), "ai is it");
        assert_eq!(out, "plain");
    }

    #[test]
    fn engagement_question_appended_when_missing() {
        let out = ensure_engagement("a statement".to_string(), PostCategory::Tip);
        assert!(out.contains('?'));
        assert!(out.starts_with("a statement "));
    }

    #[test]
    fn question_posts_are_not_padded() {
        let out = ensure_engagement("no question mark".to_string(), PostCategory::Question);
        assert_eq!(out, "no question mark");
    }

    #[test]
    fn prompts_name_the_platform_noun() {
        let request = ContentRequest {
            topic: "urban gardening".to_string(),
            platform: common::Platform::Instagram,
            category: PostCategory::Tip,
            headline: None,
            statistic: None,
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Instagram caption"));
        assert!(prompt.contains("urban gardening"));
    }
}
