use async_trait::async_trait;
use common::{AgentResult, ContentRequest, ContentStrategy, PostCategory};
use rand::Rng;
use tracing::info;

/// Last-resort strategy: hand-written templates with the topic substituted.
/// Never fails, so the chain always terminates with usable text.
pub struct TemplateStrategy;

#[async_trait]
impl ContentStrategy for TemplateStrategy {
    async fn attempt(&self, request: &ContentRequest) -> AgentResult<String> {
        info!(
            "Using template content for '{}' with category {}",
            request.topic, request.category
        );
        Ok(render(request))
    }

    fn name(&self) -> &'static str {
        "static template"
    }
}

pub fn render(request: &ContentRequest) -> String {
    let topic = &request.topic;
    let tag = topic.replace(' ', "");

    let pair: [String; 2] = match request.category {
        PostCategory::Informative => [
            format!("📚 Did you know? Here's an interesting fact about {topic} that most people don't realize. Learning about this changed my perspective! #informative #{tag}"),
            format!("🔍 Understanding {topic} is essential in today's world. Here's what you need to know and why it matters. Have you explored this topic before? #knowledgeshare #{tag}"),
        ],
        PostCategory::Question => [
            format!("🤔 What's your experience with {topic}? I'm curious to hear different perspectives on this important topic! #discussion #{tag}"),
            format!("❓ If you could change one thing about {topic}, what would it be and why? Share your thoughts below! #feedback #{tag}"),
        ],
        PostCategory::Statistic => [
            format!("📊 Surprising statistic: The latest research on {topic} shows significant developments. Did you expect these numbers? #data #{tag}"),
            format!("📈 The numbers don't lie: {topic} is changing rapidly. Here's what the latest data reveals about where things are headed. What do these trends mean for you? #statistics #{tag}"),
        ],
        PostCategory::Tip => [
            format!("💡 Pro tip for {topic}: This approach can save you time and improve results. What strategies have worked for you? #helpful #{tag}"),
            format!("✅ Quick tip that improved my approach to {topic}: This simple change made a significant difference. What tips would you add? #productivity #{tag}"),
        ],
        PostCategory::News => [
            format!("🔔 Breaking update on {topic}: Recent developments are changing how we understand this issue. What's your take on these changes? #update #{tag}"),
            format!("📰 Just in: Important news about {topic} that everyone should know. How might this affect your approach? #currentevents #{tag}"),
        ],
        PostCategory::Opinion => [
            format!("💭 My perspective on {topic}: After researching this topic, I've come to an interesting conclusion. Do you agree or see it differently? #perspective #{tag}"),
            format!("🧠 Unpopular opinion about {topic}: This viewpoint challenges conventional wisdom but deserves consideration. Where do you stand on this? #thoughtleadership #{tag}"),
        ],
        PostCategory::Resource => [
            format!("🔗 Just discovered an excellent resource on {topic} that's worth checking out. What resources have you found helpful? #useful #{tag}"),
            format!("📚 For anyone interested in {topic}, this comprehensive guide covers everything you need to know. What other resources would you recommend? #learning #{tag}"),
        ],
    };

    pair[rand::thread_rng().gen_range(0..pair.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{clamp_to_limit, Platform};

    fn request(category: PostCategory) -> ContentRequest {
        ContentRequest {
            topic: "data privacy".to_string(),
            platform: Platform::Twitter,
            category,
            headline: None,
            statistic: None,
        }
    }

    #[test]
    fn every_category_renders_non_empty_text() {
        for category in PostCategory::ALL {
            let text = render(&request(category));
            assert!(!text.is_empty(), "empty template for {}", category);
            assert!(text.contains("data privacy"));
            assert!(text.contains("#dataprivacy"));
        }
    }

    #[test]
    fn rendered_templates_fit_platforms_after_clamping() {
        for category in PostCategory::ALL {
            for platform in [Platform::Twitter, Platform::Facebook, Platform::Instagram] {
                let text = clamp_to_limit(&render(&request(category)), platform.max_post_length());
                assert!(text.chars().count() <= platform.max_post_length());
            }
        }
    }
}
