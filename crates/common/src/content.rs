use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target platform for a post. Each platform carries its own character cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
}

impl Platform {
    pub fn max_post_length(&self) -> usize {
        match self {
            Platform::Twitter => 250,
            Platform::Facebook => 400,
            Platform::Instagram => 300,
        }
    }

    /// Noun used when describing the post in a prompt ("write a tweet...").
    pub fn post_noun(&self) -> &'static str {
        match self {
            Platform::Twitter => "tweet",
            Platform::Facebook => "Facebook post",
            Platform::Instagram => "Instagram caption",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
        };
        write!(f, "{}", name)
    }
}

/// Rhetorical style of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Informative,
    Question,
    Statistic,
    Tip,
    News,
    Opinion,
    Resource,
}

impl PostCategory {
    pub const ALL: [PostCategory; 7] = [
        PostCategory::Informative,
        PostCategory::Question,
        PostCategory::Statistic,
        PostCategory::Tip,
        PostCategory::News,
        PostCategory::Opinion,
        PostCategory::Resource,
    ];

    pub fn pick_random() -> Self {
        Self::ALL[rand::thread_rng().gen_range(0..Self::ALL.len())]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostCategory::Informative => "informative",
            PostCategory::Question => "question",
            PostCategory::Statistic => "statistic",
            PostCategory::Tip => "tip",
            PostCategory::News => "news",
            PostCategory::Opinion => "opinion",
            PostCategory::Resource => "resource",
        }
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Finished post content, ready for publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub text: String,
    pub image_url: Option<String>,
    pub article_url: Option<String>,
    pub category: PostCategory,
}

/// Cuts `text` down to `max` characters, replacing the tail with "..." when
/// it does not fit. Counts characters, not bytes.
pub fn clamp_to_limit(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clamped: String = text.chars().take(max.saturating_sub(3)).collect();
    clamped.push_str("...");
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_caps() {
        assert_eq!(Platform::Twitter.max_post_length(), 250);
        assert_eq!(Platform::Facebook.max_post_length(), 400);
        assert_eq!(Platform::Instagram.max_post_length(), 300);
    }

    #[test]
    fn category_set_is_complete() {
        assert_eq!(PostCategory::ALL.len(), 7);
        for _ in 0..50 {
            assert!(PostCategory::ALL.contains(&PostCategory::pick_random()));
        }
    }

    #[test]
    fn clamp_leaves_short_text_alone() {
        assert_eq!(clamp_to_limit("hello", 250), "hello");
        let exact: String = "a".repeat(250);
        assert_eq!(clamp_to_limit(&exact, 250), exact);
    }

    #[test]
    fn clamp_truncates_with_ellipsis() {
        let long: String = "x".repeat(260);
        let clamped = clamp_to_limit(&long, 250);
        assert_eq!(clamped.chars().count(), 250);
        assert!(clamped.ends_with("..."));
        assert_eq!(&clamped[..247], &long[..247]);
    }

    #[test]
    fn clamp_counts_chars_not_bytes() {
        let long: String = "é".repeat(260);
        let clamped = clamp_to_limit(&long, 250);
        assert_eq!(clamped.chars().count(), 250);
        assert!(clamped.ends_with("..."));
    }
}
