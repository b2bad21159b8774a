use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, Default)]
pub struct TwitterConfig {
    pub bearer_token: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
}

impl TwitterConfig {
    /// True when the full user-context credential set is present, not just
    /// the bearer token.
    pub fn has_user_context(&self) -> bool {
        self.api_key.is_some()
            && self.api_secret.is_some()
            && self.access_token.is_some()
            && self.access_secret.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub weekday_times: Vec<String>,
    pub weekend_times: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekday_times: vec!["09:00".into(), "14:00".into(), "18:00".into()],
            weekend_times: vec!["11:00".into(), "15:00".into(), "19:00".into()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub twitter: TwitterConfig,
    pub gemini_api_key: Option<String>,
    pub xai_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub history_path: String,
    pub schedule: ScheduleConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let twitter = TwitterConfig {
            bearer_token: env::var("TWITTER_BEARER_TOKEN").ok(),
            api_key: env::var("TWITTER_API_KEY").ok(),
            api_secret: env::var("TWITTER_API_SECRET").ok(),
            access_token: env::var("TWITTER_ACCESS_TOKEN").ok(),
            access_secret: env::var("TWITTER_ACCESS_SECRET").ok(),
        };

        let defaults = ScheduleConfig::default();
        let schedule = ScheduleConfig {
            weekday_times: env::var("WEEKDAY_POST_TIMES")
                .ok()
                .map(|raw| parse_time_list(&raw))
                .filter(|times| !times.is_empty())
                .unwrap_or(defaults.weekday_times),
            weekend_times: env::var("WEEKEND_POST_TIMES")
                .ok()
                .map(|raw| parse_time_list(&raw))
                .filter(|times| !times.is_empty())
                .unwrap_or(defaults.weekend_times),
        };

        Ok(Config {
            twitter,
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            xai_api_key: env::var("XAI_API_KEY").ok(),
            news_api_key: env::var("NEWS_API_KEY").ok(),
            history_path: env::var("POST_HISTORY_PATH")
                .unwrap_or_else(|_| "posted_content.json".to_string()),
            schedule,
        })
    }

    pub fn require_bearer_token(&self) -> Result<&String> {
        self.twitter
            .bearer_token
            .as_ref()
            .context("TWITTER_BEARER_TOKEN must be set")
    }

    pub fn require_gemini_api_key(&self) -> Result<&String> {
        self.gemini_api_key
            .as_ref()
            .context("GEMINI_API_KEY must be set")
    }

    pub fn require_xai_api_key(&self) -> Result<&String> {
        self.xai_api_key
            .as_ref()
            .context("XAI_API_KEY must be set")
    }
}

fn parse_time_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_list_parsing() {
        assert_eq!(
            parse_time_list("09:00, 14:00 ,18:00"),
            vec!["09:00", "14:00", "18:00"]
        );
        assert!(parse_time_list("  , ,").is_empty());
    }

    #[test]
    fn default_schedule_has_three_slots_each() {
        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.weekday_times.len(), 3);
        assert_eq!(schedule.weekend_times.len(), 3);
    }

    #[test]
    fn user_context_requires_all_four_keys() {
        let mut twitter = TwitterConfig {
            bearer_token: Some("bearer".into()),
            api_key: Some("k".into()),
            api_secret: Some("s".into()),
            access_token: Some("t".into()),
            access_secret: None,
        };
        assert!(!twitter.has_user_context());
        twitter.access_secret = Some("ts".into());
        assert!(twitter.has_user_context());
    }
}
