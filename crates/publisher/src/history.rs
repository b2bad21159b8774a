use common::{AgentResult, GeneratedContent, Platform, PostCategory};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{info, warn};

/// One published post. Append-only; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub platform: Platform,
    pub text: String,
    pub image_url: Option<String>,
    pub category: PostCategory,
    pub article_url: Option<String>,
    #[serde(with = "time::serde::iso8601")]
    pub posted_at: OffsetDateTime,
}

impl PostRecord {
    pub fn new(platform: Platform, content: &GeneratedContent, text: String) -> Self {
        Self {
            platform,
            text,
            image_url: content.image_url.clone(),
            category: content.category,
            article_url: content.article_url.clone(),
            posted_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Post history persisted as a single JSON array, rewritten in full after
/// every append.
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<PostRecord>,
}

impl HistoryStore {
    /// Loads existing history. A missing or unreadable file is an empty
    /// history, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<PostRecord>>(&raw) {
                Ok(records) => {
                    info!("Loaded {} previous posts from {}", records.len(), path.display());
                    records
                }
                Err(e) => {
                    warn!("Post history at {} is corrupt ({}); starting empty", path.display(), e);
                    Vec::new()
                }
            },
            Err(_) => {
                info!("No post history at {}; starting empty", path.display());
                Vec::new()
            }
        };

        Self { path, records }
    }

    pub fn append(&mut self, record: PostRecord) {
        self.records.push(record);
    }

    pub fn save(&self) -> AgentResult<()> {
        let raw = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, raw)?;
        info!("Saved {} posts to {}", self.records.len(), self.path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[PostRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(text: &str) -> PostRecord {
        PostRecord {
            platform: Platform::Twitter,
            text: text.to_string(),
            image_url: None,
            category: PostCategory::Tip,
            article_url: None,
            posted_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::load(dir.path().join("absent.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posted.json");
        fs::write(&path, "{not json").unwrap();
        let store = HistoryStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn append_save_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posted.json");

        let mut store = HistoryStore::load(&path);
        store.append(sample_record("first"));
        store.append(sample_record("second"));
        store.save().unwrap();

        let reloaded = HistoryStore::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.recent(1)[0].text, "second");
    }

    #[test]
    fn recent_caps_at_available_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::load(dir.path().join("posted.json"));
        store.append(sample_record("only"));
        assert_eq!(store.recent(5).len(), 1);
    }
}
