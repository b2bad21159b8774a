use common::PostCategory;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementStats {
    pub avg_likes: f32,
    pub avg_shares: f32,
    pub avg_comments: f32,
}

/// Mock per-category engagement numbers. A real implementation would pull
/// metrics from the platform API.
pub fn analyze_post_performance() -> HashMap<PostCategory, EngagementStats> {
    info!("Analyzing post performance (mock implementation)");

    let table = [
        (PostCategory::Informative, (15.0, 5.0, 3.0)),
        (PostCategory::Question, (8.0, 2.0, 7.0)),
        (PostCategory::Statistic, (12.0, 6.0, 2.0)),
        (PostCategory::Tip, (18.0, 8.0, 4.0)),
        (PostCategory::News, (10.0, 7.0, 3.0)),
        (PostCategory::Opinion, (9.0, 3.0, 6.0)),
        (PostCategory::Resource, (13.0, 9.0, 2.0)),
    ];

    table
        .into_iter()
        .map(|(category, (avg_likes, avg_shares, avg_comments))| {
            (
                category,
                EngagementStats {
                    avg_likes,
                    avg_shares,
                    avg_comments,
                },
            )
        })
        .collect()
}

/// Logs the performance table, one line per category.
pub fn report_post_performance() {
    for (category, stats) in analyze_post_performance() {
        info!(
            "{}: avg likes {:.1}, shares {:.1}, comments {:.1}",
            category, stats.avg_likes, stats.avg_shares, stats.avg_comments
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_stats() {
        let report = analyze_post_performance();
        assert_eq!(report.len(), PostCategory::ALL.len());
        for category in PostCategory::ALL {
            assert!(report.contains_key(&category));
        }
    }
}
