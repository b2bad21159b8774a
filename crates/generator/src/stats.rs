use rand::Rng;

/// Canned statistics by keyword, used to seed statistic posts when no live
/// data source is available.
const STATS_LIBRARY: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "90% of the world's data has been created in the last two years",
            "There are over 5 billion smartphone users worldwide",
            "The average person touches their phone 2,617 times a day",
        ],
    ),
    (
        "health",
        &[
            "Regular exercise can reduce the risk of major illnesses by up to 50%",
            "Drinking water can increase energy levels by up to 30%",
            "Laughing 100 times is equivalent to 15 minutes of exercise on a stationary bike",
        ],
    ),
    (
        "business",
        &[
            "65% of entrepreneurs start their businesses at home",
            "It takes an average of 3 years for a startup to become profitable",
            "42% of startups fail because there's no market need for their product",
        ],
    ),
    (
        "climate",
        &[
            "The last decade was the warmest on record",
            "Sea levels have risen by about 8-9 inches since 1880",
            "The Earth's average temperature has increased by 1.1\u{b0}C since the pre-industrial era",
        ],
    ),
    (
        "social media",
        &[
            "Users spend an average of 2.5 hours per day on social platforms",
            "There are over 4.2 billion active social media users globally",
            "72% of the public uses some type of social media",
        ],
    ),
    (
        "ai",
        &[
            "The AI market is projected to reach $190 billion by 2025",
            "AI adoption in businesses has grown by 270% in the past four years",
            "70% of customer interactions involve AI like chatbots or virtual assistants",
        ],
    ),
];

/// Finds a statistic whose keyword overlaps the topic, either as a
/// substring of the topic or sharing a word with it. None when nothing fits.
pub fn statistic_for(topic: &str) -> Option<String> {
    let topic_lower = topic.to_lowercase();

    for (keyword, stats) in STATS_LIBRARY {
        let word_overlap = topic_lower.split_whitespace().any(|word| keyword.contains(word));
        if topic_lower.contains(keyword) || word_overlap {
            let pick = stats[rand::thread_rng().gen_range(0..stats.len())];
            return Some(pick.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_finds_a_statistic() {
        let stat = statistic_for("AI ethics").unwrap();
        assert!(!stat.is_empty());
    }

    #[test]
    fn keyword_inside_topic_matches() {
        assert!(statistic_for("the future of technology at work").is_some());
    }

    #[test]
    fn unrelated_topic_yields_none() {
        assert!(statistic_for("vintage motorcycles").is_none());
    }
}
