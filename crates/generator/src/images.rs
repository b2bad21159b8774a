use rand::Rng;

/// Royalty-free image URLs keyed by topic category. "default" must stay
/// last so category matching never picks it ahead of a real match.
const IMAGE_LIBRARY: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "https://images.unsplash.com/photo-1518770660439-4636190af475",
            "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5",
            "https://images.unsplash.com/photo-1504384764586-bb4cdc1707b0",
        ],
    ),
    (
        "health",
        &[
            "https://images.unsplash.com/photo-1505576399279-565b52d4ac71",
            "https://images.unsplash.com/photo-1498837167922-ddd27525d352",
            "https://images.unsplash.com/photo-1506126613408-eca07ce68773",
        ],
    ),
    (
        "business",
        &[
            "https://images.unsplash.com/photo-1560472355-536de3962603",
            "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab",
            "https://images.unsplash.com/photo-1507679799987-c73779587ccf",
        ],
    ),
    (
        "nature",
        &[
            "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05",
            "https://images.unsplash.com/photo-1441974231531-c6227db76b6e",
            "https://images.unsplash.com/photo-1472214103451-9374bd1c798e",
        ],
    ),
    (
        "travel",
        &[
            "https://images.unsplash.com/photo-1500835556837-99ac94a94552",
            "https://images.unsplash.com/photo-1476514525535-07fb3b4ae5f1",
            "https://images.unsplash.com/photo-1502602898657-3e91760cbb34",
        ],
    ),
    (
        "food",
        &[
            "https://images.unsplash.com/photo-1504674900247-0877df9cc836",
            "https://images.unsplash.com/photo-1512621776951-a57141f2eefd",
            "https://images.unsplash.com/photo-1476224203421-9ac39bcb3327",
        ],
    ),
    (
        "sports",
        &[
            "https://images.unsplash.com/photo-1461896836934-ffe607ba8211",
            "https://images.unsplash.com/photo-1517649763962-0c623066013b",
            "https://images.unsplash.com/photo-1541534741688-6078c6bfb5c5",
        ],
    ),
    (
        "education",
        &[
            "https://images.unsplash.com/photo-1503676260728-1c00da094a0b",
            "https://images.unsplash.com/photo-1523050854058-8df90110c9f1",
            "https://images.unsplash.com/photo-1509062522246-3755977927d7",
        ],
    ),
    (
        "finance",
        &[
            "https://images.unsplash.com/photo-1565514020179-026b92b4a5b0",
            "https://images.unsplash.com/photo-1579170053380-58a5b2c13ff6",
            "https://images.unsplash.com/photo-1620714223084-8fcacc6dfd8d",
        ],
    ),
    (
        "science",
        &[
            "https://images.unsplash.com/photo-1507668077129-56e32842523b",
            "https://images.unsplash.com/photo-1564325724739-bae0bd08762c",
            "https://images.unsplash.com/photo-1532094349884-543bc11b234d",
        ],
    ),
    (
        "default",
        &[
            "https://images.unsplash.com/photo-1496449903678-68ddcb189a24",
            "https://images.unsplash.com/photo-1522199755839-a2bacb67c546",
            "https://images.unsplash.com/photo-1554774853-d50f9c681ae2",
        ],
    ),
];

/// Picks an image URL for the topic: exact substring match against a
/// category name first, then token-overlap partial match, else default.
pub fn relevant_image_url(topic: &str) -> String {
    let topic_lower = topic.to_lowercase();

    for (category, urls) in IMAGE_LIBRARY {
        if topic_lower.contains(category) {
            return choose(urls);
        }
    }

    let words: Vec<&str> = topic_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    for (category, urls) in IMAGE_LIBRARY {
        if *category == "default" {
            continue;
        }
        if words
            .iter()
            .any(|word| category.contains(word) || word.contains(category))
        {
            return choose(urls);
        }
    }

    let (_, defaults) = IMAGE_LIBRARY[IMAGE_LIBRARY.len() - 1];
    choose(defaults)
}

fn choose(urls: &[&str]) -> String {
    urls[rand::thread_rng().gen_range(0..urls.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls_for(category: &str) -> &'static [&'static str] {
        IMAGE_LIBRARY
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, urls)| *urls)
            .unwrap()
    }

    #[test]
    fn exact_substring_match_wins() {
        let url = relevant_image_url("technology trends 2024");
        assert!(urls_for("technology").contains(&url.as_str()));
    }

    #[test]
    fn partial_token_match_falls_back() {
        // "tech" is a token that "technology" contains
        let url = relevant_image_url("latest tech news");
        assert!(urls_for("technology").contains(&url.as_str()));
    }

    #[test]
    fn unknown_topic_uses_default_category() {
        let url = relevant_image_url("xyzabc123");
        assert!(urls_for("default").contains(&url.as_str()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let url = relevant_image_url("The FINANCE report");
        assert!(urls_for("finance").contains(&url.as_str()));
    }
}
