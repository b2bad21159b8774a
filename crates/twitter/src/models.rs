use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Option<Vec<Tweet>>,
}

#[derive(Debug, Deserialize)]
pub struct Trend {
    pub name: String,
}

/// One element of the v1.1 trends/place response array.
#[derive(Debug, Deserialize)]
pub struct TrendLocation {
    pub trends: Vec<Trend>,
}

#[derive(Debug, Deserialize)]
pub struct MediaUploadResponse {
    pub media_id_string: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTweetResponse {
    pub data: CreatedTweet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub data: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trends_response_deserializes() {
        let raw = r##"[{"trends":[{"name":"#rustlang"},{"name":"open source"}],"as_of":"now"}]"##;
        let locations: Vec<TrendLocation> = serde_json::from_str(raw).unwrap();
        assert_eq!(locations[0].trends.len(), 2);
        assert_eq!(locations[0].trends[0].name, "#rustlang");
    }

    #[test]
    fn search_response_tolerates_missing_data() {
        let resp: SearchResponse = serde_json::from_str(r#"{"meta":{"result_count":0}}"#).unwrap();
        assert!(resp.data.is_none());
    }
}
