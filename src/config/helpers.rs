use serde::{Deserialize, Deserializer, de};
use url::Url;

/// Custom deserializer for a vector of URLs.
pub fn deserialize_urls<'de, D>(deserializer: D) -> Result<Vec<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Vec::<String>::deserialize(deserializer)?;
    s.into_iter()
        .map(|url_str| Url::parse(url_str.trim()).map_err(de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestUrls {
        #[serde(deserialize_with = "deserialize_urls")]
        urls: Vec<Url>,
    }

    #[test]
    fn test_deserialize_urls() {
        let json = r#"{"urls": ["http://example.com/1", "https://example.com/2"]}"#;
        let expected = TestUrls {
            urls: vec![
                Url::parse("http://example.com/1").unwrap(),
                Url::parse("https://example.com/2").unwrap(),
            ],
        };
        let actual: TestUrls = serde_json::from_str(json).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_deserialize_urls_trims_whitespace() {
        let json = r#"{"urls": [" http://localhost:8545 "]}"#;
        let actual: TestUrls = serde_json::from_str(json).unwrap();
        assert_eq!(actual.urls[0].as_str(), "http://localhost:8545/");
    }

    #[test]
    fn test_deserialize_invalid_url() {
        let json = r#"{"urls": ["not a valid url"]}"#;
        let result: Result<TestUrls, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
