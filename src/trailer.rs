use std::time::Duration;

use serde_json::Value;
use tracing::{error, info};

use crate::config::YoutubeConfig;

#[derive(Debug, thiserror::Error)]
pub enum TrailerError {
    #[error("Movie name required")]
    MissingName,
    #[error("YouTube API error (status {status})")]
    Upstream { status: u16, details: Value },
    #[error("Video search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Video search returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Looks up a trailer video id through the YouTube data API.
pub struct TrailerSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TrailerSearch {
    pub fn new(config: &YoutubeConfig) -> Result<Self, TrailerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.baseurl.trim_end_matches('/').to_string(),
            api_key: config.apikey.clone().unwrap_or_default(),
        })
    }

    fn search_url(&self, movie_name: &str) -> String {
        let query = format!("{} official trailer", movie_name);
        format!(
            "{}/search?part=snippet&q={}&maxResults=1&type=video&key={}",
            self.base_url,
            urlencoding::encode(&query),
            urlencoding::encode(&self.api_key),
        )
    }

    /// Returns the id of the best matching video, or an empty string when
    /// the search came back without results.
    pub async fn find_trailer(&self, movie_name: Option<&str>) -> Result<String, TrailerError> {
        let movie_name = match movie_name {
            Some(name) if !name.is_empty() && name != "undefined" => name,
            _ => {
                error!("Trailer search without a movie name");
                return Err(TrailerError::MissingName);
            }
        };
        info!("Searching trailer for {:?}", movie_name);

        let response = self.client.get(self.search_url(movie_name)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let details =
                serde_json::from_str::<Value>(&body).unwrap_or_else(|_| Value::String(body));
            error!(
                status = status.as_u16(),
                details = %details,
                "YouTube API rejected request"
            );
            return Err(TrailerError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let data: Value = serde_json::from_str(&body)?;
        let video_id = first_video_id(&data);
        info!("Found trailer video id {:?}", video_id);

        Ok(video_id)
    }
}

fn first_video_id(data: &Value) -> String {
    data["items"][0]["id"]["videoId"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search() -> TrailerSearch {
        TrailerSearch::new(&YoutubeConfig {
            apikey: Some("k&y".to_string()),
            baseurl: "http://127.0.0.1:9/youtube/v3/".to_string(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_search_url() {
        assert_eq!(
            search().search_url("Alien"),
            "http://127.0.0.1:9/youtube/v3/search?part=snippet&q=Alien%20official%20trailer\
             &maxResults=1&type=video&key=k%26y"
        );
    }

    #[test]
    fn test_first_video_id() {
        let data = json!({"items": [{"id": {"kind": "youtube#video", "videoId": "abc123"}}]});
        assert_eq!(first_video_id(&data), "abc123");
        assert_eq!(first_video_id(&json!({"items": []})), "");
        assert_eq!(first_video_id(&json!({})), "");
    }

    #[tokio::test]
    async fn test_missing_name() {
        let search = search();
        assert!(matches!(
            search.find_trailer(None).await,
            Err(TrailerError::MissingName)
        ));
        assert!(matches!(
            search.find_trailer(Some("undefined")).await,
            Err(TrailerError::MissingName)
        ));
    }
}
