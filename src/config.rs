use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    /// Directory holding the front-end, served for every path no route
    /// claims.
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reviews: ReviewsConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database")]
    pub sqlite: SqliteConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite: default_database(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewsConfig {
    #[serde(default = "default_reviews_file")]
    pub filename: String,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            filename: default_reviews_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YoutubeConfig {
    #[serde(default)]
    pub apikey: Option<String>,
    #[serde(default = "default_youtube_baseurl")]
    pub baseurl: String,
    #[serde(default = "default_youtube_timeout")]
    pub timeout_secs: u64,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            apikey: None,
            baseurl: default_youtube_baseurl(),
            timeout_secs: default_youtube_timeout(),
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_database() -> SqliteConfig {
    SqliteConfig {
        filename: "datasets/movies.db".to_string(),
    }
}

fn default_reviews_file() -> String {
    "backend_data/reviews.json".to_string()
}

fn default_youtube_baseurl() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_youtube_timeout() -> u64 {
    10
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    /// Like `from_file`, but a missing file just means "all defaults".
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    /// `PORT` and `YOUTUBE_API_KEY` take precedence over the file.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var("PORT").ok(),
            std::env::var("YOUTUBE_API_KEY").ok(),
        );
    }

    fn apply_overrides(&mut self, port: Option<String>, apikey: Option<String>) {
        if let Some(port) = port.filter(|p| !p.is_empty()) {
            self.listen.port = port;
        }
        if let Some(key) = apikey.filter(|k| !k.is_empty()) {
            self.youtube.apikey = Some(key);
        }
    }

    pub fn get_database_path(&self) -> String {
        let filename = &self.database.sqlite.filename;
        if filename.starts_with("sqlite:") {
            filename.clone()
        } else {
            format!("sqlite://{}", filename)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("test.yaml", "{}").unwrap();
        assert_eq!(config.listen.port, "3000");
        assert_eq!(config.database.sqlite.filename, "datasets/movies.db");
        assert_eq!(config.reviews.filename, "backend_data/reviews.json");
        assert_eq!(config.youtube.apikey, None);
        assert_eq!(config.get_database_path(), "sqlite://datasets/movies.db");
    }

    #[test]
    fn test_parse() {
        let yaml = r#"
listen:
  address: 127.0.0.1
  port: "8080"
appdir: ./public
database:
  sqlite:
    filename: /data/movies.db
reviews:
  filename: /data/reviews.json
youtube:
  apikey: secret
"#;
        let config = Config::from_yaml("test.yaml", yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "8080");
        assert_eq!(config.appdir.as_deref(), Some("./public"));
        assert_eq!(config.get_database_path(), "sqlite:///data/movies.db");
        assert_eq!(config.reviews.filename, "/data/reviews.json");
        assert_eq!(config.youtube.apikey.as_deref(), Some("secret"));
        assert_eq!(config.youtube.timeout_secs, 10);
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some("10000".to_string()), Some(String::new()));
        assert_eq!(config.listen.port, "10000");
        assert_eq!(config.youtube.apikey, None);

        config.apply_overrides(None, Some("key".to_string()));
        assert_eq!(config.listen.port, "10000");
        assert_eq!(config.youtube.apikey.as_deref(), Some("key"));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            Config::from_yaml("test.yaml", "listen: [1, 2"),
            Err(ConfigError::ParseError(_, _))
        ));
    }
}
