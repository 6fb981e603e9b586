use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database file holding the `posts` and `students` tables
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Ordered post list produced by the offline similarity job
    #[serde(default = "default_posts_path")]
    pub posts_path: String,

    /// Square similarity matrix sized to the post list
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode raises the default log level
    #[serde(default)]
    pub debug: bool,

    /// Category used when a recommendation request names none
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Maximum number of recommended posts per request
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

fn default_database_path() -> String {
    "Sqlite3.db".to_string()
}

fn default_posts_path() -> String {
    "postList.json".to_string()
}

fn default_similarity_path() -> String {
    "similarity.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_category() -> String {
    "Biology".to_string()
}

fn default_recommendation_limit() -> usize {
    crate::services::recommendations::DEFAULT_LIMIT
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "peerpost_api=debug,tower_http=debug"
        } else {
            "peerpost_api=info,tower_http=info"
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.database_path, "Sqlite3.db");
        assert_eq!(config.port, 5000);
        assert_eq!(config.default_category, "Biology");
        assert_eq!(config.recommendation_limit, 3);
        assert!(!config.debug);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("DEBUG".to_string(), "true".to_string()),
            ("DEFAULT_CATEGORY".to_string(), "Physics".to_string()),
            ("RECOMMENDATION_LIMIT".to_string(), "5".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert_eq!(config.default_category, "Physics");
        assert_eq!(config.recommendation_limit, 5);
        assert_eq!(config.default_log_filter(), "peerpost_api=debug,tower_http=debug");
    }
}
