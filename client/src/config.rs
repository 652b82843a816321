use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Base URL of the deployed voting service.
pub const DEFAULT_API_URL: &str = "https://votacao-times.onrender.com";

const DEFAULT_SESSION_PATH: &str = "session.json";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub server_url: Option<String>,
    pub session_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: Some(DEFAULT_API_URL.to_string()),
            session_path: Some(DEFAULT_SESSION_PATH.to_string()),
        }
    }
}

impl Config {
    pub fn load_from(config_path: &str) -> std::result::Result<Config, Box<dyn std::error::Error>> {
        if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn session_path(&self) -> &str {
        self.session_path.as_deref().unwrap_or(DEFAULT_SESSION_PATH)
    }
}
