//! Runtime configuration read from the environment.

use payloads::APIClient;

pub struct Config {
    /// Base origin of the storefront API, e.g. `https://shop.example.com`.
    /// Empty means same-origin (behind a reverse proxy).
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Config {
            api_url: std::env::var("STOREFRONT_API_URL").unwrap_or_default(),
        }
    }
}

pub fn get_api_client(config: &Config) -> APIClient {
    APIClient {
        address: config.api_url.clone(),
        inner_client: reqwest::Client::new(),
    }
}
