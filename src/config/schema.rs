use crate::errors::HatchbotError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub api: ApiConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    /// Base address of the portal backend, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatConfig {
    /// Run the onboarding flow against the built-in scripted prompts instead
    /// of the backend. Useful for demos and offline work.
    pub scripted: bool,
}

impl Config {
    /// Effective API base url: `HATCHBOT_API_URL` overrides the config file.
    pub fn api_base_url(&self) -> String {
        std::env::var("HATCHBOT_API_URL").unwrap_or_else(|_| self.api.base_url.clone())
    }

    pub fn validate(&self) -> Result<(), HatchbotError> {
        let url = self.api_base_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HatchbotError::Config(format!(
                "api.baseUrl must be an http(s) address, got '{}'",
                url
            )));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(HatchbotError::Config(
                "api.requestTimeoutSecs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
