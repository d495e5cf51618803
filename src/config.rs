use crate::error::LitReviewError;
use std::env;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Connection settings for [`LitReviewClient`](crate::LitReviewClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ClientConfig {
    /// Settings for the public Gemini endpoint and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Reads settings from the environment.
    ///
    /// The key comes from `GEMINI_API_KEY`, falling back to `API_KEY`.
    /// `GEMINI_MODEL` and `GEMINI_BASE_URL` override the defaults when set.
    ///
    /// # Errors
    ///
    /// `LitReviewError::MissingApiKey` if no non-blank key is found.
    pub fn from_env() -> Result<Self, LitReviewError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or(LitReviewError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Some(model) = non_blank_var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = non_blank_var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
