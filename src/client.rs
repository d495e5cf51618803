use crate::compose::compose;
use crate::config::ClientConfig;
use crate::error::{LitReviewError, ValidationError};
use crate::types::{
    ApiErrorBody, GenerateContentResponse, GenerationRequest, GenerationResult, TaskKind,
    TaskSelection, WorkMetadata,
};
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The main client for generating review content through the Gemini API.
///
/// It holds the shared `reqwest::Client`, the base URL and the model name.
/// It is cheap to clone and safe to share across tasks.
#[derive(Clone, Debug)]
pub struct LitReviewClient {
    client: reqwest::Client,
    base_url: Url,
    model: String,
}

impl LitReviewClient {
    /// Creates a new `LitReviewClient` for the public Gemini endpoint.
    ///
    /// If `api_key` is `None`, the key is read from the environment
    /// (see [`ClientConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// - `LitReviewError::MissingApiKey` if no key is provided either way.
    /// - `LitReviewError::RequestFailed` if the internal HTTP client fails to build.
    pub fn new(api_key: Option<String>) -> Result<Self, LitReviewError> {
        let config = match api_key {
            Some(key) => ClientConfig::new(key),
            None => ClientConfig::from_env()?,
        };
        Self::from_config(config)
    }

    /// Creates a new `LitReviewClient` with a custom base URL.
    ///
    /// This is useful for testing or for routing through a proxy.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The API key for authentication.
    /// * `base_url` - The base URL for the API (e.g., for a mock server).
    pub fn new_with_url(api_key: String, base_url: &str) -> Result<Self, LitReviewError> {
        Self::from_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// - `LitReviewError::MissingApiKey` if the key is blank.
    /// - `LitReviewError::InvalidApiKey` if the key cannot be sent as a header.
    /// - `LitReviewError::UrlParseFailed` if `base_url` is invalid.
    pub fn from_config(config: ClientConfig) -> Result<Self, LitReviewError> {
        let key = config.api_key.trim();
        if key.is_empty() {
            return Err(LitReviewError::MissingApiKey);
        }
        let mut key_value =
            HeaderValue::from_str(key).map_err(|_| LitReviewError::InvalidApiKey)?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        // `Url::join` drops the last path segment unless the base ends with a slash.
        let mut base_url = config.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;

        Ok(Self {
            client,
            base_url,
            model: config.model,
        })
    }

    /// Returns a client that talks to `model` instead.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Composes the prompt and schema for a submission and attaches the cover image.
    ///
    /// This performs no I/O; [`generate`](Self::generate) sends what it returns.
    pub fn build_request(&self, metadata: &WorkMetadata, tasks: &TaskSelection) -> GenerationRequest {
        let composed = compose(metadata, tasks);
        GenerationRequest {
            prompt: composed.prompt,
            schema: composed.schema,
            tasks: *tasks,
            cover_image: metadata.cover_image.clone(),
        }
    }

    /// Generates every requested content type in a single round-trip.
    ///
    /// The reply is constrained to the composed schema and parsed as JSON. The
    /// download and purchase links are then overwritten from `metadata`, and
    /// payloads for unrequested tasks are dropped.
    ///
    /// # Errors
    ///
    /// - `LitReviewError::Validation` if no task is selected. Nothing is sent.
    /// - `LitReviewError::GenerationFailed` for any transport, service or parse
    ///   failure, carrying the underlying message.
    pub async fn generate(
        &self,
        metadata: &WorkMetadata,
        tasks: &TaskSelection,
    ) -> Result<GenerationResult, LitReviewError> {
        if !tasks.any() {
            return Err(ValidationError::NoTaskSelected.into());
        }

        let request = self.build_request(metadata, tasks);
        let mut result = self.send(&request).await.map_err(|err| {
            tracing::error!(error = %err, "generation request failed");
            LitReviewError::GenerationFailed {
                message: err.to_string(),
            }
        })?;

        result.retain_selected(tasks);
        result.download_link = metadata.ebook_link.clone();
        result.purchase_link = metadata.affiliate_link.clone();
        Ok(result)
    }

    /// Sends a prepared request and parses the reply.
    ///
    /// Unlike [`generate`](Self::generate), errors are returned as-is. The links
    /// in the reply are ignored and left empty.
    pub async fn send(&self, request: &GenerationRequest) -> Result<GenerationResult, LitReviewError> {
        let url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))?;
        let body = request.to_body();
        let tasks: Vec<TaskKind> = request.tasks.selected().collect();

        tracing::info!(
            model = %self.model,
            tasks = ?tasks,
            with_cover = request.cover_image.is_some(),
            "sending generation request"
        );
        tracing::debug!(prompt_chars = request.prompt.len(), "request prompt composed");

        let response = self.client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let raw = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<ApiErrorBody>(&raw).ok();
            let message = match parsed {
                Some(body) if !body.error.message.is_empty() => body.error.message,
                _ if raw.trim().is_empty() => format!("status {}", status),
                _ => raw,
            };
            return Err(LitReviewError::ApiError { message });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        let text = envelope.first_text().ok_or_else(|| LitReviewError::ApiError {
            message: empty_reply_message(&envelope),
        })?;
        tracing::debug!(reply_chars = text.len(), "received generation reply");

        let result: GenerationResult = serde_json::from_str(text.trim())?;
        Ok(result)
    }
}

fn empty_reply_message(envelope: &GenerateContentResponse) -> String {
    if let Some(reason) = envelope
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return format!("the prompt was blocked ({})", reason);
    }
    match envelope
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        Some(reason) => format!("the model returned no text (finish reason: {})", reason),
        None => "the model returned no text".to_string(),
    }
}
