/// Problems with user input, caught before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} is not a valid absolute URL: {value}")]
    InvalidLink { field: &'static str, value: String },
    #[error("Unsupported summary file `{name}`. Please choose a .txt file.")]
    UnsupportedSummaryFile { name: String },
    #[error("Please upload a summary file (.txt).")]
    MissingSummary,
    #[error("Please select at least one content type to generate.")]
    NoTaskSelected,
    #[error("Unsupported cover image type `{mime_type}`")]
    UnsupportedCoverImage { mime_type: String },
}

#[derive(Debug, thiserror::Error)]
pub enum LitReviewError {
    #[error("API key is missing. Please provide it or set the GEMINI_API_KEY environment variable.")]
    MissingApiKey,
    #[error("API key contains characters that cannot be sent in a request header")]
    InvalidApiKey,
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Failed to parse API response: {0}")]
    ResponseParseFailed(#[from] serde_json::Error),
    #[error("API request failed: {message}")]
    ApiError { message: String },
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid cover image: {0}")]
    InvalidCoverImage(String),
    /// Uniform wrapper for every failure of a generation round-trip.
    #[error("Gemini API error: {message}")]
    GenerationFailed { message: String },
}
