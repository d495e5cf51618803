use crate::cover::CoverImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One of the selectable content types.
///
/// The declaration order is the priority order used everywhere: prompt blocks,
/// schema properties and result tabs all follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// A long-form SEO review for a blog or website.
    Review,
    /// A TikTok/Shorts script under 60 seconds.
    ShortVideo,
    /// A 10-15 minute YouTube script.
    LongVideo,
}

impl TaskKind {
    /// Every kind, in priority order.
    pub const ALL: [TaskKind; 3] = [TaskKind::Review, TaskKind::ShortVideo, TaskKind::LongVideo];

    /// The property name this kind occupies in the response schema and result JSON.
    pub fn schema_key(self) -> &'static str {
        match self {
            TaskKind::Review => "review",
            TaskKind::ShortVideo => "shortVideoScript",
            TaskKind::LongVideo => "longVideoScript",
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Review => "Review",
            TaskKind::ShortVideo => "Short Video",
            TaskKind::LongVideo => "Long Video",
        }
    }
}

/// Which content types the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSelection {
    pub review: bool,
    pub short_video: bool,
    pub long_video: bool,
}

impl Default for TaskSelection {
    fn default() -> Self {
        Self {
            review: true,
            short_video: false,
            long_video: false,
        }
    }
}

impl TaskSelection {
    /// A selection with every flag cleared.
    pub fn none() -> Self {
        Self {
            review: false,
            short_video: false,
            long_video: false,
        }
    }

    /// A selection with every flag set.
    pub fn all() -> Self {
        Self {
            review: true,
            short_video: true,
            long_video: true,
        }
    }

    pub fn is_selected(&self, kind: TaskKind) -> bool {
        match kind {
            TaskKind::Review => self.review,
            TaskKind::ShortVideo => self.short_video,
            TaskKind::LongVideo => self.long_video,
        }
    }

    pub fn set(&mut self, kind: TaskKind, selected: bool) {
        match kind {
            TaskKind::Review => self.review = selected,
            TaskKind::ShortVideo => self.short_video = selected,
            TaskKind::LongVideo => self.long_video = selected,
        }
    }

    /// Returns a copy with `kind` set to `selected`.
    pub fn with(mut self, kind: TaskKind, selected: bool) -> Self {
        self.set(kind, selected);
        self
    }

    /// Returns `true` if at least one content type is requested.
    pub fn any(&self) -> bool {
        self.review || self.short_video || self.long_video
    }

    /// The selected kinds, in priority order.
    pub fn selected(&self) -> impl Iterator<Item = TaskKind> + '_ {
        TaskKind::ALL.into_iter().filter(|kind| self.is_selected(*kind))
    }
}

/// Validated description of the work being reviewed.
///
/// Built by [`WorkForm::validate`](crate::WorkForm::validate), which enforces that
/// the required fields and the summary are non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkMetadata {
    pub title: String,
    /// Author or artist.
    pub author: String,
    pub genre: String,
    /// Primary SEO keyword.
    pub main_keyword: String,
    /// Where the work can be read or downloaded.
    pub ebook_link: String,
    /// Optional affiliate/purchase link.
    pub affiliate_link: Option<String>,
    /// Plain-text summary or content of the work.
    pub summary: String,
    pub cover_image: Option<CoverImage>,
    /// Human-language name such as "English" or "Vietnamese".
    pub output_language: String,
}

/// The web review payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub quotes: Vec<String>,
    /// HTML article body, containing the cover placeholder token once.
    pub review_content: String,
}

/// A single scene of a short video script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub scene: u32,
    /// What appears on screen.
    pub visual: String,
    /// Spoken line or on-screen text.
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortVideoScript {
    pub hook: String,
    pub scenes: Vec<Scene>,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongVideoScript {
    pub title: String,
    pub intro: String,
    pub body: String,
    pub outro: String,
}

/// Typed content returned by one generation round-trip.
///
/// Each payload is present only if its task was requested. The two links are
/// copied from the submitted [`WorkMetadata`], never from the model's reply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_video_script: Option<ShortVideoScript>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_video_script: Option<LongVideoScript>,
    /// Never read from the model's reply; whatever it sends under this key is ignored.
    #[serde(skip_deserializing, default)]
    pub download_link: String,
    #[serde(skip_deserializing, default)]
    pub purchase_link: Option<String>,
}

impl GenerationResult {
    pub fn has(&self, kind: TaskKind) -> bool {
        match kind {
            TaskKind::Review => self.review.is_some(),
            TaskKind::ShortVideo => self.short_video_script.is_some(),
            TaskKind::LongVideo => self.long_video_script.is_some(),
        }
    }

    /// The kinds that carry a payload, in priority order.
    pub fn present_kinds(&self) -> Vec<TaskKind> {
        TaskKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    /// Drops payloads for kinds that were not requested.
    pub(crate) fn retain_selected(&mut self, tasks: &TaskSelection) {
        if !tasks.review {
            self.review = None;
        }
        if !tasks.short_video {
            self.short_video_script = None;
        }
        if !tasks.long_video {
            self.long_video_script = None;
        }
    }
}

/// A request ready to be sent: composed prompt, response schema and optional image.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
    pub tasks: TaskSelection,
    pub cover_image: Option<CoverImage>,
}

impl GenerationRequest {
    pub(crate) fn to_body(&self) -> GenerateContentRequest<'_> {
        let mut parts = vec![Part::Text {
            text: self.prompt.clone(),
        }];
        if let Some(cover) = &self.cover_image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: cover.mime_type().to_string(),
                    data: cover.data().to_string(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content { role: None, parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &self.schema,
            },
        }
    }
}

/// (Internal) Request body for the `generateContent` endpoint.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    pub(crate) contents: Vec<Content>,
    pub(crate) generation_config: GenerationConfig<'a>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig<'a> {
    pub(crate) response_mime_type: &'static str,
    pub(crate) response_schema: &'a Value,
}

/// (Internal) Gemini content container used in both requests and responses.
#[derive(Serialize, Deserialize, Debug, Default)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub(crate) role: Option<String>,
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

/// (Internal) Text or inline media part. Variant order matters for untagged decoding.
#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(Value),
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub(crate) mime_type: String,
    pub(crate) data: String,
}

/// (Internal) Top-level `generateContent` response envelope.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    #[serde(default)]
    pub(crate) prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub(crate) content: Content,
    #[serde(default)]
    pub(crate) finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub(crate) block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub(crate) fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// (Internal) Error body returned by Google APIs on non-success statuses.
#[derive(Deserialize, Debug)]
pub(crate) struct ApiErrorBody {
    pub(crate) error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub(crate) message: String,
}
