//! Turns a [`GenerationResult`] into display-ready views and copy payloads.

use crate::compose::COVER_IMAGE_PLACEHOLDER;
use crate::cover::CoverImage;
use crate::types::{GenerationResult, LongVideoScript, Review, ShortVideoScript, TaskKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Alt text used when the review does not provide one.
pub const DEFAULT_ALT_TEXT: &str = "Book cover";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

/// How review content should be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyFormat {
    /// Markup for a website or blog.
    Html,
    /// Tags stripped, for social media posts.
    PlainText,
}

/// Replaces the cover placeholder in the review HTML.
///
/// With a cover, the first placeholder becomes an inline `<figure>`; otherwise it
/// is removed. Any further placeholders are removed as well.
pub fn render_review_html(review: &Review, cover: Option<&CoverImage>) -> String {
    let html = &review.review_content;
    let html = match cover {
        Some(cover) if html.contains(COVER_IMAGE_PLACEHOLDER) => {
            let alt = match review.alt_text.trim() {
                "" => DEFAULT_ALT_TEXT,
                alt => alt,
            };
            let alt = escape_html(alt);
            let figure = format!(
                "\n<figure class=\"cover-image\">\n  <img src=\"{}\" alt=\"{}\" />\n  <figcaption>{}</figcaption>\n</figure>",
                cover.to_data_uri(),
                alt,
                alt
            );
            html.replacen(COVER_IMAGE_PLACEHOLDER, &figure, 1)
        }
        _ => html.clone(),
    };
    html.replace(COVER_IMAGE_PLACEHOLDER, "")
}

/// Strips markup the way a browser's `textContent` would: tags removed, entities decoded.
pub fn strip_tags(html: &str) -> String {
    let text = TAG_RE.replace_all(html, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Flattens a short video script into one labelled transcript.
pub fn short_video_transcript(script: &ShortVideoScript) -> String {
    let scenes = script
        .scenes
        .iter()
        .map(|s| {
            format!(
                "Scene {}:\n- Visual: {}\n- Script: {}",
                s.scene, s.visual, s.script
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "**Hook:**\n{}\n\n**Scenes:**\n{}\n\n**CTA:**\n{}",
        script.hook, scenes, script.cta
    )
}

/// Flattens a long video script into one labelled transcript.
pub fn long_video_transcript(script: &LongVideoScript) -> String {
    format!(
        "**Title:**\n{}\n\n**Intro:**\n{}\n\n**Body:**\n{}\n\n**Outro:**\n{}",
        script.title, script.intro, script.body, script.outro
    )
}

/// The review with its placeholder resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReview {
    pub html: String,
    pub meta_title: String,
    pub meta_description: String,
    pub alt_text: String,
    pub quotes: Vec<String>,
}

impl RenderedReview {
    pub fn copy(&self, format: CopyFormat) -> String {
        match format {
            CopyFormat::Html => self.html.clone(),
            CopyFormat::PlainText => strip_tags(&self.html),
        }
    }
}

/// A call-to-action link shown under the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    pub label: &'static str,
    pub url: String,
}

/// Everything needed to display one result.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedContent {
    /// Present content types, in priority order.
    pub tabs: Vec<TaskKind>,
    pub review: Option<RenderedReview>,
    pub short_video: Option<ShortVideoScript>,
    pub long_video: Option<LongVideoScript>,
    pub links: Vec<ActionLink>,
}

impl RenderedContent {
    /// The text copied for `kind`. Scripts ignore `format` and always copy their transcript.
    pub fn copy(&self, kind: TaskKind, format: CopyFormat) -> Option<String> {
        match kind {
            TaskKind::Review => self.review.as_ref().map(|r| r.copy(format)),
            TaskKind::ShortVideo => self.short_video.as_ref().map(short_video_transcript),
            TaskKind::LongVideo => self.long_video.as_ref().map(long_video_transcript),
        }
    }
}

pub fn render(result: &GenerationResult, cover: Option<&CoverImage>) -> RenderedContent {
    let review = result.review.as_ref().map(|review| RenderedReview {
        html: render_review_html(review, cover),
        meta_title: review.meta_title.clone(),
        meta_description: review.meta_description.clone(),
        alt_text: review.alt_text.clone(),
        quotes: review.quotes.clone(),
    });

    let mut links = Vec::new();
    if !result.download_link.trim().is_empty() {
        links.push(ActionLink {
            label: "Read / download",
            url: result.download_link.clone(),
        });
    }
    if let Some(url) = result.purchase_link.as_ref().filter(|u| !u.trim().is_empty()) {
        links.push(ActionLink {
            label: "Buy",
            url: url.clone(),
        });
    }

    RenderedContent {
        tabs: result.present_kinds(),
        review,
        short_video: result.short_video_script.clone(),
        long_video: result.long_video_script.clone(),
        links,
    }
}

/// Tracks which content tab is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabState {
    active: Option<TaskKind>,
}

impl TabState {
    pub fn active(&self) -> Option<TaskKind> {
        self.active
    }

    /// Keeps the active tab if it is still present, otherwise falls back to the
    /// first present kind. Nothing changes when `present` is empty.
    pub fn sync(&mut self, present: &[TaskKind]) {
        let Some(first) = present.first() else {
            return;
        };
        if !self.active.is_some_and(|kind| present.contains(&kind)) {
            self.active = Some(*first);
        }
    }

    /// Activates `kind` if it is present. Returns whether the tab changed.
    pub fn select(&mut self, kind: TaskKind, present: &[TaskKind]) -> bool {
        if present.contains(&kind) && self.active != Some(kind) {
            self.active = Some(kind);
            true
        } else {
            false
        }
    }
}
