#![allow(dead_code)]

use litreview::{CoverImage, LitReviewClient, TaskSelection, WorkForm, WorkMetadata};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

pub fn client_for(server: &MockServer) -> LitReviewClient {
    LitReviewClient::new_with_url("test_api_key".to_string(), &server.uri()).unwrap()
}

pub fn filled_form(title: &str) -> WorkForm {
    let mut form = WorkForm::new();
    form.title = title.to_string();
    form.author = "Jane Doe".to_string();
    form.genre = "Fantasy".to_string();
    form.main_keyword = format!("{} review", title.to_lowercase());
    form.ebook_link = "https://example.com/read".to_string();
    form.affiliate_link = "https://shop.example.com/buy".to_string();
    form.output_language = "English".to_string();
    form.set_summary("summary.txt", "short text").unwrap();
    form
}

pub fn metadata(title: &str) -> WorkMetadata {
    filled_form(title).validate(&TaskSelection::all()).unwrap()
}

pub fn tiny_cover() -> CoverImage {
    CoverImage::from_bytes(&[0x89, b'P', b'N', b'G', 1, 2, 3], "image/png").unwrap()
}

pub fn review_json() -> Value {
    json!({
        "metaTitle": "Review Moon",
        "metaDescription": "A review of Moon.",
        "altText": "Cover of Moon",
        "quotes": ["The moon is a mirror."],
        "reviewContent": "<h1>Review</h1><p>Intro</p>[COVER_IMAGE_PLACEHOLDER]<h2>Highlights</h2><p>Good &amp; bright.</p>"
    })
}

pub fn short_video_json() -> Value {
    json!({
        "hook": "What if the moon talked?",
        "scenes": [
            { "scene": 1, "visual": "Night sky", "script": "Look up." },
            { "scene": 2, "visual": "Open book", "script": "Read this." },
            { "scene": 3, "visual": "Close-up", "script": "Now." }
        ],
        "cta": "Read it tonight!"
    })
}

pub fn long_video_json() -> Value {
    json!({
        "title": "Moon, explained",
        "intro": "Welcome.",
        "body": "The story.",
        "outro": "Subscribe."
    })
}

/// Wraps a reply document the way `generateContent` returns it.
pub fn gemini_reply(document: &Value) -> Value {
    gemini_text_reply(&document.to_string())
}

pub fn gemini_text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 20 }
    })
}

pub async fn mount_reply(server: &MockServer, document: &Value) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(document)))
        .mount(server)
        .await;
}
