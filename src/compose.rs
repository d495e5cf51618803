//! Builds the instruction prompt and the matching response schema.
//!
//! Each content type is described by a [`TaskBlueprint`] holding its prompt block
//! and schema fragment. The blueprints are folded in priority order, so a given
//! [`TaskSelection`] always produces the same prompt and schema.

use crate::types::{TaskKind, TaskSelection, WorkMetadata};
use serde_json::{json, Map, Value};

/// Marks where the cover image goes in the generated review HTML.
pub const COVER_IMAGE_PLACEHOLDER: &str = "[COVER_IMAGE_PLACEHOLDER]";

/// The composed prompt text and the JSON schema the reply must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub schema: Value,
}

impl ComposedPrompt {
    /// Property names the schema requires, in order.
    pub fn required_keys(&self) -> Vec<&str> {
        self.schema["required"]
            .as_array()
            .map(|keys| keys.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// `true` when no task contributed to the schema.
    pub fn is_empty(&self) -> bool {
        self.required_keys().is_empty()
    }
}

/// Prompt block and schema fragment for one content type.
pub struct TaskBlueprint {
    pub kind: TaskKind,
    instructions: fn(&WorkMetadata) -> String,
    schema: fn() -> Value,
}

impl TaskBlueprint {
    pub fn instructions(&self, metadata: &WorkMetadata) -> String {
        (self.instructions)(metadata)
    }

    pub fn schema(&self) -> Value {
        (self.schema)()
    }
}

/// Registry of every content type, in priority order.
pub static BLUEPRINTS: [TaskBlueprint; 3] = [
    TaskBlueprint {
        kind: TaskKind::Review,
        instructions: review_instructions,
        schema: review_schema,
    },
    TaskBlueprint {
        kind: TaskKind::ShortVideo,
        instructions: short_video_instructions,
        schema: short_video_schema,
    },
    TaskBlueprint {
        kind: TaskKind::LongVideo,
        instructions: long_video_instructions,
        schema: long_video_schema,
    },
];

/// Looks up the blueprint for `kind`.
pub fn blueprint(kind: TaskKind) -> &'static TaskBlueprint {
    match kind {
        TaskKind::Review => &BLUEPRINTS[0],
        TaskKind::ShortVideo => &BLUEPRINTS[1],
        TaskKind::LongVideo => &BLUEPRINTS[2],
    }
}

/// Composes the prompt and schema for `tasks`.
///
/// Callers must check that at least one task is selected. With nothing selected
/// the result has an empty schema (see [`ComposedPrompt::is_empty`]) and a warning
/// is logged.
pub fn compose(metadata: &WorkMetadata, tasks: &TaskSelection) -> ComposedPrompt {
    let mut prompt = preamble(metadata);
    let mut properties = Map::new();
    let mut required = Vec::new();

    // Blocks keep their registry number, so a kind is labelled the same in every selection.
    for (index, blueprint) in BLUEPRINTS
        .iter()
        .enumerate()
        .filter(|(_, b)| tasks.is_selected(b.kind))
    {
        prompt.push_str(&format!(
            "\n{}. {}",
            index + 1,
            blueprint.instructions(metadata)
        ));
        let key = blueprint.kind.schema_key();
        properties.insert(key.to_string(), blueprint.schema());
        required.push(Value::from(key));
    }

    if required.is_empty() {
        tracing::warn!("composing a prompt with no content type selected");
    }

    prompt.push_str(
        "\n**Output:** Return the result as a single JSON object that follows the provided schema.",
    );

    ComposedPrompt {
        prompt,
        schema: json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        }),
    }
}

fn preamble(metadata: &WorkMetadata) -> String {
    format!(
        "You are a multi-platform content creator, an SEO expert and a professional reviewer of \
books, comics (comics, manga) and graphic novels. Create the content pieces below from the \
information about the work.
**Output language:** Write all content in {language}.

**About the work:**
- Title: {title}
- Author/Artist: {author}
- Genre: {genre}
- Main keyword: {keyword}

**Content/Summary of the work:**
{summary}

**CONTENT TO CREATE:**
",
        language = metadata.output_language,
        title = metadata.title,
        author = metadata.author,
        genre = metadata.genre,
        keyword = metadata.main_keyword,
        summary = metadata.summary,
    )
}

fn review_instructions(metadata: &WorkMetadata) -> String {
    format!(
        "**REVIEW ARTICLE (BLOG/WEBSITE):**
    - **Requirement:** Write a highly engaging, SEO-friendly review of 900-1200 words, formatted as HTML. \
If the work is a comic, also comment on the artwork, the line art and the panel layout.
    - **Structure:**
        - **Main heading (<h1>):** Catchy and striking. Example: \"Review '{title}': A Work You Cannot Miss\".
        - **Cover image placeholder:** Right after the first introductory section, insert exactly the string `{placeholder}`. It must appear exactly once.
        - **Section headings (<h2>):** Use <h2> tags with an emoji for these sections: 📖 Introduction, ✨ Highlights, 🎯 Who is this work for?, ⭐ Detailed review, 💬 Closing words.
    - **Alt text:** Write alt text for the cover following the pattern \"Cover of {title}\".
    - **Quotes:** Extract the 2-3 best lines into <blockquote> tags.
",
        title = metadata.title,
        placeholder = COVER_IMAGE_PLACEHOLDER,
    )
}

fn short_video_instructions(_metadata: &WorkMetadata) -> String {
    "**SHORT VIDEO SCRIPT (TIKTOK/SHORTS - under 60 seconds):**
    - **Requirement:** Write a short, fast-paced, gripping video script.
    - **Structure:**
        - **Hook (first 3s):** One shocking or intriguing opening line.
        - **Scenes (3-5 scenes):** Each scene gives (1) a visual suggestion and (2) the spoken line or on-screen text. Focus on the 1-2 most valuable ideas of the work.
        - **CTA:** A strong call to action (e.g. \"Read it now and change the way you think!\" or \"Comment the idea you liked most!\").
"
    .to_string()
}

fn long_video_instructions(_metadata: &WorkMetadata) -> String {
    "**LONG VIDEO SCRIPT (YOUTUBE - 10-15 minutes):**
    - **Requirement:** Write a detailed script in an inspiring storytelling voice.
    - **Structure:**
        - **Title:** An attractive, SEO-friendly video title.
        - **Intro:** Introduce the work, raise the problem and promise what the work delivers.
        - **Body:** Summarize and analyse the chapters or main ideas in a logical, easy-to-follow way.
        - **Outro:** Recap the core value, give advice and ask viewers to like, share, subscribe and read the work.
"
    .to_string()
}

fn string_field(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "metaTitle": string_field("SEO meta title (at most 60 characters) containing the main keyword."),
            "metaDescription": string_field("Compelling meta description (120-155 characters) containing the main keyword."),
            "altText": string_field("Alt text for the cover image, following the pattern \"Cover of [title]\"."),
            "quotes": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "The 2-3 best quotes from the work."
            },
            "reviewContent": string_field(
                "Complete review (about 900-1200 words) formatted as HTML with semantic h1, h2, h3, ul, li, p, \
strong, em and blockquote tags. Sections: opening, introduction/summary, highlights (plot, characters and art \
for comics), detailed review, intended audience and conclusion."
            ),
        },
        "required": ["metaTitle", "metaDescription", "altText", "quotes", "reviewContent"]
    })
}

fn short_video_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hook": string_field("A one-sentence hook that grabs attention in the first 3 seconds."),
            "scenes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "scene": { "type": "INTEGER", "description": "Scene number." },
                        "visual": string_field("Short description of the image or footage for this scene."),
                        "script": string_field("Spoken line or on-screen text for this scene.")
                    },
                    "required": ["scene", "visual", "script"]
                },
                "minItems": 3,
                "maxItems": 5,
                "description": "Detailed script of 3-5 scenes."
            },
            "cta": string_field("A short, strong call to action at the end of the video.")
        },
        "required": ["hook", "scenes", "cta"]
    })
}

fn long_video_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": string_field("Attractive, SEO-friendly YouTube video title."),
            "intro": string_field("Opening of the video (about 150 words) introducing the work and sparking curiosity."),
            "body": string_field("Main part of the video (storytelling prose, about 800-1000 words) summarizing and analysing the key ideas in depth."),
            "outro": string_field("Closing of the video (about 150 words) recapping the value of the work and asking viewers to like, share and subscribe.")
        },
        "required": ["title", "intro", "body", "outro"]
    })
}
