//! An SDK that turns book, comic and manga metadata into ready-to-publish content
//! using the Gemini API.
//!
//! Given a work's metadata, a plain-text summary and an optional cover image, the
//! crate composes one structured prompt, asks the model for a JSON reply that
//! follows a matching schema, and shapes that reply into typed, copy-ready views.
//!
//! ## Features
//! - SEO review articles, short-video scripts and long-video scripts, in any mix.
//! - Prompt and response schema composed per selected content type.
//! - Multimodal requests when a cover image is supplied.
//! - Cover placeholder substitution, plain-text and transcript copy formats.
//! - A session controller that ignores responses to superseded submissions.
//!
//! ## Example
//!
//! ```no_run
//! # use litreview::{LitReviewClient, Session, WorkForm};
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = LitReviewClient::new(None)?;
//! let mut form = WorkForm::new();
//! form.title = "One Piece".into();
//! form.author = "Eiichiro Oda".into();
//! form.genre = "Manga, Adventure".into();
//! form.main_keyword = "one piece manga review".into();
//! form.ebook_link = "https://example.com/one-piece".into();
//! form.load_summary("summary.txt").await?;
//!
//! let session = Session::new();
//! session.submit(&client, &form).await?;
//! if let Some(content) = session.rendered() {
//!     println!("{:?}", content.tabs);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod compose;
pub mod config;
pub mod cover;
pub mod error;
pub mod form;
pub mod render;
pub mod session;
pub mod types;

pub use client::LitReviewClient;
pub use compose::{compose, ComposedPrompt, COVER_IMAGE_PLACEHOLDER};
pub use config::ClientConfig;
pub use cover::CoverImage;
pub use error::{LitReviewError, ValidationError};
pub use form::WorkForm;
pub use render::{render, CopyFormat, RenderedContent, TabState};
pub use session::{Session, SessionSnapshot, SubmitOutcome};
pub use types::{
    GenerationRequest, GenerationResult, LongVideoScript, Review, Scene, ShortVideoScript,
    TaskKind, TaskSelection, WorkMetadata,
};
