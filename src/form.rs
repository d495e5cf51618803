//! Collects the fields describing a work and turns them into validated [`WorkMetadata`].

use crate::cover::CoverImage;
use crate::error::{LitReviewError, ValidationError};
use crate::types::{TaskSelection, WorkMetadata};
use std::path::Path;
use tokio::fs;
use url::Url;

/// The output language used when the user does not pick one.
pub const DEFAULT_OUTPUT_LANGUAGE: &str = "Vietnamese";

/// A summary file accepted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFile {
    pub name: String,
    pub content: String,
}

/// Mutable form state, filled in by the user before submission.
///
/// Text fields are public; the summary and cover go through methods that check
/// the file type before changing anything.
#[derive(Debug, Clone)]
pub struct WorkForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub main_keyword: String,
    pub ebook_link: String,
    /// Empty means "no purchase link".
    pub affiliate_link: String,
    pub output_language: String,
    summary: Option<SummaryFile>,
    cover: Option<CoverImage>,
}

impl Default for WorkForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            genre: String::new(),
            main_keyword: String::new(),
            ebook_link: String::new(),
            affiliate_link: String::new(),
            output_language: DEFAULT_OUTPUT_LANGUAGE.to_string(),
            summary: None,
            cover: None,
        }
    }
}

impl WorkForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summary from an already-read file.
    ///
    /// # Errors
    ///
    /// `ValidationError::UnsupportedSummaryFile` if `file_name` does not end in `.txt`;
    /// the current summary is kept in that case.
    pub fn set_summary(
        &mut self,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let name = file_name.into();
        check_summary_name(&name)?;
        self.summary = Some(SummaryFile {
            name,
            content: content.into(),
        });
        Ok(())
    }

    /// Reads a `.txt` summary from disk.
    ///
    /// The extension is checked before the file is opened. A read failure leaves
    /// the previous summary in place.
    pub async fn load_summary<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LitReviewError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        check_summary_name(&name)?;

        let content = fs::read_to_string(path).await?;
        tracing::debug!(file = %name, bytes = content.len(), "loaded summary");
        self.summary = Some(SummaryFile { name, content });
        Ok(())
    }

    pub fn summary(&self) -> Option<&SummaryFile> {
        self.summary.as_ref()
    }

    /// Reads a cover image from disk.
    ///
    /// On failure the cover is cleared and a warning is logged before the error
    /// is returned, so the form never carries a stale image.
    pub async fn load_cover<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<&CoverImage, LitReviewError> {
        let path = path.as_ref();
        match CoverImage::from_path(path).await {
            Ok(cover) => {
                let cover: &CoverImage = self.cover.insert(cover);
                Ok(cover)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read cover image");
                self.cover = None;
                Err(err)
            }
        }
    }

    pub fn set_cover(&mut self, cover: CoverImage) {
        self.cover = Some(cover);
    }

    pub fn clear_cover(&mut self) {
        self.cover = None;
    }

    pub fn cover(&self) -> Option<&CoverImage> {
        self.cover.as_ref()
    }

    /// Whether the form has everything needed to submit `tasks`.
    pub fn is_submittable(&self, tasks: &TaskSelection) -> bool {
        self.validate(tasks).is_ok()
    }

    /// Checks the form and builds the metadata for a request.
    ///
    /// Checks run in a fixed order: required fields, links, summary, tasks.
    pub fn validate(&self, tasks: &TaskSelection) -> Result<WorkMetadata, ValidationError> {
        let required = [
            ("output language", &self.output_language),
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
            ("main keyword", &self.main_keyword),
            ("ebook link", &self.ebook_link),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }

        let ebook_link = check_link("ebook link", &self.ebook_link)?;
        let affiliate_link = match self.affiliate_link.trim() {
            "" => None,
            link => Some(check_link("affiliate link", link)?),
        };

        let summary = match &self.summary {
            Some(file) if !file.content.trim().is_empty() => file.content.clone(),
            _ => return Err(ValidationError::MissingSummary),
        };

        if !tasks.any() {
            return Err(ValidationError::NoTaskSelected);
        }

        Ok(WorkMetadata {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre.trim().to_string(),
            main_keyword: self.main_keyword.trim().to_string(),
            ebook_link,
            affiliate_link,
            summary,
            cover_image: self.cover.clone(),
            output_language: self.output_language.trim().to_string(),
        })
    }
}

fn check_summary_name(name: &str) -> Result<(), ValidationError> {
    if name.to_ascii_lowercase().ends_with(".txt") {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedSummaryFile {
            name: name.to_string(),
        })
    }
}

/// Accepts any absolute URL. Surrounding whitespace is stripped, as URL inputs
/// do; the rest is returned verbatim, not in `Url`'s normalized form.
fn check_link(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    match Url::parse(value) {
        Ok(_) => Ok(value.to_string()),
        Err(_) => Err(ValidationError::InvalidLink {
            field,
            value: value.to_string(),
        }),
    }
}
