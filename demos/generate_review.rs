//! This example demonstrates a full generation round-trip.
//!
//! It fills a `WorkForm` from command-line arguments, submits it through a
//! `Session`, and prints every generated content type in its copy-ready form.
//!
//! To run this example, you must have the `GEMINI_API_KEY` environment variable set.
//!
//! Usage: `cargo run --example generate_review -- "Moon" summary.txt [cover.png]`

use litreview::{CopyFormat, LitReviewClient, Session, TaskKind, TaskSelection, WorkForm};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file if it exists.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let title = args.next().unwrap_or_else(|| "Moon".to_string());
    let summary_path = args.next().unwrap_or_else(|| "summary.txt".to_string());
    let cover_path = args.next();

    // 1. Initialize the client from the environment.
    let client = LitReviewClient::new(None)?;

    // 2. Fill in the form.
    let mut form = WorkForm::new();
    form.title = title.clone();
    form.author = "Unknown".to_string();
    form.genre = "Novel".to_string();
    form.main_keyword = format!("{} review", title.to_lowercase());
    form.ebook_link = "https://example.com/read".to_string();
    form.output_language = "English".to_string();
    form.load_summary(&summary_path).await?;
    if let Some(path) = cover_path {
        if let Err(e) = form.load_cover(&path).await {
            eprintln!("Continuing without a cover: {}", e);
        }
    }

    // 3. Ask for every content type.
    let session = Session::with_tasks(TaskSelection::all());
    println!("Generating content for \"{}\"...", title);
    session.submit(&client, &form).await?;

    if let Some(error) = session.error() {
        eprintln!("{}", error);
        return Ok(());
    }

    // 4. Print what would be copied from each tab.
    if let Some(content) = session.rendered() {
        for kind in &content.tabs {
            println!("\n===== {} =====", kind.label());
            let format = match kind {
                TaskKind::Review => CopyFormat::PlainText,
                _ => CopyFormat::Html,
            };
            if let Some(text) = content.copy(*kind, format) {
                println!("{}", text);
            }
        }
        for link in &content.links {
            println!("{}: {}", link.label, link.url);
        }
    }

    Ok(())
}
