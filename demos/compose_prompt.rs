//! This example prints the prompt and response schema for a task selection
//! without calling the API.
//!
//! Usage: `cargo run --example compose_prompt -- review,short,long`

use litreview::{compose, TaskKind, TaskSelection, WorkForm};

fn main() -> anyhow::Result<()> {
    let selection = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "review".to_string());

    let mut tasks = TaskSelection::none();
    for name in selection.split(',') {
        match name.trim() {
            "review" => tasks.set(TaskKind::Review, true),
            "short" => tasks.set(TaskKind::ShortVideo, true),
            "long" => tasks.set(TaskKind::LongVideo, true),
            other => anyhow::bail!("unknown content type `{}`", other),
        }
    }

    let mut form = WorkForm::new();
    form.title = "One Piece".to_string();
    form.author = "Eiichiro Oda".to_string();
    form.genre = "Manga, Adventure".to_string();
    form.main_keyword = "one piece manga review".to_string();
    form.ebook_link = "https://example.com/one-piece".to_string();
    form.set_summary("summary.txt", "Luffy sets out to find the One Piece.")?;

    let metadata = form.validate(&tasks)?;
    let composed = compose(&metadata, &tasks);
    println!("{}", composed.prompt);
    println!("{}", serde_json::to_string_pretty(&composed.schema)?);
    Ok(())
}
