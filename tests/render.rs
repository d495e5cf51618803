mod common;

use litreview::render::{
    long_video_transcript, render_review_html, short_video_transcript, strip_tags, DEFAULT_ALT_TEXT,
};
use litreview::{
    render, CopyFormat, GenerationResult, LongVideoScript, Review, ShortVideoScript, TabState,
    TaskKind, COVER_IMAGE_PLACEHOLDER,
};

fn review() -> Review {
    serde_json::from_value(common::review_json()).unwrap()
}

fn short_video() -> ShortVideoScript {
    serde_json::from_value(common::short_video_json()).unwrap()
}

fn long_video() -> LongVideoScript {
    serde_json::from_value(common::long_video_json()).unwrap()
}

#[test]
fn test_placeholder_becomes_one_image_with_alt_text() {
    let cover = common::tiny_cover();
    let html = render_review_html(&review(), Some(&cover));

    assert_eq!(html.matches(COVER_IMAGE_PLACEHOLDER).count(), 0);
    assert_eq!(html.matches("<img").count(), 1);
    assert!(html.contains(&format!("src=\"{}\"", cover.to_data_uri())));
    assert!(html.contains("alt=\"Cover of Moon\""));
    assert!(html.contains("<figcaption>Cover of Moon</figcaption>"));
    // The image sits where the token was.
    assert!(html.find("<p>Intro</p>").unwrap() < html.find("<figure").unwrap());
    assert!(html.find("<figure").unwrap() < html.find("<h2>").unwrap());
}

#[test]
fn test_placeholder_is_removed_without_cover() {
    let html = render_review_html(&review(), None);

    assert_eq!(html.matches(COVER_IMAGE_PLACEHOLDER).count(), 0);
    assert!(!html.contains("<img"));
    assert!(html.contains("<p>Intro</p><h2>Highlights</h2>"));
}

#[test]
fn test_empty_alt_text_falls_back() {
    let mut review = review();
    review.alt_text = String::new();
    let html = render_review_html(&review, Some(&common::tiny_cover()));
    assert!(html.contains(&format!("alt=\"{}\"", DEFAULT_ALT_TEXT)));
}

#[test]
fn test_repeated_placeholders_leave_no_marker() {
    let mut review = review();
    review.review_content = format!(
        "<p>a</p>{0}<p>b</p>{0}",
        COVER_IMAGE_PLACEHOLDER
    );
    let html = render_review_html(&review, Some(&common::tiny_cover()));
    assert_eq!(html.matches(COVER_IMAGE_PLACEHOLDER).count(), 0);
    assert_eq!(html.matches("<img").count(), 1);
}

#[test]
fn test_html_without_placeholder_is_unchanged() {
    let mut review = review();
    review.review_content = "<p>No marker here.</p>".to_string();
    let html = render_review_html(&review, Some(&common::tiny_cover()));
    assert_eq!(html, "<p>No marker here.</p>");
}

#[test]
fn test_review_copy_formats() {
    let result = GenerationResult {
        review: Some(review()),
        download_link: "https://example.com/read".into(),
        ..Default::default()
    };
    let rendered = render(&result, None);

    let html = rendered.copy(TaskKind::Review, CopyFormat::Html).unwrap();
    assert!(html.starts_with("<h1>Review</h1>"));
    let text = rendered.copy(TaskKind::Review, CopyFormat::PlainText).unwrap();
    assert_eq!(text, "ReviewIntroHighlightsGood & bright.");
    assert_eq!(text, strip_tags(&html));
}

#[test]
fn test_short_video_transcript() {
    let transcript = short_video_transcript(&short_video());
    assert_eq!(
        transcript,
        "**Hook:**\nWhat if the moon talked?\n\n**Scenes:**\n\
Scene 1:\n- Visual: Night sky\n- Script: Look up.\n\n\
Scene 2:\n- Visual: Open book\n- Script: Read this.\n\n\
Scene 3:\n- Visual: Close-up\n- Script: Now.\n\n\
**CTA:**\nRead it tonight!"
    );
}

#[test]
fn test_long_video_transcript() {
    assert_eq!(
        long_video_transcript(&long_video()),
        "**Title:**\nMoon, explained\n\n**Intro:**\nWelcome.\n\n**Body:**\nThe story.\n\n**Outro:**\nSubscribe."
    );
}

#[test]
fn test_scripts_copy_their_transcript_for_any_format() {
    let result = GenerationResult {
        short_video_script: Some(short_video()),
        long_video_script: Some(long_video()),
        ..Default::default()
    };
    let rendered = render(&result, None);

    assert_eq!(
        rendered.copy(TaskKind::ShortVideo, CopyFormat::Html),
        rendered.copy(TaskKind::ShortVideo, CopyFormat::PlainText)
    );
    assert_eq!(
        rendered.copy(TaskKind::LongVideo, CopyFormat::Html).unwrap(),
        long_video_transcript(&long_video())
    );
    assert_eq!(rendered.copy(TaskKind::Review, CopyFormat::Html), None);
}

#[test]
fn test_links_and_tabs() {
    let result = GenerationResult {
        short_video_script: Some(short_video()),
        long_video_script: Some(long_video()),
        download_link: "https://example.com/read".into(),
        purchase_link: Some("https://shop.example.com/buy".into()),
        ..Default::default()
    };
    let rendered = render(&result, None);

    assert_eq!(rendered.tabs, vec![TaskKind::ShortVideo, TaskKind::LongVideo]);
    let urls: Vec<&str> = rendered.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["https://example.com/read", "https://shop.example.com/buy"]);

    let without_purchase = GenerationResult {
        purchase_link: None,
        ..result
    };
    assert_eq!(render(&without_purchase, None).links.len(), 1);
}

#[test]
fn test_tab_state_selects_first_present_and_falls_back() {
    let mut tabs = TabState::default();
    assert_eq!(tabs.active(), None);

    tabs.sync(&[TaskKind::ShortVideo, TaskKind::LongVideo]);
    assert_eq!(tabs.active(), Some(TaskKind::ShortVideo));

    assert!(tabs.select(TaskKind::LongVideo, &[TaskKind::ShortVideo, TaskKind::LongVideo]));
    assert!(!tabs.select(TaskKind::Review, &[TaskKind::ShortVideo, TaskKind::LongVideo]));

    // Still present: kept.
    tabs.sync(&[TaskKind::Review, TaskKind::LongVideo]);
    assert_eq!(tabs.active(), Some(TaskKind::LongVideo));

    // Gone: first present wins.
    tabs.sync(&[TaskKind::Review]);
    assert_eq!(tabs.active(), Some(TaskKind::Review));

    tabs.sync(&[]);
    assert_eq!(tabs.active(), Some(TaskKind::Review));
}
