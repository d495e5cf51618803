mod common;

use litreview::{Session, SubmitOutcome, TaskKind, TaskSelection, ValidationError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_successful_submission_stores_result() {
    let server = MockServer::start().await;
    common::mount_reply(
        &server,
        &json!({
            "review": common::review_json(),
            "shortVideoScript": common::short_video_json()
        }),
    )
    .await;

    let client = common::client_for(&server);
    let session = Session::new();
    session.set_task(TaskKind::ShortVideo, true);
    let mut form = common::filled_form("Moon");
    form.set_cover(common::tiny_cover());

    let outcome = session.submit(&client, &form).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Completed);
    let snapshot = session.snapshot();
    assert!(!snapshot.busy);
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.active_tab, Some(TaskKind::Review));
    assert_eq!(snapshot.cover, Some(common::tiny_cover()));

    let rendered = session.rendered().unwrap();
    assert_eq!(rendered.tabs, vec![TaskKind::Review, TaskKind::ShortVideo]);
    assert!(rendered.review.unwrap().html.contains("<img src=\"data:image/png;base64,"));

    assert!(session.select_tab(TaskKind::ShortVideo));
    assert!(!session.select_tab(TaskKind::LongVideo));
    assert_eq!(session.active_tab(), Some(TaskKind::ShortVideo));
}

#[tokio::test]
async fn test_non_json_reply_sets_error_and_clears_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::gemini_text_reply("not json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let session = Session::new();

    let outcome = session
        .submit(&client, &common::filled_form("Moon"))
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(!session.is_busy());
    assert!(session.result().is_none());
    let error = session.error().unwrap();
    assert!(error.starts_with("Could not generate content: Gemini API error:"), "{}", error);
}

#[tokio::test]
async fn test_invalid_form_does_not_touch_state() {
    let server = MockServer::start().await;
    common::mount_reply(&server, &json!({ "review": common::review_json() })).await;

    let client = common::client_for(&server);
    let session = Session::new();
    session
        .submit(&client, &common::filled_form("Moon"))
        .await
        .unwrap();
    let before = session.snapshot();

    let mut incomplete = common::filled_form("Sun");
    incomplete.author.clear();
    let err = session.submit(&client, &incomplete).await.unwrap_err();
    assert_eq!(err, ValidationError::MissingField { field: "author" });

    session.set_task(TaskKind::Review, false);
    let err = session
        .submit(&client, &common::filled_form("Sun"))
        .await
        .unwrap_err();
    assert_eq!(err, ValidationError::NoTaskSelected);

    let after = session.snapshot();
    assert_eq!(after.result, before.result);
    assert_eq!(after.error, before.error);
    assert!(!after.busy);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_late_response_does_not_overwrite_newer_submission() {
    let server = MockServer::start().await;

    // The first submission answers slowly with a review.
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .and(body_string_contains("Title: First Work"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::gemini_reply(&json!({ "review": common::review_json() })))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    // The second one, with review deselected, answers immediately.
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .and(body_string_contains("Title: Second Work"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::gemini_reply(&json!({ "longVideoScript": common::long_video_json() }))),
        )
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let session = Session::new();
    let first_form = common::filled_form("First Work");
    let second_form = common::filled_form("Second Work");

    let first = {
        let session = session.clone();
        let client = client.clone();
        tokio::spawn(async move { session.submit(&client, &first_form).await })
    };
    // Let the first request go out before the selection changes.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(session.is_busy());

    session.set_task(TaskKind::Review, false);
    session.set_task(TaskKind::LongVideo, true);
    let second = session.submit(&client, &second_form).await.unwrap();
    assert_eq!(second, SubmitOutcome::Completed);

    let first = first.await.unwrap().unwrap();
    assert_eq!(first, SubmitOutcome::Superseded);

    let snapshot = session.snapshot();
    assert!(!snapshot.busy);
    assert_eq!(
        snapshot.tasks,
        TaskSelection::none().with(TaskKind::LongVideo, true)
    );
    let result = snapshot.result.unwrap();
    assert!(result.review.is_none());
    assert_eq!(result.long_video_script.unwrap().title, "Moon, explained");
    assert_eq!(snapshot.active_tab, Some(TaskKind::LongVideo));
}

#[tokio::test]
async fn test_active_tab_falls_back_when_kind_disappears() {
    let server = MockServer::start().await;
    common::mount_reply(
        &server,
        &json!({
            "review": common::review_json(),
            "shortVideoScript": common::short_video_json(),
            "longVideoScript": common::long_video_json()
        }),
    )
    .await;

    let client = common::client_for(&server);
    let session = Session::with_tasks(TaskSelection::all());
    session
        .submit(&client, &common::filled_form("Moon"))
        .await
        .unwrap();
    // Review is already active.
    assert!(!session.select_tab(TaskKind::Review));
    assert!(session.select_tab(TaskKind::ShortVideo));

    // Same mock reply, but only long video is requested now.
    session.set_task(TaskKind::Review, false);
    session.set_task(TaskKind::ShortVideo, false);
    session
        .submit(&client, &common::filled_form("Moon"))
        .await
        .unwrap();

    assert_eq!(session.active_tab(), Some(TaskKind::LongVideo));
}

#[tokio::test]
async fn test_dropped_submission_clears_busy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::gemini_reply(&json!({ "review": common::review_json() })))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = common::client_for(&server);
    let session = Session::new();
    let form = common::filled_form("Moon");

    let timed_out =
        tokio::time::timeout(Duration::from_millis(100), session.submit(&client, &form)).await;
    assert!(timed_out.is_err());

    // Well past the point where the reply would have arrived.
    tokio::time::sleep(Duration::from_millis(600)).await;

    let snapshot = session.snapshot();
    assert!(!snapshot.busy);
    assert!(snapshot.result.is_none());
    assert!(snapshot.error.is_none());

    // The session accepts a new submission afterwards.
    let outcome = session.submit(&client, &form).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Completed);
}
