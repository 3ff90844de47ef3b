use s3_gallery::caption;
use s3_gallery::gallery::Gallery;
use s3_gallery::models::{ImageRecord, UploadStatus};
use s3_gallery::storage::MemoryStore;
use s3_gallery::workflow::UploadController;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn zero_byte_upload_completes_then_resets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.png");
    tokio::fs::write(&path, b"").await.unwrap();

    let store = Arc::new(MemoryStore::new());
    let mut controller = UploadController::new(store.clone(), "images", Duration::from_secs(5));
    let id = controller.select_files(vec![path]).unwrap();

    let mut seen = vec![UploadStatus::Idle, controller.status(id)];
    while seen.last() != Some(&UploadStatus::Idle) {
        let (_, status) = controller.next_change().await.unwrap();
        seen.push(status);
    }

    // Collapse percentage updates to compare the stage order
    let mut stages: Vec<&str> = seen
        .iter()
        .map(|s| match s {
            UploadStatus::Idle => "idle",
            UploadStatus::Uploading { .. } => "uploading",
            UploadStatus::Complete => "complete",
            UploadStatus::Failed(_) => "failed",
        })
        .collect();
    stages.dedup();
    assert_eq!(stages, vec!["idle", "uploading", "complete", "idle"]);

    let stored = store.get("images", "a.png").expect("object missing");
    assert_eq!(stored.len(), 0);
}

#[tokio::test]
async fn empty_selection_keeps_idle() {
    let store = Arc::new(MemoryStore::new());
    let mut controller = UploadController::new(store.clone(), "images", Duration::from_secs(5));

    assert!(controller.select_files(Vec::new()).is_none());
    assert!(controller.poll_events().is_empty());
    assert_eq!(controller.in_flight(), 0);
    assert!(store.is_empty());
}

#[test]
fn gallery_selects_first_unmoderated_record() {
    let records: Vec<ImageRecord> = serde_json::from_str(
        r#"[
            {"storageKey": "nsfw.png", "generatedCaption": "", "translatedCaption": "", "moderated": true},
            {"storageKey": "beach.jpg", "generatedCaption": "waves #summer", "translatedCaption": "olas #verano"}
        ]"#,
    )
    .unwrap();

    let gallery = Gallery::from_records(records);
    let selected = gallery.selected().unwrap();
    assert_eq!(selected.storage_key, "beach.jpg");
    assert_eq!(
        caption::render_markup(&selected.generated_caption),
        "waves <span class=\"hashtag\">#summer</span>"
    );
}

#[test]
fn hashtag_example_caption() {
    assert_eq!(
        caption::render_markup("#hello world #foo»bar"),
        "<span class=\"hashtag\">#hello</span> world <span class=\"hashtag\">#foo</span>»bar"
    );
}
