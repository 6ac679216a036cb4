//! File store behaviour across process restarts.

use uniassist_core::history::HistoryStore;
use uniassist_core::message::{Message, Role};
use uniassist_history::{JsonFileStore, ReferenceDataset};

#[tokio::test]
async fn log_survives_reopen_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation_history.json");

    let log = vec![
        Message::user("hi"),
        Message::assistant("Hello!"),
        Message::user("hi"),
        Message::assistant("Hello again!"),
    ];
    JsonFileStore::new(&path).save(&log).await.unwrap();

    let reopened = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(reopened, log);
    assert_eq!(reopened[2].role, Role::User);
}

#[tokio::test]
async fn overwrite_replaces_not_appends() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("h.json"));

    store.save(&[Message::user("one")]).await.unwrap();
    store
        .save(&[Message::user("one"), Message::assistant("two")])
        .await
        .unwrap();

    assert_eq!(store.load().await.unwrap().len(), 2);
}

#[tokio::test]
async fn history_file_is_readable_as_reference_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    JsonFileStore::new(&path)
        .save(&[Message::user("q"), Message::assistant("a")])
        .await
        .unwrap();

    let dataset = ReferenceDataset::load(&path).await.unwrap();
    assert_eq!(dataset.render(), "User: q\nAssistant: a");
}
