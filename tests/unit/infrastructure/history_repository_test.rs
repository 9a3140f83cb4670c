// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use rankaudit::config::settings::HistorySettings;
use rankaudit::domain::models::audit::SearchEngineKind;
use rankaudit::domain::models::history::HistoryRecord;
use rankaudit::domain::repositories::history_repository::{HistoryRepository, RepositoryError};
use rankaudit::infrastructure::repositories::history_repo_impl::{
    create_history_repository, FileHistoryRepository, InMemoryHistoryRepository,
};
use tempfile::tempdir;
use uuid::Uuid;

fn record(keywords: &str) -> HistoryRecord {
    HistoryRecord {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        website: "example.com".into(),
        keywords: keywords.into(),
        state: "Ohio".into(),
        engine: SearchEngineKind::Google,
        target_rank: Some(8),
        summary: "PC: #8 | Mob: #11".into(),
        use_location: false,
    }
}

#[tokio::test]
async fn test_file_repository_persists_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("history.json");

    let repo = FileHistoryRepository::new(&path, 50);
    assert!(repo.list().await.unwrap().is_empty());

    repo.save(&record("first")).await.unwrap();
    repo.save(&record("second")).await.unwrap();

    let reopened = FileHistoryRepository::new(&path, 50);
    let records = reopened.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].keywords, "second");
    assert_eq!(records[1], repo.list().await.unwrap()[1]);
}

#[tokio::test]
async fn test_file_repository_caps_capacity_and_clears() {
    let dir = tempdir().unwrap();
    let repo = FileHistoryRepository::new(dir.path().join("history.json"), 3);

    for i in 0..5 {
        repo.save(&record(&format!("query {}", i))).await.unwrap();
    }

    let records = repo.list().await.unwrap();
    let keywords: Vec<&str> = records.iter().map(|r| r.keywords.as_str()).collect();
    assert_eq!(keywords, vec!["query 4", "query 3", "query 2"]);

    repo.clear().await.unwrap();
    assert!(repo.list().await.unwrap().is_empty());
    // 再次清空不会报错
    repo.clear().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    tokio::fs::write(&path, b"not json").await.unwrap();

    let repo = FileHistoryRepository::new(&path, 50);
    assert!(matches!(
        repo.list().await,
        Err(RepositoryError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_save_replaces_file_atomically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let repo = FileHistoryRepository::new(&path, 50);
    assert_eq!(repo.temp_path(), dir.path().join("history.json.tmp"));

    // 上一次写入中断留下的残缺临时文件
    tokio::fs::write(repo.temp_path(), b"[{\"id\": ").await.unwrap();

    repo.save(&record("first")).await.unwrap();
    repo.save(&record("second")).await.unwrap();

    assert!(!repo.temp_path().exists());
    let data = tokio::fs::read(&path).await.unwrap();
    let stored: Vec<HistoryRecord> = serde_json::from_slice(&data).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].keywords, "second");
}

#[tokio::test]
async fn test_in_memory_repository_caps_capacity() {
    let repo = InMemoryHistoryRepository::new(2);
    repo.save(&record("a")).await.unwrap();
    repo.save(&record("b")).await.unwrap();
    repo.save(&record("c")).await.unwrap();

    let records = repo.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].keywords, "c");
}

#[test]
fn test_factory_rejects_unknown_storage() {
    let settings = HistorySettings {
        storage_type: "redis".into(),
        path: "./storage/history.json".into(),
        capacity: 50,
    };
    assert!(matches!(
        create_history_repository(&settings),
        Err(RepositoryError::UnsupportedStorage(_))
    ));
}
