// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rankaudit::domain::models::audit::{
    AuditOutcome, AuditRequest, DeviceClass, DualAuditOutcome, Location, SearchEngineKind,
};
use rankaudit::domain::services::history_service::{export_csv, HistoryService};
use rankaudit::infrastructure::repositories::history_repo_impl::InMemoryHistoryRepository;
use std::sync::Arc;

fn outcome(device: DeviceClass, target_rank: Option<u32>) -> AuditOutcome {
    AuditOutcome {
        device,
        target_rank,
        results: Vec::new(),
        summary: String::new(),
        sources: Vec::new(),
        search_url: None,
    }
}

fn dual(desktop: Option<u32>, mobile: Option<u32>) -> DualAuditOutcome {
    DualAuditOutcome {
        target: "example.com".into(),
        desktop: outcome(DeviceClass::Desktop, desktop),
        mobile: outcome(DeviceClass::Mobile, mobile),
    }
}

#[tokio::test]
async fn test_record_builds_summary_and_keeps_most_recent_first() {
    let service = HistoryService::new(Arc::new(InMemoryHistoryRepository::new(50)));
    let texas = AuditRequest::new(
        "example.com",
        "coffee",
        Location::Named("Texas".into()),
        SearchEngineKind::Google,
    );
    let here = AuditRequest::new(
        "example.com",
        "tea",
        Location::CurrentLocation,
        SearchEngineKind::Bing,
    );

    let first = service.record(&texas, &dual(Some(4), None)).await.unwrap();
    assert_eq!(first.summary, "PC: #4 | Mob: #N/A");
    assert_eq!(first.target_rank, Some(4));
    assert_eq!(first.state, "Texas");
    assert!(!first.use_location);

    let second = service.record(&here, &dual(None, Some(9))).await.unwrap();
    assert!(second.use_location);

    let history = service.list().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].keywords, "tea");
    assert_eq!(history[1].keywords, "coffee");

    let csv = export_csv(&history);
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(1).unwrap().contains(r#""Bing","Native IP / Current Location","Not Found""#));

    service.clear().await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
}
