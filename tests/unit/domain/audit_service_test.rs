// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rankaudit::domain::models::audit::{
    AuditRequest, DeviceClass, Location, SearchEngineKind, WorkerConfig,
};
use rankaudit::domain::oracle::search_oracle::{OracleError, OracleResponse};
use rankaudit::domain::services::audit_service::AuditService;
use rankaudit::utils::errors::AuditError;
use rankaudit::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{results_payload, ScriptedOracle};

fn service(oracle: Arc<ScriptedOracle>) -> AuditService {
    AuditService::new(
        oracle,
        RetryPolicy::new(2, Duration::from_millis(3000)),
        WorkerConfig::default(),
    )
}

fn request(location: Location) -> AuditRequest {
    AuditRequest::new(
        "https://www.Example.com/landing",
        "best coffee grinder",
        location,
        SearchEngineKind::Google,
    )
}

fn ranks(outcome: &rankaudit::domain::models::audit::AuditOutcome) -> Vec<u32> {
    outcome.results.iter().map(|e| e.rank).collect()
}

#[tokio::test]
async fn test_dual_audit_reconciles_and_windows_each_device() {
    let oracle = Arc::new(ScriptedOracle::new(|device, _| {
        let text = match device {
            // 自报 12，但列表中第 7 名就是目标
            DeviceClass::Desktop => results_payload(Some(12), 1..=40, &[7]),
            // 未自报，目标出现在第 57 名；第 90 名不在窗口内
            DeviceClass::Mobile => {
                let ranks = (1..=40).chain(52..=62).chain([90]);
                results_payload(None, ranks, &[57])
            }
        };
        Ok(OracleResponse::from_text(format!("```json\n{}\n```", text)))
    }));

    let outcome = service(oracle.clone())
        .run_audit(&request(Location::Named("New York".into())))
        .await
        .unwrap();

    assert_eq!(outcome.target, "example.com");

    assert_eq!(outcome.desktop.target_rank, Some(7));
    assert_eq!(ranks(&outcome.desktop), (1..=40).collect::<Vec<_>>());
    let flagged: Vec<u32> = outcome
        .desktop
        .results
        .iter()
        .filter(|e| e.is_target)
        .map(|e| e.rank)
        .collect();
    assert_eq!(flagged, vec![7]);
    assert_eq!(
        outcome.desktop.search_url.as_deref(),
        Some("https://www.google.com/search?q=best%20coffee%20grinder&gl=us&pws=0&near=New%20York")
    );

    assert_eq!(outcome.mobile.target_rank, Some(57));
    let mut expected: Vec<u32> = (1..=40).collect();
    expected.extend(52..=62);
    assert_eq!(ranks(&outcome.mobile), expected);
    assert!(outcome
        .mobile
        .search_url
        .as_deref()
        .unwrap()
        .ends_with("&start=50"));

    assert_eq!(oracle.calls(DeviceClass::Desktop), 1);
    assert_eq!(oracle.calls(DeviceClass::Mobile), 1);
}

#[tokio::test]
async fn test_target_not_found_keeps_top_forty() {
    let oracle = Arc::new(ScriptedOracle::always(results_payload(
        None,
        1..=60,
        &[],
    )));

    let outcome = service(oracle)
        .run_audit(&request(Location::CurrentLocation))
        .await
        .unwrap();

    for device in [&outcome.desktop, &outcome.mobile] {
        assert_eq!(device.target_rank, None);
        assert_eq!(device.results.len(), 40);
        assert!(device.results.iter().all(|e| !e.is_target));
        assert_eq!(
            device.search_url.as_deref(),
            Some("https://www.google.com/search?q=best%20coffee%20grinder&gl=us&pws=0")
        );
    }
    assert_eq!(outcome.desktop.summary, "Audit complete.");
}

#[tokio::test]
async fn test_one_failing_worker_fails_the_whole_audit() {
    let oracle = Arc::new(ScriptedOracle::new(|device, _| match device {
        DeviceClass::Desktop => Ok(OracleResponse::from_text(results_payload(
            Some(3),
            1..=40,
            &[3],
        ))),
        DeviceClass::Mobile => Ok(OracleResponse::from_text("I could not complete the audit.")),
    }));

    let result = service(oracle)
        .run_audit(&request(Location::CurrentLocation))
        .await;

    assert!(matches!(result, Err(AuditError::MalformedResponse(_))));
}

#[tokio::test(start_paused = true)]
async fn test_search_grounding_quota_is_not_retried() {
    let oracle = Arc::new(ScriptedOracle::new(|device, _| match device {
        DeviceClass::Desktop => Ok(OracleResponse::from_text(results_payload(
            None,
            1..=40,
            &[],
        ))),
        DeviceClass::Mobile => Err(OracleError::Api {
            status: 429,
            message: "RESOURCE_EXHAUSTED: search_grounding_request_per_project_per_day".into(),
        }),
    }));

    let result = service(oracle.clone())
        .run_audit(&request(Location::CurrentLocation))
        .await;

    assert!(matches!(
        result,
        Err(AuditError::SearchGroundingQuotaExhausted)
    ));
    assert_eq!(oracle.calls(DeviceClass::Mobile), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transient_quota_is_retried_after_backoff() {
    let oracle = Arc::new(ScriptedOracle::new(|device, call| {
        if device == DeviceClass::Desktop && call == 0 {
            return Err(OracleError::Api {
                status: 429,
                message: "RESOURCE_EXHAUSTED: Quota exceeded".into(),
            });
        }
        Ok(OracleResponse::from_text(results_payload(
            Some(2),
            1..=40,
            &[2],
        )))
    }));
    let start = tokio::time::Instant::now();

    let outcome = service(oracle.clone())
        .run_audit(&request(Location::CurrentLocation))
        .await
        .unwrap();

    assert_eq!(outcome.desktop.target_rank, Some(2));
    assert_eq!(oracle.calls(DeviceClass::Desktop), 2);
    assert_eq!(oracle.calls(DeviceClass::Mobile), 1);
    assert!(start.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test]
async fn test_invalidated_credential_propagates() {
    let oracle = Arc::new(ScriptedOracle::new(|_, _| {
        Err(OracleError::CredentialInvalidated(
            "Requested entity was not found.".into(),
        ))
    }));

    let result = service(oracle)
        .run_audit(&request(Location::CurrentLocation))
        .await;

    assert!(matches!(result, Err(AuditError::CredentialInvalidated(_))));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_oracle() {
    let oracle = Arc::new(ScriptedOracle::always(results_payload(None, 1..=5, &[])));
    let service = service(oracle.clone());

    let blank_keywords = AuditRequest::new(
        "example.com",
        "   ",
        Location::CurrentLocation,
        SearchEngineKind::Bing,
    );
    let blank_website = AuditRequest::new(
        "https://",
        "coffee",
        Location::CurrentLocation,
        SearchEngineKind::Bing,
    );

    assert!(matches!(
        service.run_audit(&blank_keywords).await,
        Err(AuditError::Validation(_))
    ));
    assert!(matches!(
        service.run_audit(&blank_website).await,
        Err(AuditError::Validation(_))
    ));
    assert_eq!(oracle.calls(DeviceClass::Desktop), 0);
    assert_eq!(oracle.calls(DeviceClass::Mobile), 0);
}
