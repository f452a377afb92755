//! RpcClient and runner against a fake node over HTTP.

mod common;

use axum::http::StatusCode;
use common::{unreachable_url, FakeNode, Override, CHAIN};
use node_smoke_core::{
    registry, run_all, run_check, CheckFailure, CheckOutcome, NodeRpc, Payload, ProbeError,
    RpcClient, Shape, SmokeConfig,
};
use serde_json::json;

fn client_for(base_url: &str, token: Option<&str>) -> (RpcClient, SmokeConfig) {
    let config = SmokeConfig::new(base_url, CHAIN)
        .unwrap()
        .with_auth_token(token.map(str::to_string));
    (RpcClient::new(config.clone()).unwrap(), config)
}

fn check(name: &str) -> &'static node_smoke_core::CheckDef {
    registry().iter().find(|c| c.name == name).unwrap()
}

#[tokio::test]
async fn test_healthy_node_passes_every_check() {
    let node = FakeNode::healthy().await;
    let (client, config) = client_for(&node.base_url, None);

    let summary = run_all(&client, &config).await.unwrap();

    assert_eq!(summary.succeeded, 21);
    assert_eq!(summary.failed, 0);
    assert!(summary.verdict().is_ok());
}

#[tokio::test]
async fn test_requests_follow_registration_order() {
    let node = FakeNode::healthy().await;
    let (client, config) = client_for(&node.base_url, None);

    run_all(&client, &config).await.unwrap();

    let expected: Vec<String> = registry().iter().map(|c| c.render_path(CHAIN)).collect();
    assert_eq!(node.requests(), expected);
}

#[tokio::test]
async fn test_checkpoint_request_carries_auth_token() {
    let node = FakeNode::healthy().await;
    let (client, config) = client_for(&node.base_url, Some("tok123"));

    let outcome = run_check(check("current_checkpoint"), &client, &config).await;

    assert!(outcome.is_passed());
    assert_eq!(node.requests(), vec!["/chains/main/checkpoint?auth=tok123"]);
}

#[tokio::test]
async fn test_probe_decodes_each_shape() {
    let node = FakeNode::healthy().await;
    let (client, _) = client_for(&node.base_url, None);

    let text = client.probe("/network/self", Shape::Text).await.unwrap();
    assert_eq!(text.status, 200);
    assert!(matches!(text.payload, Payload::Text(ref s) if !s.is_empty()));

    let array = client.probe("/protocols", Shape::Array).await.unwrap();
    assert!(matches!(array.payload, Payload::Array(ref items) if items.len() == 1));

    let object = client.probe("/stats/memory", Shape::Object).await.unwrap();
    assert_eq!(object.payload.shape(), Shape::Object);
}

#[tokio::test]
async fn test_stuck_worker_is_the_only_failure() {
    let node = FakeNode::start(vec![Override::json(
        "/workers/prevalidators/main",
        StatusCode::OK,
        json!({"status": {"phase": "stuck"}}),
    )])
    .await;
    let (client, config) = client_for(&node.base_url, None);

    let summary = run_all(&client, &config).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 20);
    assert_eq!(node.requests().len(), 21);
    assert_eq!(
        summary.verdict().unwrap_err().to_string(),
        "1 out of 21 tests failed"
    );
}

#[tokio::test]
async fn test_non_json_error_body_fails_with_status() {
    let node = FakeNode::start(vec![Override::raw(
        "/stats/gc",
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal error",
    )])
    .await;
    let (client, config) = client_for(&node.base_url, None);

    let outcome = run_check(check("garbage_collector_stats"), &client, &config).await;

    match outcome {
        CheckOutcome::Failed(CheckFailure::Probe {
            error: ProbeError::Decode { status, body, .. },
            ..
        }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal error");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_with_json_body_is_unhealthy() {
    let node = FakeNode::start(vec![Override::json(
        "/network/version",
        StatusCode::NOT_FOUND,
        json!({"kind": "not_found"}),
    )])
    .await;
    let (client, config) = client_for(&node.base_url, None);

    let outcome = run_check(check("supported_network_version"), &client, &config).await;

    assert!(matches!(
        outcome,
        CheckOutcome::Failed(CheckFailure::Unhealthy { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_unreachable_node_fails_every_check_without_aborting() {
    let (client, config) = client_for(&unreachable_url(), None);

    let summary = run_all(&client, &config).await.unwrap();

    assert_eq!(summary.failed, 21);
    assert_eq!(summary.total(), 21);
    assert_eq!(
        summary.verdict().unwrap_err().to_string(),
        "21 out of 21 tests failed"
    );
}
