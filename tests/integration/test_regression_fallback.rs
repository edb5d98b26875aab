#[path = "../common/mod.rs"]
mod common;

use common::{unreachable_url, StubResponse, StubServer};
use lachesis_modelling::services::lachesis::{LachesisClient, LachesisConfig};
use lachesis_modelling::{FitError, ModellingError, RegressionOrchestrator, RegressionOutcome};
use serde_json::json;
use std::time::Duration;

fn orchestrator_for(url: &str) -> RegressionOrchestrator {
    let config = LachesisConfig::new(url)
        .with_timeout(Duration::from_millis(500))
        .with_retries(1)
        .with_backoff_step(Duration::from_millis(10));
    RegressionOrchestrator::new(LachesisClient::new(config).unwrap())
}

#[tokio::test]
async fn test_remote_result_returned_verbatim() {
    let remote = json!({"rmse": 4.2, "predictions": [121.0, 134.5]});
    let server = StubServer::start(vec![StubResponse::ok(remote.clone())]).await;
    let orchestrator = orchestrator_for(&server.url);

    let outcome = orchestrator
        .fit(vec![vec![5.2], vec![6.3]], vec![120.0, 135.0])
        .await
        .unwrap();

    match outcome {
        RegressionOutcome::Remote(result) => {
            assert_eq!(serde_json::to_value(&result).unwrap(), remote);
        }
        other => panic!("Expected remote result, got {other:?}"),
    }
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_unreachable_service_uses_local_model() {
    let orchestrator = orchestrator_for(&unreachable_url().await);

    let outcome = orchestrator
        .fit(vec![vec![1.0], vec![2.0], vec![3.0]], vec![2.0, 4.0, 6.0])
        .await
        .unwrap();

    assert!(outcome.is_fallback());
    assert_eq!(outcome.source(), "local");
    let model = outcome.fallback().unwrap();
    assert!((model.predict(&[4.0]).unwrap() - 8.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_failing_service_uses_local_model_after_retries() {
    let server = StubServer::start(vec![StubResponse::status(500, "internal error")]).await;
    let orchestrator = orchestrator_for(&server.url);

    let outcome = orchestrator
        .fit(vec![vec![0.0], vec![10.0]], vec![50.0, 150.0])
        .await
        .unwrap();

    let model = outcome.fallback().expect("local model");
    assert!((model.slope().unwrap() - 10.0).abs() < 1e-9);
    assert!((model.intercept - 50.0).abs() < 1e-9);
    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn test_empty_dataset_fails_when_service_unavailable() {
    let orchestrator = orchestrator_for(&unreachable_url().await);

    let error = orchestrator.fit(vec![], vec![]).await.unwrap_err();

    assert!(error.is_fit_error());
    assert!(matches!(error, ModellingError::Fit(FitError::EmptyDataset)));
}

#[tokio::test]
async fn test_degenerate_data_propagates_fit_error() {
    let orchestrator = orchestrator_for(&unreachable_url().await);

    let error = orchestrator
        .fit(vec![vec![3.0], vec![3.0], vec![3.0]], vec![1.0, 2.0, 3.0])
        .await
        .unwrap_err();

    assert_eq!(error.as_fit_error(), Some(&FitError::SingularMatrix));
}

#[tokio::test]
async fn test_ragged_features_rejected_without_network() {
    let server = StubServer::start(vec![StubResponse::ok(json!({"rmse": 1.0}))]).await;
    let orchestrator = orchestrator_for(&server.url);

    let error = orchestrator
        .fit(vec![vec![1.0, 2.0], vec![3.0]], vec![1.0, 2.0])
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ModellingError::Fit(FitError::RaggedFeatures { row: 1, .. })
    ));
    assert_eq!(server.hits(), 0);
}
