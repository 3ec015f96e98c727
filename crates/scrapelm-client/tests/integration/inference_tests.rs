use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use scrapelm_client::OllamaClient;
use scrapelm_core::config::InferenceConfig;
use scrapelm_core::traits::InferenceClient;
use scrapelm_core::{AppError, ReasoningStripper};

use crate::integration::common::{GenerateBehavior, SeenRequest, inference_router, spawn_server};

async fn client_for(behavior: GenerateBehavior, timeout: Duration) -> (OllamaClient, SeenRequest) {
    let seen: SeenRequest = Arc::new(Mutex::new(None));
    let base = spawn_server(inference_router(behavior, seen.clone())).await;
    let client = OllamaClient::new(&InferenceConfig {
        base_url: base,
        timeout,
    })
    .unwrap();
    (client, seen)
}

#[tokio::test]
async fn sends_one_shot_request_and_returns_response_field() {
    let (client, seen) = client_for(
        GenerateBehavior::Answer("Paris."),
        Duration::from_secs(10),
    )
    .await;

    let raw = client.generate("llama3", "Where?").await.unwrap();

    assert_eq!(raw, "Paris.");
    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(
        body,
        serde_json::json!({"model": "llama3", "prompt": "Where?", "stream": false})
    );
}

#[tokio::test]
async fn reasoning_reply_sanitizes_to_answer() {
    let (client, _) = client_for(
        GenerateBehavior::Answer("<think>pondering</think>The answer is 42."),
        Duration::from_secs(10),
    )
    .await;

    let raw = client.generate("deepseek-r1", "?").await.unwrap();
    let answer = ReasoningStripper::think_tags().unwrap().sanitize(&raw);

    assert_eq!(raw, "<think>pondering</think>The answer is 42.");
    assert_eq!(answer.as_str(), "The answer is 42.");
}

#[tokio::test]
async fn non_200_yields_status() {
    let (client, _) = client_for(
        GenerateBehavior::Status(StatusCode::NOT_FOUND),
        Duration::from_secs(10),
    )
    .await;

    let err = client.generate("missing-model", "?").await.unwrap_err();

    assert!(matches!(err, AppError::HttpStatus(404)));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (client, _) = client_for(GenerateBehavior::NotJson, Duration::from_secs(10)).await;

    let err = client.generate("llama3", "?").await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_response_field_is_malformed() {
    let (client, _) = client_for(
        GenerateBehavior::MissingResponseField,
        Duration::from_secs(10),
    )
    .await;

    let err = client.generate("llama3", "?").await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(ref m) if m.contains("response")));
}

#[tokio::test]
async fn slow_endpoint_is_unreachable() {
    let (client, _) = client_for(GenerateBehavior::Slow, Duration::from_secs(1)).await;

    let err = client.generate("llama3", "?").await.unwrap_err();

    assert!(matches!(err, AppError::EndpointUnreachable(_)));
}
