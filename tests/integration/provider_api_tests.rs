/*!
 * Integration tests for the Ollama client over HTTP
 */

use crictag::errors::ProviderError;
use crictag::providers::{GenerationRequest, Ollama, Provider};

use crate::common::stub_server::{start_silent_server, unused_base_url, StubServer};

#[tokio::test]
async fn test_generate_withStubServer_shouldSendNonStreamingRequest() {
    let server = StubServer::answering(" SIX\n").await;
    let client = Ollama::new(&server.base_url, 5).unwrap();

    let response = client
        .generate(&GenerationRequest::new("llama3.3:latest", "Commentary: \"Huge six!\""))
        .await
        .unwrap();

    assert_eq!(response.response, " SIX\n");
    let requests = server.generate_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "llama3.3:latest");
    assert_eq!(requests[0]["prompt"], "Commentary: \"Huge six!\"");
    assert_eq!(requests[0]["stream"], false);
}

#[tokio::test]
async fn test_generate_withServerError_shouldReturnApiError() {
    let server = StubServer::start(|_, _| (500, r#"{"error":"model crashed"}"#.to_string())).await;
    let client = Ollama::new(&server.base_url, 5).unwrap();

    let result = client.generate(&GenerationRequest::new("m", "p")).await;

    match result {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 500);
            assert!(message.contains("model crashed"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_withMissingResponseField_shouldReturnParseError() {
    let server = StubServer::start(|_, _| (200, r#"{"model":"m","done":true}"#.to_string())).await;
    let client = Ollama::new(&server.base_url, 5).unwrap();

    let result = client.generate(&GenerationRequest::new("m", "p")).await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_generate_withNothingListening_shouldReturnConnectionError() {
    let client = Ollama::new(unused_base_url().await, 5).unwrap();

    let result = client.generate(&GenerationRequest::new("m", "p")).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_generate_withSilentServer_shouldTimeOut() {
    let (base_url, handle) = start_silent_server().await;
    let client = Ollama::new(base_url, 1).unwrap();

    let result = client.generate(&GenerationRequest::new("m", "p")).await;

    assert!(matches!(result, Err(ProviderError::Timeout(1))));
    handle.abort();
}

#[tokio::test]
async fn test_testConnection_withVersionEndpoint_shouldSucceed() {
    let server = StubServer::answering("SIX").await;
    let client = Ollama::new(&server.base_url, 5).unwrap();

    assert_eq!(client.version().await.unwrap(), "0.5.7");
    assert!(client.test_connection().await.is_ok());
}

#[tokio::test]
async fn test_testConnection_withUnknownPath_shouldFail() {
    let server = StubServer::start(|_, _| (404, "404 page not found".to_string())).await;
    let client = Ollama::new(&server.base_url, 5).unwrap();

    assert!(client.test_connection().await.is_err());
}
