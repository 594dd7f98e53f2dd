use greenroom::core::config::ResolvedConfig;
use greenroom::inference::{
    ClaudeProvider, GeminiProvider, GenerationProvider, OpenAiProvider, ProviderError,
    provider_for,
};
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Gemini
// ============================================================================

#[tokio::test]
async fn test_gemini_returns_upstream_json_unmodified() {
    let mock_server = MockServer::start().await;

    let upstream_body = json!({
        "candidates": [
            { "content": { "parts": [{ "text": "Here is your script." }] } }
        ],
        "usageMetadata": { "totalTokenCount": 42 }
    });

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate("write a script").await.unwrap();

    // Raw passthrough: no extraction or reshaping of the upstream schema
    assert_eq!(result, upstream_body);
}

#[tokio::test]
async fn test_gemini_sends_fixed_generation_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "hello" }] }],
            "generationConfig": { "temperature": 0.7, "maxOutputTokens": 2048 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    provider.generate("hello").await.unwrap();
}

#[tokio::test]
async fn test_gemini_forwards_empty_prompt_as_is() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    assert!(provider.generate("").await.is_ok());
}

#[tokio::test]
async fn test_gemini_non_2xx_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new("test-key".to_string(), Some(mock_server.uri()));
    let err = provider.generate("prompt").await.unwrap_err();

    match err {
        ProviderError::Api {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "gemini");
            assert_eq!(status, 429);
            assert_eq!(message, "quota exhausted");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ============================================================================
// Claude
// ============================================================================

#[tokio::test]
async fn test_claude_sends_api_key_and_version_headers() {
    let mock_server = MockServer::start().await;

    let upstream_body = json!({
        "content": [{ "type": "text", "text": "Scene one." }],
        "stop_reason": "end_turn"
    });

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "anthropic-test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-5-sonnet-20241022",
            "max_tokens": 2048,
            "messages": [{ "role": "user", "content": "outline it" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = ClaudeProvider::new("anthropic-test-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate("outline it").await.unwrap();
    assert_eq!(result, upstream_body);
}

#[tokio::test]
async fn test_claude_non_2xx_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&mock_server)
        .await;

    let provider = ClaudeProvider::new("bad-key".to_string(), Some(mock_server.uri()));
    let err = provider.generate("prompt").await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Api { status: 401, ref provider, .. } if provider == "claude"
    ));
}

// ============================================================================
// OpenAI
// ============================================================================

#[tokio::test]
async fn test_openai_sends_bearer_auth_and_fixed_model() {
    let mock_server = MockServer::start().await;

    let upstream_body = json!({
        "choices": [{ "message": { "role": "assistant", "content": "Draft." } }]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer openai-test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 2048,
            "messages": [{ "role": "user", "content": "draft it" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("openai-test-key".to_string(), Some(mock_server.uri()));
    let result = provider.generate("draft it").await.unwrap();
    assert_eq!(result, upstream_body);
}

#[tokio::test]
async fn test_openai_non_2xx_carries_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server melted"))
        .mount(&mock_server)
        .await;

    let provider = OpenAiProvider::new("key".to_string(), Some(mock_server.uri()));
    let err = provider.generate("prompt").await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Api { status: 500, ref provider, .. } if provider == "openai"
    ));
}

// ============================================================================
// Dispatch (no network before resolution)
// ============================================================================

#[tokio::test]
async fn test_unsupported_model_fails_without_network() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = ResolvedConfig {
        gemini_api_key: Some("key".to_string()),
        gemini_base_url: mock_server.uri(),
        ..ResolvedConfig::default()
    };

    let err = provider_for("bogus", &config).unwrap_err();
    assert!(matches!(err, ProviderError::Unsupported(_)));
    // MockServer verifies expect(0) on drop
}

#[tokio::test]
async fn test_missing_credential_fails_without_network() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = ResolvedConfig {
        gemini_api_key: None,
        gemini_base_url: mock_server.uri(),
        ..ResolvedConfig::default()
    };

    let err = provider_for("gemini", &config).unwrap_err();
    match err {
        ProviderError::Config(msg) => assert!(msg.contains("GEMINI_API_KEY")),
        other => panic!("expected Config error, got {other:?}"),
    }
}
