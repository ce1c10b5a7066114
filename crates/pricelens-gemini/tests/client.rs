//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use pricelens_core::generator::TextGenerator;
use pricelens_gemini::{GeminiClient, GeminiError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn generate_text_returns_candidate_text() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "{\"price_found\": true, "},
                        {"text": "\"selectors\": []}"}
                    ]
                },
                "finishReason": "STOP"
            }
        ],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 18, "totalTokenCount": 138}
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_json(serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": "locate the price"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client
        .generate_text("gemini-1.5-flash", "locate the price")
        .await
        .expect("should return answer text");

    assert_eq!(text, "{\"price_found\": true, \"selectors\": []}");
}

#[tokio::test]
async fn generate_text_surfaces_api_error_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_text("gemini-1.5-flash", "locate the price")
        .await
        .expect_err("should surface the API error");

    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn generate_text_falls_back_to_raw_body_for_unparsed_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_text("gemini-1.5-flash", "locate the price")
        .await
        .expect_err("should surface the API error");

    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn generate_text_rejects_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_text("gemini-1.5-flash", "locate the price")
        .await
        .expect_err("should reject malformed body");

    assert!(
        matches!(err, GeminiError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn generate_text_rejects_empty_candidate_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .generate_text("gemini-1.5-flash", "locate the price")
        .await
        .expect_err("should reject empty candidates");

    assert!(
        matches!(err, GeminiError::NoCandidates { ref model } if model == "gemini-1.5-flash"),
        "expected NoCandidates, got: {err:?}"
    );
}

#[tokio::test]
async fn text_generator_impl_carries_bare_quota_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let generator: &dyn TextGenerator = &client;
    let err = generator
        .generate("gemini-1.5-flash", "locate the price")
        .await
        .expect_err("should fail");

    assert_eq!(err.to_string(), "quota exceeded");
}
