use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::Engine as _;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use ugc_creator::{
    ai::{mock::MockFailure, MockChatClient, MockImageGenerationClient},
    app::{App, AppServices},
    image::{LocalImageStore, PLACEHOLDER_PNG_B64},
    server,
};

const BASE_URL: &str = "http://localhost:8000";

struct TestServer {
    router: Router,
    image_gen: Arc<MockImageGenerationClient>,
    static_dir: TempDir,
}

fn build_server(
    chat: MockChatClient,
    image_gen: MockImageGenerationClient,
    mock_images: bool,
) -> TestServer {
    let static_dir = tempfile::tempdir().unwrap();
    let store = LocalImageStore::new(&static_dir.path().join("images")).unwrap();
    let image_gen = Arc::new(image_gen);

    let app = App::with_services(
        AppServices {
            chat: Box::new(chat),
            image_gen: Box::new(image_gen.clone()),
            store: Box::new(store),
        },
        BASE_URL.to_string(),
        mock_images,
    );

    TestServer {
        router: server::router(Arc::new(app), static_dir.path()),
        image_gen,
        static_dir,
    }
}

fn default_server(mock_images: bool) -> TestServer {
    build_server(
        MockChatClient::new(),
        MockImageGenerationClient::new(),
        mock_images,
    )
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let server = default_server(false);

    let (status, body) = send_json(&server.router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_generate_text_success() {
    let server = build_server(
        MockChatClient::new().with_response("Best Sunday brunch ever 🥞".to_string()),
        MockImageGenerationClient::new(),
        false,
    );

    let (status, body) = send_json(
        &server.router,
        post_json(
            "/generate-text",
            serde_json::json!({ "prompt": "pancakes", "platform": "Instagram", "tone": "cozy" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "text": "Best Sunday brunch ever 🥞" }));
}

#[tokio::test]
async fn test_generate_text_rejects_empty_and_whitespace_prompts() {
    let server = default_server(false);

    for body in [
        serde_json::json!({ "prompt": "" }),
        serde_json::json!({ "prompt": "   " }),
        serde_json::json!({}),
    ] {
        let (status, body) = send_json(&server.router, post_json("/generate-text", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "detail": "Prompt is required" }));
    }
}

#[tokio::test]
async fn test_generate_text_provider_failure_is_500() {
    let server = build_server(
        MockChatClient::new().with_failure(MockFailure::Provider("upstream exploded".to_string())),
        MockImageGenerationClient::new(),
        false,
    );

    let (status, body) = send_json(
        &server.router,
        post_json("/generate-text", serde_json::json!({ "prompt": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Text generation failed: "));
    assert!(detail.contains("upstream exploded"));
}

#[tokio::test]
async fn test_generate_image_rejects_whitespace_prompt() {
    let server = default_server(true);

    let (status, body) = send_json(
        &server.router,
        post_json("/generate-image", serde_json::json!({ "prompt": " \t " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Prompt is required");
}

#[tokio::test]
async fn test_generate_image_mock_mode() {
    let server = default_server(true);

    let (status, body) = send_json(
        &server.router,
        post_json("/generate-image", serde_json::json!({ "prompt": "cat" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:8000/static/images/ugc_"));
    assert!(url.ends_with(".png"));
    assert_eq!(body["b64"], PLACEHOLDER_PNG_B64);
    assert_eq!(server.image_gen.get_call_count(), 0);
}

#[tokio::test]
async fn test_generated_image_is_served_back() {
    let payload = base64::engine::general_purpose::STANDARD.encode(b"\x89PNG fake image");
    let server = build_server(
        MockChatClient::new(),
        MockImageGenerationClient::new().with_image_response(payload.clone()),
        false,
    );

    let (status, body) = send_json(
        &server.router,
        post_json(
            "/generate-image",
            serde_json::json!({ "prompt": "sneakers", "style": "selfie", "aspectRatio": "portrait" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["b64"], payload.as_str());

    let (prompt, size) = server.image_gen.get_requests().remove(0);
    assert!(prompt.starts_with("sneakers. smartphone selfie"));
    assert_eq!(size, "1024x1792");

    let path = body["url"]
        .as_str()
        .unwrap()
        .strip_prefix(BASE_URL)
        .unwrap()
        .to_string();
    let (status, bytes) = send(&server.router, get(&path)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"\x89PNG fake image");

    let file_name = path.rsplit('/').next().unwrap();
    assert!(server
        .static_dir
        .path()
        .join("images")
        .join(file_name)
        .is_file());
}

#[tokio::test]
async fn test_billing_limit_falls_back_to_placeholder() {
    let server = build_server(
        MockChatClient::new(),
        MockImageGenerationClient::new().with_failure(MockFailure::BillingHardLimit(
            "OpenAI API error (status 400): billing_hard_limit_reached".to_string(),
        )),
        false,
    );

    let (status, body) = send_json(
        &server.router,
        post_json("/generate-image", serde_json::json!({ "prompt": "cat" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["b64"], PLACEHOLDER_PNG_B64);
    assert!(body["url"].as_str().unwrap().ends_with(".png"));
}

#[tokio::test]
async fn test_image_provider_failure_is_500() {
    let server = build_server(
        MockChatClient::new(),
        MockImageGenerationClient::new()
            .with_failure(MockFailure::Provider("content_policy_violation".to_string())),
        false,
    );

    let (status, body) = send_json(
        &server.router,
        post_json("/generate-image", serde_json::json!({ "prompt": "cat" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Image generation failed: "));
    assert!(detail.contains("content_policy_violation"));
}

#[tokio::test]
async fn test_malformed_provider_payload_is_500() {
    let server = build_server(
        MockChatClient::new(),
        MockImageGenerationClient::new().with_image_response("%%% not base64".to_string()),
        false,
    );

    let (status, body) = send_json(
        &server.router,
        post_json("/generate-image", serde_json::json!({ "prompt": "cat" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Image generation failed: Base64 decode error"));
}

#[tokio::test]
async fn test_missing_static_file_is_404() {
    let server = default_server(false);

    let (status, _) = send(&server.router, get("/static/images/ugc_missing.png")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mock_images_get_distinct_files() {
    let server = default_server(true);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let router = server.router.clone();
            tokio::spawn(async move {
                send_json(
                    &router,
                    post_json("/generate-image", serde_json::json!({ "prompt": "cat" })),
                )
                .await
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let mut urls: Vec<String> = results
        .into_iter()
        .map(|(status, body)| {
            assert_eq!(status, StatusCode::OK);
            body["url"].as_str().unwrap().to_string()
        })
        .collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 8);

    let files = std::fs::read_dir(server.static_dir.path().join("images"))
        .unwrap()
        .count();
    assert_eq!(files, 8);
}

#[tokio::test]
async fn test_cors_allows_dev_origin_with_credentials() {
    let server = default_server(false);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate-text")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let server = default_server(false);

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
