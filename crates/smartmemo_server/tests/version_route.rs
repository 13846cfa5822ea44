use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn send(method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = smartmemo_server::router().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn version_route_returns_core_version() {
    let (status, body) = send(Method::GET, "/api/version").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "version": smartmemo_core::core_version() }));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = send(Method::GET, "/api/memos").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn version_route_rejects_post() {
    let (status, _) = send(Method::POST, "/api/version").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
