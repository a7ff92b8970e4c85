mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp};

#[tokio::test]
async fn health_endpoints_are_public() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_json(response).await["version"].is_string());

    let response = app.request(Method::GET, "/health/live", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["alive"], true);

    let response = app.request(Method::GET, "/health/ready", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["ready"], true);

    let response = app.request(Method::GET, "/health/info", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let info = read_json(response).await;
    assert_eq!(info["name"], "carshop-api");
    assert_eq!(info["environment"], "test");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health/live", None, None).await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = read_json(response).await;
    assert!(doc["paths"]["/api/v1/sales"].is_object());
}
