mod common;

use axum::http::{Method, StatusCode};
use common::{read_json, TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn login_issues_a_usable_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    let token = body["access_token"].as_str().unwrap().to_string();

    let response = app
        .request(Method::GET, "/auth/me", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = read_json(response).await;
    assert_eq!(me["email"], ADMIN_EMAIL);
    assert!(me.get("hashed_password").is_none());

    let response = app
        .request(Method::GET, "/api/v1/cars", None, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new().await;

    for credentials in [
        json!({ "email": ADMIN_EMAIL, "password": "not-the-password" }),
        json!({ "email": "ghost@carshop.test", "password": ADMIN_PASSWORD }),
    ] {
        let response = app
            .request(Method::POST, "/auth/login", Some(credentials), None)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn deactivated_user_cannot_log_in() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/users",
            Some(json!({ "email": "clerk@carshop.test", "password": "clerk-password" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let clerk = read_json(response).await;
    assert_eq!(clerk["is_active"], true);

    let response = app
        .request_authenticated(
            Method::POST,
            &format!("/api/v1/users/{}/deactivate", clerk["id"]),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["is_active"], false);

    let response = app
        .request(
            Method::POST,
            "/auth/login",
            Some(json!({ "email": "clerk@carshop.test", "password": "clerk-password" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/users/active", None)
        .await;
    let active = read_json(response).await;
    let emails: Vec<&str> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec![ADMIN_EMAIL]);
}

#[tokio::test]
async fn registration_rejects_a_taken_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/users",
            Some(json!({ "email": ADMIN_EMAIL, "password": "another-password" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .request(
            Method::POST,
            "/api/v1/users",
            Some(json!({ "email": "not-an-email", "password": "another-password" })),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn entity_routes_require_a_bearer_token() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/cars", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], "AUTH_MISSING_TOKEN");

    let response = app
        .request(Method::GET, "/api/v1/sales", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(Method::GET, "/api/v1/users", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.request(Method::GET, "/auth/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn routes_are_open_when_auth_is_disabled() {
    let app = TestApp::with_config(|cfg| cfg.require_auth = false).await;

    let response = app.request(Method::GET, "/api/v1/cars", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/auth/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
