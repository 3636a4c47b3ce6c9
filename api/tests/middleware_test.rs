//! Integration tests for CORS, security headers and fallback routes

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{TestContext, FRONTEND_ORIGIN, VALID_PHONE};

#[actix_web::test]
async fn test_preflight_from_frontend_origin() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/start-verification")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .insert_header(("Access-Control-Request-Headers", "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let headers = resp.headers();
    assert_eq!(
        headers.get("Access-Control-Allow-Origin").unwrap(),
        FRONTEND_ORIGIN
    );
    assert_eq!(
        headers.get("Access-Control-Allow-Credentials").unwrap(),
        "true"
    );
    let methods = headers
        .get("Access-Control-Allow-Methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(methods, "POST");
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(headers.get("Referrer-Policy").unwrap(), "no-referrer");
}

#[actix_web::test]
async fn test_preflight_for_other_methods_is_refused() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/start-verification")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .insert_header(("Access-Control-Request-Method", "DELETE"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    assert_eq!(resp.headers().get("X-Content-Type-Options").unwrap(), "nosniff");
}

#[actix_web::test]
async fn test_post_from_frontend_origin_carries_cors_headers() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/start-verification")
        .insert_header(("Origin", FRONTEND_ORIGIN))
        .set_json(json!({ "phone": VALID_PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Access-Control-Allow-Origin").unwrap(),
        FRONTEND_ORIGIN
    );
}

#[actix_web::test]
async fn test_other_origins_are_not_allowed() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/start-verification")
        .insert_header(("Origin", "https://evil.example"))
        .set_json(json!({ "phone": VALID_PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(
        resp.headers()
            .get("Access-Control-Allow-Origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://evil.example")
    );
}

#[actix_web::test]
async fn test_security_headers_without_tls() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    let headers = resp.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(headers.get("Referrer-Policy").unwrap(), "no-referrer");
    assert!(headers.get("Strict-Transport-Security").is_none());
}

#[actix_web::test]
async fn test_hsts_when_tls_is_active() {
    let ctx = TestContext::default();
    let app = init_app!(ctx, true);

    let req = test::TestRequest::post()
        .uri("/api/start-verification")
        .set_json(json!({ "phone": "invalid" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp
        .headers()
        .get("Strict-Transport-Security")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("max-age="));
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "pv-api");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_unknown_route_is_404_json() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::post().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Not found." }));
}

#[actix_web::test]
async fn test_non_json_content_type_is_invalid_request() {
    let ctx = TestContext::default();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/start-verification")
        .insert_header(("Content-Type", "text/plain"))
        .set_payload(format!("phone={}", VALID_PHONE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request.");
}
