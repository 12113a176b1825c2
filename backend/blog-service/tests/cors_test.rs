//! Cross-origin policy tests

mod common;

use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD,
    ORIGIN,
};
use actix_web::{test, App};
use blog_service::config::CorsConfig;
use blog_service::routes;
use common::memory_store::MemoryStore;
use common::test_state;
use std::sync::Arc;

const CLIENT_ORIGIN: &str = "http://localhost:5173";

fn cors_config() -> CorsConfig {
    CorsConfig {
        allowed_origin: CLIENT_ORIGIN.to_string(),
    }
}

#[actix_web::test]
async fn test_configured_origin_gets_credentialed_cors_headers() {
    let state = test_state(Arc::new(MemoryStore::new()));
    let app = test::init_service(
        App::new()
            .wrap(routes::cors(&cors_config()))
            .configure(|cfg| routes::configure(cfg, &state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/blogs")
        .insert_header((ORIGIN, CLIENT_ORIGIN))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let headers = resp.headers();
    assert_eq!(
        headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        CLIENT_ORIGIN
    );
    assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
}

#[actix_web::test]
async fn test_preflight_from_configured_origin_is_allowed() {
    let state = test_state(Arc::new(MemoryStore::new()));
    let app = test::init_service(
        App::new()
            .wrap(routes::cors(&cors_config()))
            .configure(|cfg| routes::configure(cfg, &state)),
    )
    .await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/blogs")
        .insert_header((ORIGIN, CLIENT_ORIGIN))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        CLIENT_ORIGIN
    );
    assert_eq!(
        resp.headers().get(ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[actix_web::test]
async fn test_other_origin_is_refused() {
    let store = Arc::new(MemoryStore::new());
    let state = test_state(store.clone());
    let app = test::init_service(
        App::new()
            .wrap(routes::cors(&cors_config()))
            .configure(|cfg| routes::configure(cfg, &state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/blogs")
        .insert_header((ORIGIN, "http://evil.example"))
        .to_request();
    if let Ok(resp) = test::try_call_service(&app, req).await {
        assert!(!resp.status().is_success());
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }
    assert_eq!(store.call_count(), 0);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/blogs")
        .insert_header((ORIGIN, "http://evil.example"))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    if let Ok(resp) = test::try_call_service(&app, req).await {
        assert!(resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
