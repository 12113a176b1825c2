//! Shared fixtures for blog-service integration tests
#![allow(dead_code)]

pub mod memory_store;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, App};
use blog_service::auth::SessionManager;
use blog_service::config::SessionConfig;
use blog_service::{routes, AppState};
use memory_store::MemoryStore;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

pub fn session_manager() -> Arc<SessionManager> {
    Arc::new(SessionManager::new(&SessionConfig {
        secret: TEST_SECRET.to_string(),
        cross_site: false,
    }))
}

/// State whose repositories all point at one in-memory store.
pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        blogs: store.clone(),
        comments: store.clone(),
        wishlist: store.clone(),
        health: store,
        sessions: session_manager(),
    }
}

/// Build the full application around `state`, exactly as the binary wires it.
pub async fn init_app(
    state: &AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    let state = state.clone();
    test::init_service(App::new().configure(move |cfg| routes::configure(cfg, &state))).await
}
