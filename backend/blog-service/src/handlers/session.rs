/// Session handlers - issue and clear the session cookie
use crate::error::Result;
use crate::AppState;
use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

/// Sign the posted claims and return them as the `token` cookie.
///
/// The body only reports success; the token is never echoed back.
pub async fn issue_session(
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    let token = state.sessions.issue(body.into_inner())?;

    Ok(HttpResponse::Ok()
        .cookie(state.sessions.session_cookie(token))
        .json(json!({ "success": true })))
}

/// Replace the session cookie with an already-expired one.
pub async fn clear_session(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.sessions.removal_cookie())
        .json(json!({ "success": true }))
}
