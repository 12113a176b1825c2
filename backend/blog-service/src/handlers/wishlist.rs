/// Wishlist handlers - HTTP endpoints for per-user wishlist entries
///
/// All of these sit behind the session gate.
use super::{documents_response, QueryParam};
use crate::auth::SessionClaims;
use crate::error::Result;
use crate::models::{parse_object_id, WishlistPayload};
use crate::AppState;
use actix_web::{web, HttpResponse};
use validator::Validate;

pub async fn list_wishlist(state: web::Data<AppState>) -> Result<HttpResponse> {
    let entries = state.wishlist.find_all().await?;
    Ok(documents_response(entries))
}

/// Entries whose `wishlistFor` equals `?query=`
pub async fn list_user_wishlist(
    state: web::Data<AppState>,
    params: web::Query<QueryParam>,
) -> Result<HttpResponse> {
    let entries = state.wishlist.find_by_user(&params.query).await?;
    Ok(documents_response(entries))
}

pub async fn create_wishlist_entry(
    state: web::Data<AppState>,
    session: SessionClaims,
    body: web::Json<WishlistPayload>,
) -> Result<HttpResponse> {
    let payload = body.into_inner();
    payload.validate()?;

    let ack = state.wishlist.insert(payload.into_document()).await?;
    tracing::info!(
        entry_id = %ack.inserted_id,
        added_by = session.email().unwrap_or("-"),
        "wishlist entry created"
    );

    Ok(HttpResponse::Ok().json(ack))
}

/// Delete the wishlist entry whose ID is in `?query=`
pub async fn delete_wishlist_entry(
    state: web::Data<AppState>,
    params: web::Query<QueryParam>,
) -> Result<HttpResponse> {
    let id = parse_object_id(&params.query)?;
    let ack = state.wishlist.delete(id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
