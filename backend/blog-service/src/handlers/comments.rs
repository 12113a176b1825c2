/// Comment handlers - HTTP endpoints for comment operations
use super::documents_response;
use crate::error::Result;
use crate::models::CommentPayload;
use crate::AppState;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Get comments for a blog post
///
/// The path segment is compared to `blogId` as a plain string, so it does not
/// have to be a valid ObjectId.
pub async fn list_blog_comments(
    state: web::Data<AppState>,
    blog_id: web::Path<String>,
) -> Result<HttpResponse> {
    let comments = state.comments.find_by_blog(&blog_id).await?;
    Ok(documents_response(comments))
}

/// Create a new comment
pub async fn create_comment(
    state: web::Data<AppState>,
    body: web::Json<CommentPayload>,
) -> Result<HttpResponse> {
    let payload = body.into_inner();
    payload.validate()?;

    let blog_id = payload.blog_id.clone();
    let ack = state.comments.insert(payload.into_document()).await?;
    tracing::info!(comment_id = %ack.inserted_id, %blog_id, "comment created");

    Ok(HttpResponse::Ok().json(ack))
}
