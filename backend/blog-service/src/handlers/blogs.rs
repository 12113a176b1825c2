/// Blog handlers - HTTP endpoints for blog post operations
use super::{documents_response, QueryParam};
use crate::db::{FEATURED_LIMIT, LATEST_LIMIT};
use crate::error::{AppError, Result};
use crate::models::{document_to_json, parse_object_id, BlogPayload};
use crate::AppState;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// List every blog post
pub async fn list_blogs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let blogs = state.blogs.find_all().await?;
    Ok(documents_response(blogs))
}

/// List blog posts, longest description first
pub async fn list_blogs_by_words(state: web::Data<AppState>) -> Result<HttpResponse> {
    let blogs = state.blogs.find_by_description_length(None).await?;
    Ok(documents_response(blogs))
}

/// Top ten blog posts by description length
pub async fn list_featured_blogs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let blogs = state
        .blogs
        .find_by_description_length(Some(FEATURED_LIMIT))
        .await?;
    Ok(documents_response(blogs))
}

/// Get a blog post by ID
///
/// Served at both `/blog/{id}` and `/update/blog/{id}`. A missing post is a
/// 200 with a `null` body.
pub async fn get_blog(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_object_id(&id)?;
    let blog = state.blogs.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(blog.map(document_to_json)))
}

/// Full-text search over title and description
pub async fn search_blogs(
    state: web::Data<AppState>,
    params: web::Query<QueryParam>,
) -> Result<HttpResponse> {
    let blogs = state.blogs.search(&params.query).await?;
    tracing::debug!(query = %params.query, hits = blogs.len(), "blog search");
    Ok(documents_response(blogs))
}

/// Most recently published blog posts
pub async fn list_latest_blogs(state: web::Data<AppState>) -> Result<HttpResponse> {
    let blogs = state.blogs.find_latest(LATEST_LIMIT).await?;
    Ok(documents_response(blogs))
}

/// Create a new blog post
pub async fn create_blog(
    state: web::Data<AppState>,
    body: web::Json<BlogPayload>,
) -> Result<HttpResponse> {
    let payload = body.into_inner();
    payload.validate()?;

    let ack = state.blogs.insert(payload.into_document()).await?;
    tracing::info!(blog_id = %ack.inserted_id, "blog created");

    Ok(HttpResponse::Ok().json(ack))
}

/// Update a blog post, creating it when the ID is unknown
pub async fn update_blog(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<BlogPayload>,
) -> Result<HttpResponse> {
    let id = parse_object_id(&id)?;
    let payload = body.into_inner();
    payload.validate()?;

    let fields = payload.into_document();
    if fields.is_empty() {
        return Err(AppError::Validation(
            "update must set at least one field".to_string(),
        ));
    }

    let ack = state.blogs.upsert(id, fields).await?;
    tracing::info!(
        blog_id = %id,
        matched = ack.matched_count,
        modified = ack.modified_count,
        upserted = ack.upserted_count,
        "blog upserted"
    );

    Ok(HttpResponse::Ok().json(ack))
}

/// Delete a blog post by the ID in `?query=`
pub async fn delete_blog(
    state: web::Data<AppState>,
    params: web::Query<QueryParam>,
) -> Result<HttpResponse> {
    let id = parse_object_id(&params.query)?;
    let ack = state.blogs.delete(id).await?;
    tracing::info!(blog_id = %id, deleted = ack.deleted_count, "blog delete");

    Ok(HttpResponse::Ok().json(ack))
}
