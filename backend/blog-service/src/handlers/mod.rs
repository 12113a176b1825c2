/// HTTP handlers for blog-service endpoints
///
/// - Blogs: listing, ranking, search, create, upsert, delete
/// - Comments: list by blog, create
/// - Wishlist: list, list by user, create, delete
/// - Session: issue and clear the session cookie
/// - Health: liveness and store readiness
pub mod blogs;
pub mod comments;
pub mod health;
pub mod session;
pub mod wishlist;

use actix_web::HttpResponse;
use bson::Document;
use serde::Deserialize;

use crate::models::document_to_json;

// Re-export handler functions at module level
pub use blogs::{
    create_blog, delete_blog, get_blog, list_blogs, list_blogs_by_words, list_featured_blogs,
    list_latest_blogs, search_blogs, update_blog,
};
pub use comments::{create_comment, list_blog_comments};
pub use health::{health, index, readiness};
pub use session::{clear_session, issue_session};
pub use wishlist::{create_wishlist_entry, delete_wishlist_entry, list_user_wishlist, list_wishlist};

/// The `?query=` parameter several routes take, holding an id or search terms.
#[derive(Debug, Deserialize)]
pub struct QueryParam {
    pub query: String,
}

/// Serialize store documents as a JSON array with ids rendered as hex.
pub(crate) fn documents_response(docs: Vec<Document>) -> HttpResponse {
    let body: Vec<serde_json::Value> = docs.into_iter().map(document_to_json).collect();
    HttpResponse::Ok().json(body)
}
