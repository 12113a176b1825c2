/// Blog Service Library
///
/// HTTP backend for the BlogEng client: blog posts, comments and per-user
/// wishlists stored in MongoDB, plus cookie-based session tokens.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: URL-to-handler wiring shared by the binary and tests
/// - `models`: request bodies, store acknowledgments, JSON/BSON conversion
/// - `db`: repository traits and the MongoDB implementation
/// - `auth`: session token issue/verify and cookie construction
/// - `middleware`: session gate and request timing
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::{AppError, Result};

use auth::SessionManager;
use db::{BlogRepository, CommentRepository, MongoStore, StoreHealth, WishlistRepository};
use std::sync::Arc;

/// Shared state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
    pub health: Arc<dyn StoreHealth>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Back every repository with the same MongoDB store.
    pub fn from_mongo(store: Arc<MongoStore>, sessions: Arc<SessionManager>) -> Self {
        Self {
            blogs: store.clone(),
            comments: store.clone(),
            wishlist: store.clone(),
            health: store,
            sessions,
        }
    }
}
