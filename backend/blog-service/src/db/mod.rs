/// Document store access layer
///
/// Handlers only see the repository traits below. [`MongoStore`] is the
/// production implementation; it owns the driver client, which pools its own
/// connections, and is shared across workers behind an `Arc`.
pub mod blog_repo;
pub mod comment_repo;
pub mod wishlist_repo;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{DeleteAck, InsertAck, UpdateAck};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};

pub const BLOGS_COLLECTION: &str = "blogs";
pub const COMMENTS_COLLECTION: &str = "comments";
pub const WISHLIST_COLLECTION: &str = "wishlist";

/// Maximum number of posts returned by the featured listing
pub const FEATURED_LIMIT: i64 = 10;
/// Maximum number of posts returned by the latest listing
pub const LATEST_LIMIT: i64 = 6;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Document>>;

    /// Posts ordered by description length in code points, longest first.
    async fn find_by_description_length(&self, limit: Option<i64>) -> Result<Vec<Document>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>>;

    /// Full-text search over the indexed title and description.
    async fn search(&self, terms: &str) -> Result<Vec<Document>>;

    /// Posts ordered by `publishDate`, newest first.
    async fn find_latest(&self, limit: i64) -> Result<Vec<Document>>;

    async fn insert(&self, blog: Document) -> Result<InsertAck>;

    /// `$set` the given fields on the post, creating it when nothing matches.
    async fn upsert(&self, id: ObjectId, fields: Document) -> Result<UpdateAck>;

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments whose `blogId` equals `blog_id` as a plain string.
    async fn find_by_blog(&self, blog_id: &str) -> Result<Vec<Document>>;

    async fn insert(&self, comment: Document) -> Result<InsertAck>;
}

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Document>>;

    async fn find_by_user(&self, wishlist_for: &str) -> Result<Vec<Document>>;

    async fn insert(&self, entry: Document) -> Result<InsertAck>;

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<()>;
}

/// MongoDB-backed store for all three collections
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect, verify the deployment answers a ping, and make sure the
    /// indexes search relies on exist.
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(&cfg.uri).await?;
        options.app_name = Some("blog-service".to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(options)?;
        let database = client.database(&cfg.name);
        let store = Self { client, database };

        store.ping().await?;
        tracing::info!(database = %cfg.name, "Connected to MongoDB");

        if let Err(e) = store.ensure_indexes().await {
            tracing::warn!(error = %e, "Failed to ensure blog text index; search will fail");
        }

        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        let index = mongodb::IndexModel::builder()
            .keys(doc! { "title": "text", "description": "text" })
            .build();
        self.blogs().create_index(index, None).await?;
        Ok(())
    }

    pub(crate) fn blogs(&self) -> Collection<Document> {
        self.database.collection(BLOGS_COLLECTION)
    }

    pub(crate) fn comments(&self) -> Collection<Document> {
        self.database.collection(COMMENTS_COLLECTION)
    }

    pub(crate) fn wishlist(&self) -> Collection<Document> {
        self.database.collection(WISHLIST_COLLECTION)
    }

    /// Close pooled connections. Called once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB client shut down");
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}
