//! In-memory repositories for integration tests
//!
//! Mirrors the observable behaviour of the MongoDB store closely enough to
//! drive the HTTP layer: store-assigned ObjectIds, `$set` upserts,
//! description-length ranking, `publishDate` ordering and word-based search.

use async_trait::async_trait;
use blog_service::db::{BlogRepository, CommentRepository, StoreHealth, WishlistRepository};
use blog_service::models::{
    id_to_string, DeleteAck, InsertAck, UpdateAck, BLOG_ID_FIELD, DESCRIPTION_FIELD,
    DESCRIPTION_LENGTH_FIELD, ID_FIELD, PUBLISH_DATE_FIELD, TITLE_FIELD, WISHLIST_FOR_FIELD,
};
use blog_service::{AppError, Result};
use bson::{oid::ObjectId, Bson, Document};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    blogs: Mutex<Vec<Document>>,
    comments: Mutex<Vec<Document>>,
    wishlist: Mutex<Vec<Document>>,
    /// Number of repository calls made, for checking gates run before the store
    calls: AtomicUsize,
    /// When set, every call fails like an unreachable database
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn blog_count(&self) -> usize {
        self.blogs.lock().unwrap().len()
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database("server selection timeout".to_string()));
        }
        Ok(())
    }
}

fn insert_into(collection: &Mutex<Vec<Document>>, mut doc: Document) -> InsertAck {
    if !doc.contains_key(ID_FIELD) {
        let mut with_id = Document::new();
        with_id.insert(ID_FIELD, ObjectId::new());
        for (key, value) in doc {
            with_id.insert(key, value);
        }
        doc = with_id;
    }
    let id = doc.get(ID_FIELD).cloned().unwrap_or(Bson::Null);
    collection.lock().unwrap().push(doc);
    InsertAck {
        acknowledged: true,
        inserted_id: id_to_string(&id),
    }
}

fn delete_from(collection: &Mutex<Vec<Document>>, id: ObjectId) -> DeleteAck {
    let mut docs = collection.lock().unwrap();
    let before = docs.len();
    if let Some(pos) = docs.iter().position(|d| has_id(d, id)) {
        docs.remove(pos);
    }
    DeleteAck {
        acknowledged: true,
        deleted_count: (before - docs.len()) as u64,
    }
}

fn has_id(doc: &Document, id: ObjectId) -> bool {
    doc.get_object_id(ID_FIELD).map(|oid| oid == id).unwrap_or(false)
}

fn description_length(doc: &Document) -> i32 {
    doc.get_str(DESCRIPTION_FIELD)
        .map(|d| d.chars().count() as i32)
        .unwrap_or(0)
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matches_terms(doc: &Document, terms: &[String]) -> bool {
    let mut indexed = Vec::new();
    for field in [TITLE_FIELD, DESCRIPTION_FIELD] {
        if let Ok(text) = doc.get_str(field) {
            indexed.extend(words(text));
        }
    }
    terms.iter().any(|term| indexed.contains(term))
}

#[async_trait]
impl BlogRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Document>> {
        self.enter()?;
        Ok(self.blogs.lock().unwrap().clone())
    }

    async fn find_by_description_length(&self, limit: Option<i64>) -> Result<Vec<Document>> {
        self.enter()?;
        let mut ranked: Vec<Document> = self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .map(|mut doc| {
                let length = description_length(&doc);
                doc.insert(DESCRIPTION_LENGTH_FIELD, length);
                doc
            })
            .collect();
        ranked.sort_by_key(|doc| std::cmp::Reverse(description_length(doc)));
        if let Some(limit) = limit {
            ranked.truncate(limit as usize);
        }
        Ok(ranked)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>> {
        self.enter()?;
        Ok(self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .find(|doc| has_id(doc, id))
            .cloned())
    }

    async fn search(&self, terms: &str) -> Result<Vec<Document>> {
        self.enter()?;
        let terms = words(terms);
        Ok(self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| matches_terms(doc, &terms))
            .cloned()
            .collect())
    }

    async fn find_latest(&self, limit: i64) -> Result<Vec<Document>> {
        self.enter()?;
        let mut latest = self.blogs.lock().unwrap().clone();
        latest.sort_by_key(|doc| {
            std::cmp::Reverse(doc.get_datetime(PUBLISH_DATE_FIELD).ok().copied())
        });
        latest.truncate(limit as usize);
        Ok(latest)
    }

    async fn insert(&self, blog: Document) -> Result<InsertAck> {
        self.enter()?;
        Ok(insert_into(&self.blogs, blog))
    }

    async fn upsert(&self, id: ObjectId, fields: Document) -> Result<UpdateAck> {
        self.enter()?;
        let mut blogs = self.blogs.lock().unwrap();

        if let Some(existing) = blogs.iter_mut().find(|doc| has_id(doc, id)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let mut doc = Document::new();
        doc.insert(ID_FIELD, id);
        for (key, value) in fields {
            doc.insert(key, value);
        }
        blogs.push(doc);
        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id.to_hex()),
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck> {
        self.enter()?;
        Ok(delete_from(&self.blogs, id))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_blog(&self, blog_id: &str) -> Result<Vec<Document>> {
        self.enter()?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| doc.get_str(BLOG_ID_FIELD).map(|b| b == blog_id).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn insert(&self, comment: Document) -> Result<InsertAck> {
        self.enter()?;
        Ok(insert_into(&self.comments, comment))
    }
}

#[async_trait]
impl WishlistRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Document>> {
        self.enter()?;
        Ok(self.wishlist.lock().unwrap().clone())
    }

    async fn find_by_user(&self, wishlist_for: &str) -> Result<Vec<Document>> {
        self.enter()?;
        Ok(self
            .wishlist
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| {
                doc.get_str(WISHLIST_FOR_FIELD)
                    .map(|owner| owner == wishlist_for)
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, entry: Document) -> Result<InsertAck> {
        self.enter()?;
        Ok(insert_into(&self.wishlist, entry))
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck> {
        self.enter()?;
        Ok(delete_from(&self.wishlist, id))
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.enter()
    }
}
