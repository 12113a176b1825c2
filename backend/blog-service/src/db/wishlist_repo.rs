use super::{MongoStore, WishlistRepository};
use crate::error::Result;
use crate::models::{id_to_string, DeleteAck, InsertAck, ID_FIELD, WISHLIST_FOR_FIELD};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;

#[async_trait]
impl WishlistRepository for MongoStore {
    async fn find_all(&self) -> Result<Vec<Document>> {
        let cursor = self.wishlist().find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Entries owned by a user; `wishlistFor` is matched verbatim.
    async fn find_by_user(&self, wishlist_for: &str) -> Result<Vec<Document>> {
        let cursor = self
            .wishlist()
            .find(doc! { WISHLIST_FOR_FIELD: wishlist_for }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, entry: Document) -> Result<InsertAck> {
        let result = self.wishlist().insert_one(entry, None).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck> {
        let result = self
            .wishlist()
            .delete_one(doc! { ID_FIELD: id }, None)
            .await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
